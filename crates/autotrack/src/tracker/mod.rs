/*!
Autotracker facade: owns page state, resolves elements on user
interaction and broadcasts events.

# Module Structure

- `mod.rs` - `Autotracker`, builder, page bookkeeping, event emission
- `events.rs` - `Event` and its payload

# Example

```ignore
let tracker = Autotracker::builder()
  .encoding(PathEncoding::Outline)
  .bridge(Arc::new(MyBridge))
  .build();

let page = tracker.mount_page(content_root_id, PageSpec::new("HomeActivity"), None)?;

let mut events = tracker.subscribe();
tracker.on_click(&element)?;
while let Ok(event) = events.recv().await {
  // forward to the event pipeline
}
```
*/

mod events;

pub use events::{Event, ViewElementEvent};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_broadcast::{InactiveReceiver, Sender};
use parking_lot::{Mutex, RwLock};

use crate::bridge::{WebBridge, DEFAULT_BRIDGE_TIMEOUT};
use crate::classify::CapabilityRegistry;
use crate::page::{PageRegistry, PageSpec};
use crate::platform::{ElementHandle, MenuItem};
use crate::resolve::{resolve_menu_item, ResolveConfig, Resolver};
use crate::snapshot::SnapshotBuilder;
use crate::types::{
  AutotrackError, AutotrackResult, ElementId, ElementNode, IgnorePolicy, PageId, PathEncoding,
  Resolution, ResolveMode, ScreenSnapshot,
};
use crate::widget::WidgetKind;

const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Autotracking entry point.
///
/// Clone is cheap (Arc bumps). Element handles are only read on the calling
/// thread; the shared state is safe to touch from anywhere.
pub struct Autotracker {
  /// Copy-on-write: walks hold their own `Arc`, never the lock.
  pages: Arc<RwLock<Arc<PageRegistry>>>,
  capabilities: Arc<CapabilityRegistry>,
  config: ResolveConfig,
  foreground: Arc<RwLock<Option<u64>>>,
  /// Last reported text per input, for change detection.
  reported_text: Arc<Mutex<HashMap<ElementId, String>>>,
  bridge: Option<Arc<dyn WebBridge>>,
  bridge_timeout: Duration,
  events_tx: Sender<Event>,
  events_keepalive: InactiveReceiver<Event>,
}

impl Clone for Autotracker {
  fn clone(&self) -> Self {
    Self {
      pages: Arc::clone(&self.pages),
      capabilities: Arc::clone(&self.capabilities),
      config: self.config,
      foreground: Arc::clone(&self.foreground),
      reported_text: Arc::clone(&self.reported_text),
      bridge: self.bridge.clone(),
      bridge_timeout: self.bridge_timeout,
      events_tx: self.events_tx.clone(),
      events_keepalive: self.events_keepalive.clone(),
    }
  }
}

impl std::fmt::Debug for Autotracker {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Autotracker")
      .field("config", &self.config)
      .finish_non_exhaustive()
  }
}

impl Default for Autotracker {
  fn default() -> Self {
    Self::new()
  }
}

/// Builder for configuring an `Autotracker`.
///
/// ```ignore
/// let tracker = Autotracker::builder()
///   .encoding(PathEncoding::Legacy)
///   .bridge_timeout_ms(500)
///   .build();
/// ```
#[must_use = "Builder does nothing until .build() is called"]
pub struct AutotrackerBuilder {
  config: ResolveConfig,
  bridge_timeout: Duration,
  capabilities: Option<CapabilityRegistry>,
  bridge: Option<Arc<dyn WebBridge>>,
}

impl Default for AutotrackerBuilder {
  fn default() -> Self {
    Self {
      config: ResolveConfig::default(),
      bridge_timeout: DEFAULT_BRIDGE_TIMEOUT,
      capabilities: None,
      bridge: None,
    }
  }
}

impl std::fmt::Debug for AutotrackerBuilder {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AutotrackerBuilder")
      .field("config", &self.config)
      .field("bridge_timeout", &self.bridge_timeout)
      .field("has_bridge", &self.bridge.is_some())
      .finish_non_exhaustive()
  }
}

impl AutotrackerBuilder {
  /// Path encoding. Default: outline.
  pub const fn encoding(mut self, encoding: PathEncoding) -> Self {
    self.config.encoding = encoding;
    self
  }

  /// Bounded wait for web DOM snapshots. Default: 2000ms.
  pub const fn bridge_timeout_ms(mut self, ms: u64) -> Self {
    self.bridge_timeout = Duration::from_millis(ms);
    self
  }

  /// Host OS API level. Below 23, popup window roots get an extra
  /// decor segment.
  pub const fn os_api_level(mut self, level: u32) -> Self {
    self.config.os_api_level = level;
    self
  }

  /// Class tables. Default: `CapabilityRegistry::android()`.
  pub fn capabilities(mut self, capabilities: CapabilityRegistry) -> Self {
    self.capabilities = Some(capabilities);
    self
  }

  /// Web DOM bridge used by `snapshot_screen`. Without one, web surfaces are
  /// reported with no payload.
  pub fn bridge(mut self, bridge: Arc<dyn WebBridge>) -> Self {
    self.bridge = Some(bridge);
    self
  }

  pub fn build(self) -> Autotracker {
    let (mut tx, rx) = async_broadcast::broadcast(EVENT_CHANNEL_CAPACITY);
    tx.set_overflow(true);

    Autotracker {
      pages: Arc::new(RwLock::new(Arc::new(PageRegistry::new()))),
      capabilities: Arc::new(self.capabilities.unwrap_or_default()),
      config: self.config,
      foreground: Arc::new(RwLock::new(None)),
      reported_text: Arc::new(Mutex::new(HashMap::new())),
      bridge: self.bridge,
      bridge_timeout: self.bridge_timeout,
      events_tx: tx,
      events_keepalive: rx.deactivate(),
    }
  }
}

impl Autotracker {
  /// Tracker with default options.
  pub fn new() -> Self {
    Self::builder().build()
  }

  pub fn builder() -> AutotrackerBuilder {
    AutotrackerBuilder::default()
  }

  pub const fn config(&self) -> ResolveConfig {
    self.config
  }

  /// Subscribe to events from this instance.
  pub fn subscribe(&self) -> async_broadcast::Receiver<Event> {
    self.events_keepalive.activate_cloned()
  }

  /// Read page state. Never touch live elements inside the closure.
  #[inline]
  pub(crate) fn read<R>(&self, f: impl FnOnce(&PageRegistry) -> R) -> R {
    f(&self.pages.read())
  }

  /// Write page state. Never touch live elements inside the closure.
  ///
  /// Walks still holding the previous state keep it; the registry is cloned
  /// only while such a walk is running.
  #[inline]
  pub(crate) fn write<R>(&self, f: impl FnOnce(&mut PageRegistry) -> R) -> R {
    let mut pages = self.pages.write();
    f(Arc::make_mut(&mut pages))
  }

  /// Current page state, detached from the lock for a walk over live
  /// elements.
  fn current_pages(&self) -> Arc<PageRegistry> {
    Arc::clone(&self.pages.read())
  }

  // ==========================================================================
  // Pages
  // ==========================================================================

  pub fn mount_page(
    &self,
    root: ElementId,
    spec: PageSpec,
    parent: Option<PageId>,
  ) -> AutotrackResult<PageId> {
    self.write(|pages| pages.mount(root, spec, parent))
  }

  /// Unmount a page and its nested pages. Returns the removed IDs.
  pub fn unmount_page(&self, page: PageId) -> AutotrackResult<Vec<PageId>> {
    self.write(|pages| pages.unmount(page))
  }

  pub fn set_page_alias(&self, page: PageId, alias: Option<String>) -> AutotrackResult<()> {
    self.write(|pages| pages.set_alias(page, alias))
  }

  pub fn set_page_tag(&self, page: PageId, tag: Option<String>) -> AutotrackResult<()> {
    self.write(|pages| pages.set_tag(page, tag))
  }

  pub fn set_page_title(&self, page: PageId, title: Option<String>) -> AutotrackResult<()> {
    self.write(|pages| pages.set_title(page, title))
  }

  pub fn set_page_ignore_policy(
    &self,
    page: PageId,
    policy: Option<IgnorePolicy>,
  ) -> AutotrackResult<()> {
    self.write(|pages| pages.set_ignore_policy(page, policy))
  }

  pub fn page_path(&self, page: PageId) -> Option<String> {
    self.read(|pages| pages.path(page))
  }

  /// Window identity currently in front; its root resolves as the main
  /// window whatever its layout type.
  pub fn set_foreground_window(&self, identity: Option<u64>) {
    *self.foreground.write() = identity;
  }

  // ==========================================================================
  // Resolution
  // ==========================================================================

  /// Resolve one element against the current page state.
  pub fn resolve<H: ElementHandle>(&self, element: &H, mode: ResolveMode) -> Resolution {
    let foreground = *self.foreground.read();
    let pages = self.current_pages();
    Resolver::new(&self.capabilities, &pages, self.config)
      .with_foreground(foreground)
      .resolve(element, mode)
  }

  /// Describe every visible page and interactive element under `surfaces`.
  pub fn snapshot_screen<H: ElementHandle>(&self, surfaces: &[H]) -> ScreenSnapshot {
    let foreground = *self.foreground.read();
    let pages = self.current_pages();
    let resolver =
      Resolver::new(&self.capabilities, &pages, self.config).with_foreground(foreground);
    SnapshotBuilder::new(resolver, &pages)
      .bridge(self.bridge.as_deref(), self.bridge_timeout)
      .snapshot_screen(surfaces)
  }

  // ==========================================================================
  // Interaction events
  // ==========================================================================

  /// Report a click. Ignored elements produce no event.
  pub fn on_click<H: ElementHandle>(&self, element: &H) -> AutotrackResult<ViewElementEvent> {
    let node = self.resolve_reportable(element)?;
    let event = self.event_for(&node);
    self.emit(Event::ViewClick(event.clone()));
    Ok(event)
  }

  /// Report a value change. Inputs only report when their text differs from
  /// the last reported text; `Ok(None)` means nothing changed.
  pub fn on_change<H: ElementHandle>(
    &self,
    element: &H,
  ) -> AutotrackResult<Option<ViewElementEvent>> {
    let node = self.resolve_reportable(element)?;

    let attributes = element.attributes();
    if self.capabilities.widget_kind(&attributes.class_chain) == WidgetKind::EditText {
      let current = attributes.text.unwrap_or_default();
      let mut reported = self.reported_text.lock();
      if reported.get(&element.id()).map_or("", String::as_str) == current {
        log::debug!("on_change: {} unchanged", element.id());
        return Ok(None);
      }
      reported.insert(element.id(), current);
    }

    let event = self.event_for(&node);
    self.emit(Event::ViewChange(event.clone()));
    Ok(Some(event))
  }

  /// Drop change-detection state for an element that left the screen.
  pub fn forget_element(&self, element: ElementId) {
    self.reported_text.lock().remove(&element);
  }

  /// Report a menu item click that came without an element.
  pub fn on_menu_item(&self, item: &MenuItem, page: Option<PageId>) -> ViewElementEvent {
    let node = self.read(|pages| resolve_menu_item(item, page, pages, self.config.encoding));
    let event = self.event_for(&node);
    self.emit(Event::ViewClick(event.clone()));
    event
  }

  fn resolve_reportable<H: ElementHandle>(&self, element: &H) -> AutotrackResult<ElementNode> {
    match self.resolve(element, ResolveMode::Click) {
      Resolution::Node(node) => Ok(node),
      Resolution::Unresolvable(reason) => {
        log::debug!("not reporting {}: {reason:?}", element.id());
        Err(AutotrackError::ElementIgnored(element.id()))
      }
    }
  }

  fn event_for(&self, node: &ElementNode) -> ViewElementEvent {
    let page_path = node.enclosing_page.and_then(|page| self.page_path(page));
    if page_path.is_none() {
      log::warn!("event for {} has no enclosing page", node.xpath());
    }
    ViewElementEvent::from_node(node, page_path)
  }

  fn emit(&self, event: Event) {
    if let Err(e) = self.events_tx.try_broadcast(event) {
      if e.is_full() {
        log::error!(
          "Event channel overflow - events are being dropped. \
           Consider increasing EVENT_CHANNEL_CAPACITY or processing events faster."
        );
      }
    }
  }
}
