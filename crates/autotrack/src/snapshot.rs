/*!
Screen snapshot builder.

Walks every element under the given top-level surfaces in pick mode and
collects descriptors for the remote inspection tool: one per page mounted
on a visible element, one per visible interactive element. Web surfaces are
enriched with a DOM snapshot when the bridge answers in time.
*/

use std::time::Duration;

use serde::Serialize;

use crate::bridge::{fetch_dom, WebBridge, DEFAULT_BRIDGE_TIMEOUT};
use crate::page::PageRegistry;
use crate::platform::ElementHandle;
use crate::resolve::{enclosing_page, find_root, ignoring_ancestor, Resolver, WalkNode, Walker};
use crate::types::{
  ElementNode, IgnorePolicy, PageElementDescriptor, ResolveMode, ScreenSnapshot,
  ViewElementDescriptor,
};
use crate::visibility::{is_invisible, is_visible_in_parents};
use crate::widget::WidgetKind;

/// Builds a `ScreenSnapshot` from live element trees.
#[derive(Clone, Copy)]
pub struct SnapshotBuilder<'a> {
  resolver: Resolver<'a>,
  pages: &'a PageRegistry,
  bridge: Option<&'a dyn WebBridge>,
  bridge_timeout: Duration,
}

impl std::fmt::Debug for SnapshotBuilder<'_> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("SnapshotBuilder")
      .field("has_bridge", &self.bridge.is_some())
      .field("bridge_timeout", &self.bridge_timeout)
      .finish_non_exhaustive()
  }
}

impl<'a> SnapshotBuilder<'a> {
  pub const fn new(resolver: Resolver<'a>, pages: &'a PageRegistry) -> Self {
    Self {
      resolver,
      pages,
      bridge: None,
      bridge_timeout: DEFAULT_BRIDGE_TIMEOUT,
    }
  }

  #[must_use]
  pub const fn bridge(mut self, bridge: Option<&'a dyn WebBridge>, timeout: Duration) -> Self {
    self.bridge = bridge;
    self.bridge_timeout = timeout;
    self
  }

  /// Snapshot every surface. Invisible or detached surfaces are skipped whole.
  pub fn snapshot_screen<H: ElementHandle>(&self, surfaces: &[H]) -> ScreenSnapshot {
    let mut snapshot = ScreenSnapshot::default();
    let walker = self.resolver.walker(ResolveMode::Pick);

    for surface in surfaces {
      if is_invisible(&surface.attributes()) || !is_visible_in_parents(surface) {
        log::debug!("snapshot_screen: skipping invisible surface {}", surface.id());
        continue;
      }
      let chain = find_root(surface, self.pages);
      let page = enclosing_page(&chain.root, self.pages);
      let mut node = walker.root(chain.root, &chain.boundary, page);
      for child in chain.below {
        node = walker.append_found(&node, child);
      }
      let inherited = ignoring_ancestor(surface).is_some();
      self.visit(&walker, &node, inherited, &mut snapshot);
    }

    log::debug!(
      "snapshot_screen: {} pages, {} views",
      snapshot.pages.len(),
      snapshot.views.len()
    );
    snapshot
  }

  fn visit<H: ElementHandle>(
    &self,
    walker: &Walker<'_>,
    node: &WalkNode<H>,
    ignored_by_ancestor: bool,
    snapshot: &mut ScreenSnapshot,
  ) {
    let attributes = &node.profile.attributes;
    if is_invisible(attributes) {
      return;
    }

    let policy = node.element.overrides().ignore_policy;
    let ignored = policy.map_or(ignored_by_ancestor, IgnorePolicy::ignores_self);
    let children_ignored =
      ignored_by_ancestor || policy.is_some_and(IgnorePolicy::ignores_descendants);

    if let Some(page) = self.pages.page_for_element(node.element.id()) {
      snapshot.pages.push(PageElementDescriptor {
        path: self.pages.path(page.id).unwrap_or_default(),
        title: page.title.clone(),
        left: attributes.bounds.left,
        top: attributes.bounds.top,
        width: attributes.bounds.width,
        height: attributes.bounds.height,
        is_ignored: self.pages.is_ignored(page.id),
      });
    }

    if !ignored {
      if node.profile.widget == WidgetKind::WebView {
        let resolved = walker.finish(node);
        let web_view = self.web_payload(&node.element);
        let view = self.view_descriptor(&resolved, snapshot.views.len(), web_view);
        snapshot.views.push(view);
      } else if node.interactive {
        let resolved = walker.finish(node);
        let view = self.view_descriptor(&resolved, snapshot.views.len(), None);
        snapshot.views.push(view);
      }
    }

    for (index, child) in (0..).zip(node.element.children()) {
      let child = walker.append(node, child, index);
      self.visit(walker, &child, children_ignored, snapshot);
    }
  }

  /// DOM snapshot for a web surface. Failures only drop the payload.
  fn web_payload<H: ElementHandle>(&self, element: &H) -> Option<serde_json::Value> {
    let bridge = self.bridge?;
    match fetch_dom(bridge, element.id(), self.bridge_timeout) {
      Ok(dom) => Some(dom),
      Err(e) => {
        log::warn!("snapshot_screen: web payload missing: {e}");
        None
      }
    }
  }

  fn view_descriptor(
    &self,
    node: &ElementNode,
    z_level: usize,
    web_view: Option<serde_json::Value>,
  ) -> ViewElementDescriptor {
    ViewElementDescriptor {
      xpath: node.xpath().to_owned(),
      xindex: node.xindex().map(str::to_owned),
      parent_xpath: node.clickable_ancestor_path.clone(),
      parent_xindex: node.clickable_ancestor_outline.clone(),
      left: node.bounds.left,
      top: node.bounds.top,
      width: node.bounds.width,
      height: node.bounds.height,
      node_type: node.node_type,
      content: node.content.clone(),
      page: node.enclosing_page.and_then(|page| self.pages.path(page)),
      z_level,
      index: (node.resolved_index > -1).then_some(node.resolved_index),
      web_view,
    }
  }
}

/// Wire form of a snapshot: `{ "pages": [...], "views": [...] }`.
///
/// Each descriptor serializes on its own; one that fails is logged and
/// left out instead of failing the whole snapshot.
pub fn snapshot_to_json(snapshot: &ScreenSnapshot) -> serde_json::Value {
  serde_json::json!({
    "pages": serialize_each(&snapshot.pages),
    "views": serialize_each(&snapshot.views),
  })
}

fn serialize_each<T: Serialize>(items: &[T]) -> Vec<serde_json::Value> {
  items
    .iter()
    .filter_map(|item| match serde_json::to_value(item) {
      Ok(value) => Some(value),
      Err(e) => {
        log::warn!("snapshot_to_json: dropping descriptor: {e}");
        None
      }
    })
    .collect()
}
