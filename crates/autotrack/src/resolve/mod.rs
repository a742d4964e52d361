/*!
Element path resolution.

# Module Structure

- `root.rs` - upward walk to the boundary element
- `builder.rs` - downward walk, one segment per element
- `encoding.rs` - legacy and outline string assembly
- `expandable.rs` - two-level list position packing
- `menu.rs` - fixed paths for menu items

# Example

```ignore
let resolver = Resolver::new(&capabilities, &pages, ResolveConfig::default());
match resolver.resolve(&element, ResolveMode::Click) {
  Resolution::Node(node) => report(node.xpath(), node.xindex()),
  Resolution::Unresolvable(reason) => log::debug!("skipped: {reason:?}"),
}
```
*/

mod builder;
mod encoding;
mod expandable;
mod menu;
mod root;

pub use builder::{raw_index, WalkNode, Walker};
pub use encoding::{LegacyPath, OutlinePath, PathText, Slot, Step};
pub use expandable::ExpandableSlot;
pub use menu::{menu_item_text, resolve_menu_item};
pub use root::{enclosing_page, find_root, Boundary, Chain};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::classify::{CapabilityRegistry, POPUP_DECOR_API_LEVEL};
use crate::page::PageRegistry;
use crate::platform::ElementHandle;
use crate::types::{
  ElementId, IgnorePolicy, PathEncoding, Resolution, ResolveMode, UnresolvableReason,
};

/// Plain configuration threaded into every walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResolveConfig {
  pub encoding: PathEncoding,
  /// Host OS API level; below 23 popups get a synthetic decor segment.
  pub os_api_level: u32,
}

impl Default for ResolveConfig {
  fn default() -> Self {
    Self {
      encoding: PathEncoding::default(),
      os_api_level: POPUP_DECOR_API_LEVEL,
    }
  }
}

/// Why an element must not be reported, if it must not.
///
/// The element's own policy decides when set. Otherwise the nearest
/// ancestor whose policy covers descendants (`IgnoreAll`, `IgnoreChild`)
/// ignores it; `IgnoreSelf` ancestors are transparent.
pub fn ignore_reason<H: ElementHandle>(element: &H) -> Option<UnresolvableReason> {
  if let Some(policy) = element.overrides().ignore_policy {
    return policy
      .ignores_self()
      .then_some(UnresolvableReason::IgnoredSelf);
  }
  ignoring_ancestor(element).map(|ancestor| UnresolvableReason::IgnoredByAncestor { ancestor })
}

/// Nearest strict ancestor whose policy covers its descendants.
pub fn ignoring_ancestor<H: ElementHandle>(element: &H) -> Option<ElementId> {
  let mut current = element.parent();
  while let Some(ancestor) = current {
    if ancestor
      .overrides()
      .ignore_policy
      .is_some_and(IgnorePolicy::ignores_descendants)
    {
      return Some(ancestor.id());
    }
    current = ancestor.parent();
  }
  None
}

/// Resolves live elements to `ElementNode`s.
///
/// Borrows the capability and page registries for the duration of a batch
/// of walks; build one per batch, not per element.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
  capabilities: &'a CapabilityRegistry,
  pages: &'a PageRegistry,
  config: ResolveConfig,
  foreground: Option<u64>,
}

impl<'a> Resolver<'a> {
  pub const fn new(
    capabilities: &'a CapabilityRegistry,
    pages: &'a PageRegistry,
    config: ResolveConfig,
  ) -> Self {
    Self {
      capabilities,
      pages,
      config,
      foreground: None,
    }
  }

  /// Identity of the window currently in front.
  #[must_use]
  pub const fn with_foreground(mut self, identity: Option<u64>) -> Self {
    self.foreground = identity;
    self
  }

  pub const fn walker(&self, mode: ResolveMode) -> Walker<'a> {
    Walker {
      capabilities: self.capabilities,
      pages: self.pages,
      config: self.config,
      foreground: self.foreground,
      mode,
    }
  }

  /// Resolve one element. Paths are recomputed from the live tree on every
  /// call.
  pub fn resolve<H: ElementHandle>(&self, element: &H, mode: ResolveMode) -> Resolution {
    if let Some(reason) = ignore_reason(element) {
      log::debug!("resolve: element {} is ignored ({reason:?})", element.id());
      return Resolution::Unresolvable(reason);
    }

    let walker = self.walker(mode);
    let chain = find_root(element, self.pages);
    let page = enclosing_page(&chain.root, self.pages);

    let mut node = walker.root(chain.root, &chain.boundary, page);
    for child in chain.below {
      node = walker.append_found(&node, child);
    }
    Resolution::Node(walker.finish(&node))
  }
}
