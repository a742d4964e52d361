/*!
Autotrack - stable UI element paths for automatic interaction tracking.

```ignore
use autotrack::{Autotracker, PageSpec, ResolveMode};

let tracker = Autotracker::new();

// Pages are mounted on their content root as screens come and go
let page = tracker.mount_page(content_root.id(), PageSpec::new("HomeActivity"), None)?;

// Resolve an element without reporting it
let resolution = tracker.resolve(&element, ResolveMode::Click);

// Report interactions; subscribers receive `Event`s
let mut events = tracker.subscribe();
tracker.on_click(&element)?;

// Describe everything on screen for the element picker
let snapshot = tracker.snapshot_screen(&window_roots);
```

The host implements [`ElementHandle`] over its live element tree. All
walks run synchronously on the calling thread; the only wait is the
bounded web bridge call made while snapshotting.
*/

pub mod bridge;
pub mod classify;
pub mod content;
pub mod page;
pub mod platform;
pub mod resolve;
pub mod snapshot;
pub mod visibility;
pub mod widget;

mod tracker;
mod types;

#[cfg(test)]
mod testing;

pub use types::*;

pub use crate::bridge::{DomResponder, WebBridge, DEFAULT_BRIDGE_TIMEOUT};
pub use crate::classify::{CapabilityRegistry, ContainerKind, Library};
pub use crate::page::{Page, PageRegistry, PageSpec};
pub use crate::platform::{ElementAttributes, ElementHandle, MenuItem};
pub use crate::resolve::{ResolveConfig, Resolver};
pub use crate::snapshot::{snapshot_to_json, SnapshotBuilder};
pub use crate::tracker::{Autotracker, AutotrackerBuilder, Event, ViewElementEvent};
pub use crate::widget::{WidgetKind, WidgetState};
