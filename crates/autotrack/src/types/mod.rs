/*! Core types for autotrack.

Regenerate TypeScript types: `cargo test export_bindings`
*/

#![allow(missing_docs)]

mod descriptor;
mod error;
mod geometry;
mod ids;
mod node;
mod overrides;
mod window;

pub use descriptor::{PageElementDescriptor, ScreenSnapshot, ViewElementDescriptor};
pub use error::{AutotrackError, AutotrackResult};
pub use geometry::Bounds;
pub use ids::{ElementId, PageId};
pub use node::{ElementNode, NodeType, PathEncoding, Resolution, ResolveMode, UnresolvableReason};
pub use overrides::{IgnorePolicy, Overrides};
pub use window::{
  WindowParams, WindowPrefix, LAST_APPLICATION_WINDOW, LAST_SUB_WINDOW, TYPE_BASE_APPLICATION,
};
