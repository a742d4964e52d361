/*!
Classification: what kind of container or widget an element is, whether it
is independently interactive, and which prefix its boundary contributes.
*/

mod capabilities;
mod container;
mod interactive;
mod window;

pub use capabilities::{CapabilityRegistry, CapabilityRegistryBuilder, Library, Profile};
pub use container::ContainerKind;
pub use interactive::{
  interactive_rule, is_change_type, is_click_type, is_interactive, node_type, Probe,
};
pub use window::{
  needs_popup_decor, page_boundary, window_boundary, window_prefix, BoundaryPrefix,
  POPUP_DECOR_API_LEVEL, POPUP_DECOR_VIEW,
};
