/*! Host platform abstraction. */

mod traits;

pub use traits::{
  CollectionState, ElementAttributes, ElementHandle, ExpandableLayout, MenuItem, Visibility,
};
