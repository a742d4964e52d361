/*! Widget kinds and their live state. */

mod kind;
mod state;

pub use kind::WidgetKind;
pub use state::{InputType, WidgetState};
