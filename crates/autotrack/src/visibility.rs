/*!
Visibility evaluation.

An element counts as visible only when it and every ancestor up to its
window root are each self-visible.
*/

use crate::platform::{ElementAttributes, ElementHandle, Visibility};

/// Self-visibility of one element.
///
/// A window root is visible whenever its window is: after the host is
/// backgrounded and resumed, the root can report a stale `Invisible`.
pub fn is_self_visible(attributes: &ElementAttributes, is_window_root: bool) -> bool {
  if attributes.window_visibility == Visibility::Gone {
    return false;
  }
  if is_window_root {
    return true;
  }

  if attributes.bounds.is_empty()
    || attributes.alpha <= 0.0
    || !attributes.has_local_visible_rect
  {
    return false;
  }

  // A fill-after animation keeps the element on screen past its flag.
  if attributes.visibility != Visibility::Visible && attributes.animation_fill_after {
    return true;
  }
  attributes.visibility == Visibility::Visible
}

/// The element and all its ancestors are self-visible.
///
/// Returns false at the first hidden element, and when the chain ends at a
/// parentless element that is not a window root (detached mid-walk).
pub fn is_visible_in_parents<H: ElementHandle>(element: &H) -> bool {
  let mut current = element.clone();
  loop {
    let is_root = current.is_window_root();
    if !is_self_visible(&current.attributes(), is_root) {
      return false;
    }
    if is_root {
      return true;
    }
    match current.parent() {
      Some(parent) => current = parent,
      None => {
        log::debug!("is_visible_in_parents: hit detached element {}", current.id());
        return false;
      }
    }
  }
}

/// Cheap pre-filter used by snapshots and content search: gone, or no area.
pub fn is_invisible(attributes: &ElementAttributes) -> bool {
  attributes.visibility == Visibility::Gone || attributes.bounds.is_empty()
}
