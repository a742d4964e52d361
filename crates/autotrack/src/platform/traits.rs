/*!
Host element abstraction.

These types define the contract between the resolver and the host UI
toolkit. The host implements `ElementHandle` over its live element tree;
resolver code only uses this trait, never toolkit types directly.

Everything here is read on the UI-owning thread, so handles need not be
`Send`.
*/

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Bounds, ElementId, Overrides, WindowParams};
use crate::widget::WidgetState;

/// Declared visibility of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Visibility {
  #[default]
  Visible,
  /// Hidden but still taking up layout space.
  Invisible,
  /// Hidden and removed from layout.
  Gone,
}

/// Attributes fetched from a host element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementAttributes {
  /// Fully qualified class names, most-derived first. The first entry is the
  /// runtime class.
  pub class_chain: Vec<String>,
  /// Bounds in screen coordinates.
  pub bounds: Bounds,
  pub visibility: Visibility,
  /// Visibility of the window hosting the element.
  pub window_visibility: Visibility,
  pub alpha: f32,
  /// Whether any part of the element survives clipping by its ancestors.
  pub has_local_visible_rect: bool,
  /// A running animation keeps its end state visible (fill-after).
  pub animation_fill_after: bool,
  pub clickable: bool,
  pub has_click_listeners: bool,
  pub enabled: bool,
  pub checkable: bool,
  /// Developer-assigned resource entry name (e.g. `btn_login`).
  pub resource_id: Option<String>,
  pub text: Option<String>,
  /// Accessibility description.
  pub description: Option<String>,
  pub state: WidgetState,
}

impl Default for ElementAttributes {
  fn default() -> Self {
    Self {
      class_chain: Vec::new(),
      bounds: Bounds::default(),
      visibility: Visibility::Visible,
      window_visibility: Visibility::Visible,
      alpha: 1.0,
      has_local_visible_rect: true,
      animation_fill_after: false,
      clickable: false,
      has_click_listeners: false,
      enabled: true,
      checkable: false,
      resource_id: None,
      text: None,
      description: None,
      state: WidgetState::None,
    }
  }
}

impl ElementAttributes {
  /// Runtime class name without package or outer-class qualifiers.
  ///
  /// Anonymous classes have no simple name; the first named ancestor class
  /// stands in for them.
  pub fn simple_class_name(&self) -> &str {
    self
      .class_chain
      .iter()
      .map(|name| simple_name(name))
      .find(|name| !name.is_empty())
      .unwrap_or("View")
  }
}

/// `com.example.Outer$Inner` -> `Inner`; `com.example.Outer$1` -> ``.
fn simple_name(qualified: &str) -> &str {
  let after_package = qualified.rsplit('.').next().unwrap_or(qualified);
  let last = after_package.rsplit('$').next().unwrap_or(after_package);
  if last.chars().all(|c| c.is_ascii_digit()) {
    ""
  } else {
    last
  }
}

/// Collection state exposed by list-like containers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum CollectionState {
  /// Adapter-backed list: children are rows starting at `first_visible`.
  Adapter { first_visible: i32 },
  /// Paged container: children belong to the current page.
  Pager { current_item: i32 },
  /// Two-level list.
  Expandable(ExpandableLayout),
}

/// Flattened layout of a two-level list, enough to pack a flat row
/// position into a header, footer, group or child position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExpandableLayout {
  pub first_visible: i32,
  pub header_count: i32,
  pub footer_count: i32,
  /// Visible child count per group: 0 for collapsed groups.
  pub expanded_children: Vec<i32>,
}

/// A menu item represented by a menu row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItem {
  /// Resource entry name of the item id.
  pub resource_id: Option<String>,
  pub title: Option<String>,
}

/// Per-element operations.
///
/// Handles are cheap to clone references into the live tree. Two handles are
/// the same element iff their `id()`s are equal.
pub trait ElementHandle: Clone {
  /// Identity of the live element.
  fn id(&self) -> ElementId;

  /// Parent element. `None` for window roots and detached elements.
  fn parent(&self) -> Option<Self>;

  /// Ordered children (empty for leaves).
  fn children(&self) -> Vec<Self>;

  fn attributes(&self) -> ElementAttributes;

  fn overrides(&self) -> Overrides;

  /// Window-manager parameters. `Some` only for attached window roots; a
  /// parentless element without them is detached.
  fn window(&self) -> Option<WindowParams> {
    None
  }

  /// Collection state, for list-like containers.
  fn collection(&self) -> Option<CollectionState> {
    None
  }

  /// Adapter position of a direct child, for recycler lists. `None` when the
  /// list cannot tell.
  fn child_adapter_position(&self, _child: &Self) -> Option<i32> {
    None
  }

  /// The menu item a menu row represents.
  fn menu_item(&self) -> Option<MenuItem> {
    None
  }

  /// Whether this element is an attached window root.
  fn is_window_root(&self) -> bool {
    self.parent().is_none() && self.window().is_some()
  }
}
