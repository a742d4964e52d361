/*! Resolved element nodes. */

use super::{Bounds, ElementId, PageId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which path encoding the resolver assembles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum PathEncoding {
  /// Class name and literal index interleaved per segment (`/Class[3]`).
  Legacy,
  /// Class-name-only structural path plus a parallel positional outline.
  #[default]
  Outline,
}

/// Resolution mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ResolveMode {
  /// A single element the user touched. Pages are opaque boundaries.
  #[default]
  Click,
  /// Element picker / circle mode. Non-ignored pages collapse to `/Page`.
  Pick,
}

/// Coarse node category reported to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum NodeType {
  Input,
  Text,
  WebView,
  List,
  Button,
  MenuItem,
}

/// A resolved element. Transient: recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ElementNode {
  pub element_id: Option<ElementId>,
  /// Stable path. Legacy encoding: pattern with `[-]` at virtualized slots.
  /// Outline encoding: class names only.
  pub structural_path: String,
  /// Outline encoding only: numeric/placeholder segments.
  pub positional_outline: Option<String>,
  /// Legacy encoding only: literal index per segment.
  pub legacy_path: Option<String>,
  /// Position inside the nearest list-like ancestor, or -1.
  pub resolved_index: i32,
  /// Structural path of the nearest interactive strict ancestor.
  pub clickable_ancestor_path: Option<String>,
  /// Outline of the nearest interactive strict ancestor (outline encoding).
  pub clickable_ancestor_outline: Option<String>,
  /// Extracted label, at most 100 characters.
  pub content: String,
  pub node_type: NodeType,
  pub has_list_parent: bool,
  pub has_developer_override_id: bool,
  /// Lookup only; the page registry owns pages.
  pub enclosing_page: Option<PageId>,
  pub bounds: Bounds,
}

impl ElementNode {
  /// Path carried by events.
  pub fn xpath(&self) -> &str {
    &self.structural_path
  }

  /// Positional outline, or the literal legacy path when running legacy.
  pub fn xindex(&self) -> Option<&str> {
    self
      .positional_outline
      .as_deref()
      .or(self.legacy_path.as_deref())
  }
}

/// Why an element cannot be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum UnresolvableReason {
  /// The element's own policy ignores it.
  IgnoredSelf,
  /// An ancestor's policy ignores its descendants.
  IgnoredByAncestor { ancestor: ElementId },
}

/// Outcome of resolving an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  Node(ElementNode),
  /// Caller must not emit an event.
  Unresolvable(UnresolvableReason),
}

impl Resolution {
  pub fn into_node(self) -> Option<ElementNode> {
    match self {
      Self::Node(node) => Some(node),
      Self::Unresolvable(_) => None,
    }
  }

  pub const fn node(&self) -> Option<&ElementNode> {
    match self {
      Self::Node(node) => Some(node),
      Self::Unresolvable(_) => None,
    }
  }

  pub const fn is_resolvable(&self) -> bool {
    matches!(self, Self::Node(_))
  }
}
