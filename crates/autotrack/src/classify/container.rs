/*! Container kinds and the indexing rule each implies. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Container kind of an element, resolved once from its class chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum ContainerKind {
  /// Generic container: children indexed by same-class sibling count.
  #[default]
  Plain,
  /// Adapter-backed list: rows offset by the first visible position.
  AdapterList,
  /// Recycler list: rows report their adapter position.
  RecyclerList,
  /// Two-level list with headers, groups, children and footers.
  ExpandableList,
  /// Paged container: rows take the current page index.
  Pager,
  /// Swipe-to-refresh wrapper around exactly one child.
  SwipeRefresh,
  /// Adapter-backed list of menu rows.
  MenuHost,
}

impl ContainerKind {
  /// List-like containers: children are virtualized rows.
  pub const fn is_list(self) -> bool {
    matches!(
      self,
      Self::AdapterList | Self::RecyclerList | Self::ExpandableList | Self::Pager | Self::MenuHost
    )
  }
}
