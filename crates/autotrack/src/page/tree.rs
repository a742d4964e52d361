/*!
Page tree relationships.

Pages nest as screens mount inside screens (an activity hosting fragments
hosting fragments). All mutations go through methods that keep the links
bidirectional.

## Invariants

1. **Single parent**: each page has at most one parent for its lifetime.
2. **Bidirectional consistency**: if `parent_of[child] = parent`, then
   `children_of[parent]` contains `child`, and vice versa.
3. **Mount order**: children are kept in the order they were attached.
*/

use crate::types::PageId;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub(crate) struct PageTree {
  parent_of: HashMap<PageId, PageId>,
  children_of: HashMap<PageId, Vec<PageId>>,
}

impl PageTree {
  pub(super) fn new() -> Self {
    Self::default()
  }

  pub(super) fn parent(&self, id: PageId) -> Option<PageId> {
    self.parent_of.get(&id).copied()
  }

  /// Children of a page (empty slice if none).
  pub(super) fn children(&self, id: PageId) -> &[PageId] {
    self.children_of.get(&id).map_or(&[], Vec::as_slice)
  }

  /// Ancestors, nearest first.
  pub(super) fn ancestors(&self, id: PageId) -> impl Iterator<Item = PageId> + '_ {
    std::iter::successors(self.parent(id), move |&current| self.parent(current))
  }

  /// Link a child to a parent.
  ///
  /// - Same parent: no-op (idempotent)
  /// - No parent: links to the specified parent
  /// - Different parent: rejected, a remount must unmount first
  pub(super) fn add_child(&mut self, parent: PageId, child: PageId) {
    if let Some(&existing_parent) = self.parent_of.get(&child) {
      if existing_parent != parent {
        log::error!(
          "add_child: page {child} already has parent {existing_parent}, \
           cannot add to {parent}. Unmount it first."
        );
      }
      return;
    }
    if parent == child {
      log::error!("add_child: page {child} cannot be its own parent");
      return;
    }

    self.parent_of.insert(child, parent);
    self.children_of.entry(parent).or_default().push(child);
  }

  /// Remove a page and all its descendants.
  /// Returns removed IDs in removal order (parent before children).
  pub(super) fn remove_subtree(&mut self, root: PageId) -> Vec<PageId> {
    let mut removed = Vec::new();
    let mut queue = vec![root];

    while let Some(id) = queue.pop() {
      if let Some(parent_id) = self.parent_of.remove(&id) {
        if let Some(siblings) = self.children_of.get_mut(&parent_id) {
          siblings.retain(|&sid| sid != id);
        }
      }
      if let Some(children) = self.children_of.remove(&id) {
        queue.extend(children);
      }
      removed.push(id);
    }

    removed
  }
}
