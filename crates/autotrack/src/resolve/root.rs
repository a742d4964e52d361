/*!
Root finder.

Walks parent links upward from a leaf until the first boundary, collecting
the chain. Boundaries, checked per element in priority order:

1. a developer override id,
2. a mounted page,
3. no parent (a window root, or a detached element).
*/

use crate::page::PageRegistry;
use crate::platform::ElementHandle;
use crate::types::PageId;

/// Which stop condition ended the upward walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
  /// Chain truncated at an element carrying this override id.
  Override(String),
  Page(PageId),
  WindowRoot,
  /// Parentless element that is not a window root.
  Detached,
}

/// Ancestor chain from the boundary element down to the leaf.
#[derive(Debug, Clone)]
pub struct Chain<H> {
  pub boundary: Boundary,
  /// The element the walk stopped at.
  pub root: H,
  /// Elements below `root`, the root's child first and the leaf last.
  pub below: Vec<H>,
}

impl<H> Chain<H> {
  pub fn leaf(&self) -> &H {
    self.below.last().unwrap_or(&self.root)
  }
}

pub fn find_root<H: ElementHandle>(leaf: &H, pages: &PageRegistry) -> Chain<H> {
  let mut below = Vec::with_capacity(8);
  let mut current = leaf.clone();

  let boundary = loop {
    if let Some(id) = current.overrides().custom_id() {
      break Boundary::Override(id.to_owned());
    }
    if let Some(page) = pages.page_for_element(current.id()) {
      break Boundary::Page(page.id);
    }
    match current.parent() {
      Some(parent) => below.push(std::mem::replace(&mut current, parent)),
      None if current.is_window_root() => break Boundary::WindowRoot,
      None => {
        log::debug!("find_root: element {} is detached", current.id());
        break Boundary::Detached;
      }
    }
  };

  below.reverse();
  Chain {
    boundary,
    root: current,
    below,
  }
}

/// Nearest page mounted on the element or any of its ancestors.
///
/// Unlike `find_root`, override ids do not stop this walk.
pub fn enclosing_page<H: ElementHandle>(element: &H, pages: &PageRegistry) -> Option<PageId> {
  let mut current = Some(element.clone());
  while let Some(element) = current {
    if let Some(page) = pages.page_for_element(element.id()) {
      return Some(page.id);
    }
    current = element.parent();
  }
  None
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::page::PageSpec;
  use crate::testing::{FakeHandle, FakeTree, Node};

  fn ids(chain: &Chain<FakeHandle>) -> Vec<u64> {
    std::iter::once(&chain.root)
      .chain(&chain.below)
      .map(|e| e.id().0)
      .collect()
  }

  mod find_root {
    use super::*;

    #[test]
    fn window_root_boundary() {
      let mut tree = FakeTree::new();
      let root = tree.window_root(Node::frame());
      let inner = tree.add(root, Node::linear());
      let leaf = tree.add(inner, Node::text("x"));

      let chain = find_root(&tree.handle(leaf), &PageRegistry::new());
      assert_eq!(chain.boundary, Boundary::WindowRoot);
      assert_eq!(ids(&chain), vec![0, 1, 2], "root first, leaf last");
    }

    #[test]
    fn override_truncates_chain() {
      let mut tree = FakeTree::new();
      let root = tree.window_root(Node::frame());
      let card = tree.add(root, Node::linear().custom_id("card"));
      let leaf = tree.add(card, Node::text("x"));

      let chain = find_root(&tree.handle(leaf), &PageRegistry::new());
      assert_eq!(chain.boundary, Boundary::Override("card".into()));
      assert_eq!(ids(&chain), vec![1, 2]);
    }

    #[test]
    fn override_beats_page_on_same_element() {
      let mut tree = FakeTree::new();
      let root = tree.window_root(Node::frame().custom_id("shell"));
      let mut pages = PageRegistry::new();
      pages
        .mount(FakeTree::id(root), PageSpec::new("Main"), None)
        .unwrap();

      let chain = find_root(&tree.handle(root), &pages);
      assert_eq!(chain.boundary, Boundary::Override("shell".into()));
    }

    #[test]
    fn page_boundary() {
      let mut tree = FakeTree::new();
      let root = tree.window_root(Node::frame());
      let content = tree.add(root, Node::frame());
      let leaf = tree.add(content, Node::text("x"));
      let mut pages = PageRegistry::new();
      let page = pages
        .mount(FakeTree::id(content), PageSpec::new("Main"), None)
        .unwrap();

      let chain = find_root(&tree.handle(leaf), &pages);
      assert_eq!(chain.boundary, Boundary::Page(page));
      assert_eq!(ids(&chain), vec![1, 2]);
    }

    #[test]
    fn detached_is_a_boundary_not_an_error() {
      let mut tree = FakeTree::new();
      let orphan = tree.detached(Node::frame());
      let leaf = tree.add(orphan, Node::text("x"));

      let chain = find_root(&tree.handle(leaf), &PageRegistry::new());
      assert_eq!(chain.boundary, Boundary::Detached);
      assert_eq!(chain.root.id(), FakeTree::id(orphan));
      assert_eq!(chain.leaf().id(), FakeTree::id(leaf));
    }
  }

  #[test]
  fn enclosing_page_looks_past_overrides() {
    let mut tree = FakeTree::new();
    let root = tree.window_root(Node::frame());
    let card = tree.add(root, Node::linear().custom_id("card"));
    let leaf = tree.add(card, Node::text("x"));
    let mut pages = PageRegistry::new();
    let page = pages
      .mount(FakeTree::id(root), PageSpec::new("Main"), None)
      .unwrap();

    assert_eq!(enclosing_page(&tree.handle(leaf), &pages), Some(page));
    assert_eq!(enclosing_page(&tree.handle(leaf), &PageRegistry::new()), None);
  }
}
