/*!
Page registry.

Owns every mounted `Page` and the page tree, plus a non-owning side-table
from the root element a page is mounted on to the page. The resolver only
looks pages up here; elements never hold pages.

Page paths are computed on every call from the current tree and page state.
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::tree::PageTree;
use crate::types::{AutotrackError, AutotrackResult, ElementId, IgnorePolicy, PageId};

/// How many page levels a page path spans before older ancestors collapse
/// into `*`.
pub const MAX_PAGE_LEVEL: usize = 3;

/// What the host declares when mounting a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageSpec {
  /// Registered name, usually the screen's class name.
  pub name: String,
  /// Disambiguating tag for repeated instances of the same screen.
  pub tag: Option<String>,
  pub title: Option<String>,
  /// Developer alias; replaces the whole page path.
  pub alias: Option<String>,
}

impl PageSpec {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
    self.tag = Some(tag.into());
    self
  }

  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
    self.alias = Some(alias.into());
    self
  }
}

/// A logical screen mounted on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page {
  pub id: PageId,
  /// Element the page is mounted on.
  pub root: ElementId,
  pub name: String,
  pub tag: Option<String>,
  pub title: Option<String>,
  pub alias: Option<String>,
  pub ignore_policy: Option<IgnorePolicy>,
}

impl Page {
  /// Tag as rendered in paths: an empty tag renders `-`.
  fn tag_label(&self) -> Option<&str> {
    self
      .tag
      .as_deref()
      .map(|tag| if tag.is_empty() { "-" } else { tag })
  }

  /// `name[tag]`, or just `name` without a tag.
  pub fn tagged_name(&self) -> String {
    match self.tag_label() {
      Some(tag) => format!("{}[{tag}]", self.name),
      None => self.name.clone(),
    }
  }

  /// Positional segment: the tag, or `0`.
  fn outline_segment(&self) -> &str {
    self.tag_label().unwrap_or("0")
  }

  fn alias(&self) -> Option<&str> {
    self.alias.as_deref().filter(|alias| !alias.is_empty())
  }
}

/// Owns pages, their tree, and the element side-table.
#[derive(Debug, Clone, Default)]
pub struct PageRegistry {
  pages: HashMap<PageId, Page>,
  tree: PageTree,
  mounted: HashMap<ElementId, PageId>,
  next_id: u32,
}

impl PageRegistry {
  pub fn new() -> Self {
    Self {
      pages: HashMap::new(),
      tree: PageTree::new(),
      mounted: HashMap::new(),
      next_id: 0,
    }
  }

  /// Mount a page on `root`, optionally under a parent page.
  pub fn mount(
    &mut self,
    root: ElementId,
    spec: PageSpec,
    parent: Option<PageId>,
  ) -> AutotrackResult<PageId> {
    if let Some(&existing) = self.mounted.get(&root) {
      return Err(AutotrackError::AlreadyMounted(root, existing));
    }
    if let Some(parent) = parent {
      if !self.pages.contains_key(&parent) {
        return Err(AutotrackError::PageNotFound(parent));
      }
    }

    self.next_id += 1;
    let id = PageId(self.next_id);
    let page = Page {
      id,
      root,
      name: spec.name,
      tag: spec.tag,
      title: spec.title,
      alias: spec.alias,
      ignore_policy: None,
    };
    log::debug!("mount: page {id} ({}) on element {root}", page.name);

    self.pages.insert(id, page);
    self.mounted.insert(root, id);
    if let Some(parent) = parent {
      self.tree.add_child(parent, id);
    }
    Ok(id)
  }

  /// Unmount a page and every page nested in it.
  /// Returns removed IDs, parent before children.
  pub fn unmount(&mut self, id: PageId) -> AutotrackResult<Vec<PageId>> {
    if !self.pages.contains_key(&id) {
      return Err(AutotrackError::PageNotFound(id));
    }
    let removed = self.tree.remove_subtree(id);
    for page_id in &removed {
      if let Some(page) = self.pages.remove(page_id) {
        self.mounted.remove(&page.root);
      }
    }
    log::debug!("unmount: removed pages {removed:?}");
    Ok(removed)
  }

  pub fn page(&self, id: PageId) -> Option<&Page> {
    self.pages.get(&id)
  }

  /// Page mounted on exactly this element.
  pub fn page_for_element(&self, element: ElementId) -> Option<&Page> {
    self
      .mounted
      .get(&element)
      .and_then(|id| self.pages.get(id))
  }

  pub fn parent(&self, id: PageId) -> Option<PageId> {
    self.tree.parent(id)
  }

  pub fn children(&self, id: PageId) -> &[PageId] {
    self.tree.children(id)
  }

  /// Pages without a parent, in mount order.
  pub fn roots(&self) -> Vec<PageId> {
    let mut roots: Vec<PageId> = self
      .pages
      .keys()
      .copied()
      .filter(|&id| self.tree.parent(id).is_none())
      .collect();
    roots.sort_unstable();
    roots
  }

  pub fn len(&self) -> usize {
    self.pages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pages.is_empty()
  }

  fn page_mut(&mut self, id: PageId) -> AutotrackResult<&mut Page> {
    self
      .pages
      .get_mut(&id)
      .ok_or(AutotrackError::PageNotFound(id))
  }

  pub fn set_alias(&mut self, id: PageId, alias: Option<String>) -> AutotrackResult<()> {
    self.page_mut(id)?.alias = alias;
    Ok(())
  }

  pub fn set_tag(&mut self, id: PageId, tag: Option<String>) -> AutotrackResult<()> {
    self.page_mut(id)?.tag = tag;
    Ok(())
  }

  pub fn set_title(&mut self, id: PageId, title: Option<String>) -> AutotrackResult<()> {
    self.page_mut(id)?.title = title;
    Ok(())
  }

  pub fn set_ignore_policy(
    &mut self,
    id: PageId,
    policy: Option<IgnorePolicy>,
  ) -> AutotrackResult<()> {
    self.page_mut(id)?.ignore_policy = policy;
    Ok(())
  }

  /// Own policy decides when set; otherwise any ancestor ignoring its
  /// descendants ignores this page. Unknown pages are not ignored.
  pub fn is_ignored(&self, id: PageId) -> bool {
    let Some(page) = self.pages.get(&id) else {
      return false;
    };
    if let Some(policy) = page.ignore_policy {
      return policy.ignores_self();
    }
    self.tree.ancestors(id).any(|ancestor| {
      self
        .pages
        .get(&ancestor)
        .and_then(|page| page.ignore_policy)
        .is_some_and(IgnorePolicy::ignores_descendants)
    })
  }

  /// Page path: `/alias` when aliased, else the tagged origin path limited to
  /// `MAX_PAGE_LEVEL` levels.
  pub fn path(&self, id: PageId) -> Option<String> {
    let page = self.pages.get(&id)?;
    if let Some(alias) = page.alias() {
      return Some(format!("/{alias}"));
    }
    let (chain, truncated) = self.chain(id, true);
    Some(render(&chain, truncated, Page::tagged_name))
  }

  /// Names only, every level, no tags.
  pub fn structural_path(&self, id: PageId) -> Option<String> {
    self.pages.get(&id)?;
    let (chain, _) = self.chain(id, false);
    Some(render(&chain, false, |page| page.name.clone()))
  }

  /// Positional outline of the page chain: each level's tag, or `0`.
  pub fn x_index(&self, id: PageId) -> Option<String> {
    self.pages.get(&id)?;
    let (chain, _) = self.chain(id, false);
    Some(render(&chain, false, |page| page.outline_segment().to_owned()))
  }

  /// Pages from the outermost included ancestor down to `id`, and whether
  /// older ancestors were cut off.
  ///
  /// With `limited`, the walk stops after `MAX_PAGE_LEVEL` levels or at the
  /// first aliased ancestor (which is still included).
  fn chain(&self, id: PageId, limited: bool) -> (Vec<&Page>, bool) {
    let mut chain: Vec<&Page> = self.pages.get(&id).into_iter().collect();
    let mut truncated = false;
    let mut current = self.tree.parent(id);

    while let Some(parent_id) = current {
      let Some(parent) = self.pages.get(&parent_id) else {
        break;
      };
      chain.push(parent);
      if limited && chain.len() >= MAX_PAGE_LEVEL {
        truncated = self.tree.parent(parent_id).is_some();
        break;
      }
      if limited && parent.alias().is_some() {
        break;
      }
      current = self.tree.parent(parent_id);
    }

    chain.reverse();
    (chain, truncated)
  }
}

/// Join page segments root-first. A truncated chain starts with `*/`.
fn render(chain: &[&Page], truncated: bool, segment: impl Fn(&Page) -> String) -> String {
  let mut path = String::new();
  for (i, page) in chain.iter().enumerate() {
    path.push_str(if truncated && i == 0 { "*/" } else { "/" });
    path.push_str(&segment(page));
  }
  path
}

#[cfg(test)]
mod tests {
  use super::*;

  fn el(n: u64) -> ElementId {
    ElementId(n)
  }

  /// Main -> Home[feed] -> Detail -> Comments
  fn nested() -> (PageRegistry, [PageId; 4]) {
    let mut pages = PageRegistry::new();
    let main = pages.mount(el(1), PageSpec::new("MainActivity"), None).unwrap();
    let home = pages
      .mount(el(2), PageSpec::new("HomeFragment").with_tag("feed"), Some(main))
      .unwrap();
    let detail = pages
      .mount(el(3), PageSpec::new("DetailFragment"), Some(home))
      .unwrap();
    let comments = pages
      .mount(el(4), PageSpec::new("CommentsFragment"), Some(detail))
      .unwrap();
    (pages, [main, home, detail, comments])
  }

  mod mount {
    use super::*;

    #[test]
    fn side_table_finds_page_by_root() {
      let (pages, [main, home, ..]) = nested();
      assert_eq!(pages.page_for_element(el(1)).map(|p| p.id), Some(main));
      assert_eq!(pages.page_for_element(el(2)).map(|p| p.id), Some(home));
      assert!(pages.page_for_element(el(99)).is_none());
    }

    #[test]
    fn rejects_double_mount() {
      let (mut pages, [main, ..]) = nested();
      let err = pages.mount(el(1), PageSpec::new("Other"), None).unwrap_err();
      assert!(matches!(err, AutotrackError::AlreadyMounted(e, p) if e == el(1) && p == main));
    }

    #[test]
    fn rejects_unknown_parent() {
      let mut pages = PageRegistry::new();
      let err = pages
        .mount(el(1), PageSpec::new("Orphan"), Some(PageId(42)))
        .unwrap_err();
      assert!(matches!(err, AutotrackError::PageNotFound(PageId(42))));
      assert!(pages.is_empty(), "failed mount leaves no trace");
    }

    #[test]
    fn unmount_removes_subtree_and_side_table() {
      let (mut pages, [main, home, detail, comments]) = nested();
      let removed = pages.unmount(home).unwrap();
      assert_eq!(removed.len(), 3);
      assert!(removed.contains(&detail) && removed.contains(&comments));
      assert!(pages.page_for_element(el(3)).is_none());
      assert_eq!(pages.children(main), &[] as &[PageId]);
      assert_eq!(pages.roots(), vec![main]);
    }
  }

  mod path {
    use super::*;

    #[test]
    fn single_page() {
      let (pages, [main, ..]) = nested();
      assert_eq!(pages.path(main).as_deref(), Some("/MainActivity"));
      assert_eq!(pages.x_index(main).as_deref(), Some("/0"));
    }

    #[test]
    fn tags_render_in_brackets() {
      let (pages, [_, home, ..]) = nested();
      assert_eq!(
        pages.path(home).as_deref(),
        Some("/MainActivity/HomeFragment[feed]")
      );
      assert_eq!(pages.x_index(home).as_deref(), Some("/0/feed"));
      assert_eq!(
        pages.structural_path(home).as_deref(),
        Some("/MainActivity/HomeFragment")
      );
    }

    #[test]
    fn empty_tag_renders_dash() {
      let mut pages = PageRegistry::new();
      let id = pages
        .mount(el(1), PageSpec::new("Tabs").with_tag(""), None)
        .unwrap();
      assert_eq!(pages.path(id).as_deref(), Some("/Tabs[-]"));
      assert_eq!(pages.x_index(id).as_deref(), Some("/-"));
    }

    #[test]
    fn three_levels_fit_exactly() {
      let (pages, [_, _, detail, _]) = nested();
      assert_eq!(
        pages.path(detail).as_deref(),
        Some("/MainActivity/HomeFragment[feed]/DetailFragment")
      );
    }

    #[test]
    fn deeper_pages_collapse_with_star() {
      let (pages, [_, _, _, comments]) = nested();
      assert_eq!(
        pages.path(comments).as_deref(),
        Some("*/HomeFragment[feed]/DetailFragment/CommentsFragment")
      );
      assert_eq!(
        pages.x_index(comments).as_deref(),
        Some("/0/feed/0/0"),
        "outline is never truncated"
      );
    }

    #[test]
    fn alias_replaces_path() {
      let (mut pages, [_, home, ..]) = nested();
      pages.set_alias(home, Some("Feed".into())).unwrap();
      assert_eq!(pages.path(home).as_deref(), Some("/Feed"));
    }

    #[test]
    fn aliased_ancestor_stops_the_walk() {
      let (mut pages, [_, home, detail, _]) = nested();
      pages.set_alias(home, Some("Feed".into())).unwrap();
      assert_eq!(
        pages.path(detail).as_deref(),
        Some("/HomeFragment[feed]/DetailFragment")
      );
    }

    #[test]
    fn path_is_recomputed_after_mutation() {
      let (mut pages, [_, home, ..]) = nested();
      let before = pages.path(home);
      pages.set_tag(home, Some("profile".into())).unwrap();
      assert_ne!(pages.path(home), before);
      assert_eq!(
        pages.path(home).as_deref(),
        Some("/MainActivity/HomeFragment[profile]")
      );
    }

    #[test]
    fn unknown_page_has_no_path() {
      let pages = PageRegistry::new();
      assert_eq!(pages.path(PageId(1)), None);
    }
  }

  mod is_ignored {
    use super::*;

    #[test]
    fn own_policy_decides() {
      let (mut pages, [main, home, ..]) = nested();
      pages
        .set_ignore_policy(home, Some(IgnorePolicy::IgnoreSelf))
        .unwrap();
      assert!(pages.is_ignored(home));
      assert!(!pages.is_ignored(main));
    }

    #[test]
    fn ignore_self_does_not_reach_children() {
      let (mut pages, [_, home, detail, _]) = nested();
      pages
        .set_ignore_policy(home, Some(IgnorePolicy::IgnoreSelf))
        .unwrap();
      assert!(!pages.is_ignored(detail));
    }

    #[test]
    fn ignore_child_reaches_all_descendants() {
      let (mut pages, [main, home, detail, comments]) = nested();
      pages
        .set_ignore_policy(main, Some(IgnorePolicy::IgnoreChild))
        .unwrap();
      assert!(!pages.is_ignored(main));
      assert!(pages.is_ignored(home));
      assert!(pages.is_ignored(detail));
      assert!(pages.is_ignored(comments));
    }

    #[test]
    fn own_policy_beats_ancestors() {
      let (mut pages, [main, home, ..]) = nested();
      pages
        .set_ignore_policy(main, Some(IgnorePolicy::IgnoreAll))
        .unwrap();
      pages
        .set_ignore_policy(home, Some(IgnorePolicy::IgnoreChild))
        .unwrap();
      assert!(pages.is_ignored(main));
      assert!(!pages.is_ignored(home), "own non-self policy wins");
    }
  }

  mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
      #[test]
      fn path_never_exceeds_level_limit(depth in 1usize..10) {
        let mut pages = PageRegistry::new();
        let mut parent = None;
        let mut last = None;
        for level in 0..depth {
          let id = pages
            .mount(ElementId(level as u64), PageSpec::new(format!("P{level}")), parent)
            .unwrap();
          parent = Some(id);
          last = Some(id);
        }
        let path = pages.path(last.unwrap()).unwrap();
        let segments = path.split('/').filter(|s| !s.is_empty() && *s != "*").count();
        prop_assert_eq!(segments, depth.min(MAX_PAGE_LEVEL));
        prop_assert_eq!(path.starts_with("*/"), depth > MAX_PAGE_LEVEL);
      }
    }
  }
}
