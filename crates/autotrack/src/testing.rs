/*!
In-memory element tree for tests.

`FakeTree` is an arena of `Node`s; `FakeHandle` implements
`ElementHandle` over it. Nodes are described with chained builders:

```ignore
let mut tree = FakeTree::new();
let root = tree.window_root(Node::frame());
let list = tree.add(root, Node::recycler());
let row = tree.add(list, Node::linear().clickable());
tree.set_adapter_position(row, 12);
```
*/

#![allow(clippy::unwrap_used, clippy::indexing_slicing, missing_docs)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::platform::{
  CollectionState, ElementAttributes, ElementHandle, ExpandableLayout, MenuItem, Visibility,
};
use crate::types::{
  Bounds, ElementId, IgnorePolicy, Overrides, WindowParams, TYPE_BASE_APPLICATION,
};
use crate::widget::{InputType, WidgetState};

const VIEW: &str = "android.view.View";
const VIEW_GROUP: &str = "android.view.ViewGroup";

#[derive(Debug, Clone)]
pub struct Node {
  attributes: ElementAttributes,
  overrides: Overrides,
  window: Option<WindowParams>,
  collection: Option<CollectionState>,
  menu_item: Option<MenuItem>,
}

impl Node {
  pub fn new(chain: &[&str]) -> Self {
    Self {
      attributes: ElementAttributes {
        class_chain: chain.iter().map(|class| (*class).to_owned()).collect(),
        bounds: Bounds::new(0, 0, 100, 100),
        ..ElementAttributes::default()
      },
      overrides: Overrides::default(),
      window: None,
      collection: None,
      menu_item: None,
    }
  }

  pub fn frame() -> Self {
    Self::new(&["android.widget.FrameLayout", VIEW_GROUP, VIEW])
  }

  pub fn linear() -> Self {
    Self::new(&["android.widget.LinearLayout", VIEW_GROUP, VIEW])
  }

  pub fn image() -> Self {
    Self::new(&["android.widget.ImageView", VIEW])
  }

  pub fn text(text: &str) -> Self {
    let mut node = Self::new(&["android.widget.TextView", VIEW]);
    node.attributes.text = Some(text.to_owned());
    node
  }

  pub fn button(text: &str) -> Self {
    let mut node = Self::new(&["android.widget.Button", "android.widget.TextView", VIEW]);
    node.attributes.text = Some(text.to_owned());
    node.clickable()
  }

  pub fn edit(text: &str) -> Self {
    let mut node = Self::new(&["android.widget.EditText", "android.widget.TextView", VIEW]);
    node.attributes.text = Some(text.to_owned());
    node.attributes.state = WidgetState::Input {
      input_type: InputType::TEXT,
    };
    node
  }

  pub fn seek_bar(progress: i32) -> Self {
    let mut node = Self::new(&[
      "android.widget.SeekBar",
      "android.widget.AbsSeekBar",
      "android.widget.ProgressBar",
      VIEW,
    ]);
    node.attributes.state = WidgetState::Progress(progress);
    node
  }

  pub fn list_view(first_visible: i32) -> Self {
    let mut node = Self::new(&[
      "android.widget.ListView",
      "android.widget.AbsListView",
      "android.widget.AdapterView",
      VIEW_GROUP,
      VIEW,
    ]);
    node.collection = Some(CollectionState::Adapter { first_visible });
    node
  }

  pub fn recycler() -> Self {
    Self::new(&["androidx.recyclerview.widget.RecyclerView", VIEW_GROUP, VIEW])
  }

  pub fn expandable(layout: ExpandableLayout) -> Self {
    let mut node = Self::new(&[
      "android.widget.ExpandableListView",
      "android.widget.ListView",
      "android.widget.AbsListView",
      "android.widget.AdapterView",
      VIEW_GROUP,
      VIEW,
    ]);
    node.collection = Some(CollectionState::Expandable(layout));
    node
  }

  pub fn pager(current_item: i32) -> Self {
    let mut node = Self::new(&["androidx.viewpager.widget.ViewPager", VIEW_GROUP, VIEW]);
    node.collection = Some(CollectionState::Pager { current_item });
    node
  }

  pub fn swipe_refresh() -> Self {
    Self::new(&[
      "androidx.swiperefreshlayout.widget.SwipeRefreshLayout",
      VIEW_GROUP,
      VIEW,
    ])
  }

  pub fn web_view() -> Self {
    Self::new(&["android.webkit.WebView", "android.widget.AbsoluteLayout", VIEW_GROUP, VIEW])
  }

  pub fn menu_host() -> Self {
    let mut node = Self::new(&[
      "androidx.appcompat.view.menu.ExpandedMenuView",
      "android.widget.ListView",
      "android.widget.AdapterView",
      VIEW_GROUP,
      VIEW,
    ]);
    node.collection = Some(CollectionState::Adapter { first_visible: 0 });
    node
  }

  pub fn menu_item_view(resource_id: Option<&str>, title: &str) -> Self {
    let mut node = Self::new(&[
      "androidx.appcompat.view.menu.ListMenuItemView",
      "android.widget.LinearLayout",
      VIEW_GROUP,
      VIEW,
    ]);
    node.menu_item = Some(MenuItem {
      resource_id: resource_id.map(str::to_owned),
      title: Some(title.to_owned()),
    });
    node
  }

  pub fn window(mut self, window: WindowParams) -> Self {
    self.window = Some(window);
    self
  }

  pub fn bounds(mut self, bounds: Bounds) -> Self {
    self.attributes.bounds = bounds;
    self
  }

  pub fn description(mut self, description: &str) -> Self {
    self.attributes.description = Some(description.to_owned());
    self
  }

  pub fn gone(mut self) -> Self {
    self.attributes.visibility = Visibility::Gone;
    self
  }

  pub fn invisible(mut self) -> Self {
    self.attributes.visibility = Visibility::Invisible;
    self
  }

  pub fn clickable(mut self) -> Self {
    self.attributes.clickable = true;
    self.attributes.has_click_listeners = true;
    self
  }

  pub fn resource_id(mut self, id: &str) -> Self {
    self.attributes.resource_id = Some(id.to_owned());
    self
  }

  pub fn custom_id(mut self, id: &str) -> Self {
    self.overrides = self.overrides.with_custom_id(id);
    self
  }

  pub fn content(mut self, content: &str) -> Self {
    self.overrides = self.overrides.with_content(content);
    self
  }

  pub fn ignore(mut self, policy: IgnorePolicy) -> Self {
    self.overrides = self.overrides.with_ignore_policy(policy);
    self
  }

  pub fn track_text(mut self) -> Self {
    self.overrides = self.overrides.with_track_text(true);
    self
  }
}

#[derive(Debug)]
struct Entry {
  node: Node,
  parent: Option<usize>,
  children: Vec<usize>,
  /// Children the parent no longer lists (released rows).
  hidden: bool,
  adapter_positions: HashMap<usize, i32>,
}

#[derive(Debug, Default)]
struct Arena {
  entries: Vec<Entry>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeTree {
  arena: Rc<RefCell<Arena>>,
}

impl FakeTree {
  pub fn new() -> Self {
    Self::default()
  }

  fn insert(&mut self, node: Node, parent: Option<usize>) -> usize {
    let mut arena = self.arena.borrow_mut();
    let key = arena.entries.len();
    arena.entries.push(Entry {
      node,
      parent,
      children: Vec::new(),
      hidden: false,
      adapter_positions: HashMap::new(),
    });
    if let Some(parent) = parent {
      arena.entries[parent].children.push(key);
    }
    key
  }

  /// A window root. Defaults to a base application window whose identity
  /// is its key.
  pub fn window_root(&mut self, mut node: Node) -> usize {
    let key = self.arena.borrow().entries.len();
    if node.window.is_none() {
      node.window = Some(WindowParams::new(key as u64, Some(TYPE_BASE_APPLICATION)));
    }
    self.insert(node, None)
  }

  /// A parentless element with no window.
  pub fn detached(&mut self, node: Node) -> usize {
    self.insert(node, None)
  }

  pub fn add(&mut self, parent: usize, node: Node) -> usize {
    self.insert(node, Some(parent))
  }

  pub fn set_adapter_position(&mut self, child: usize, position: i32) {
    let mut arena = self.arena.borrow_mut();
    let parent = arena.entries[child].parent.unwrap();
    arena.entries[parent].adapter_positions.insert(child, position);
  }

  /// Keep the child's parent link but drop it from the parent's children.
  pub fn release(&mut self, child: usize) {
    self.arena.borrow_mut().entries[child].hidden = true;
  }

  pub fn update(&mut self, key: usize, f: impl FnOnce(&mut Node)) {
    f(&mut self.arena.borrow_mut().entries[key].node);
  }

  pub fn set_text(&mut self, key: usize, text: &str) {
    self.update(key, |node| node.attributes.text = Some(text.to_owned()));
  }

  pub fn id(key: usize) -> ElementId {
    ElementId(key as u64)
  }

  pub fn handle(&self, key: usize) -> FakeHandle {
    FakeHandle {
      arena: Rc::clone(&self.arena),
      key,
    }
  }
}

#[derive(Debug, Clone)]
pub struct FakeHandle {
  arena: Rc<RefCell<Arena>>,
  key: usize,
}

impl FakeHandle {
  fn with<R>(&self, f: impl FnOnce(&Entry) -> R) -> R {
    f(&self.arena.borrow().entries[self.key])
  }

  fn sibling(&self, key: usize) -> Self {
    Self {
      arena: Rc::clone(&self.arena),
      key,
    }
  }
}

impl ElementHandle for FakeHandle {
  fn id(&self) -> ElementId {
    FakeTree::id(self.key)
  }

  fn parent(&self) -> Option<Self> {
    self.with(|entry| entry.parent).map(|key| self.sibling(key))
  }

  fn children(&self) -> Vec<Self> {
    let arena = self.arena.borrow();
    arena.entries[self.key]
      .children
      .iter()
      .filter(|&&key| !arena.entries[key].hidden)
      .map(|&key| self.sibling(key))
      .collect()
  }

  fn attributes(&self) -> ElementAttributes {
    self.with(|entry| entry.node.attributes.clone())
  }

  fn overrides(&self) -> Overrides {
    self.with(|entry| entry.node.overrides.clone())
  }

  fn window(&self) -> Option<WindowParams> {
    self.with(|entry| entry.node.window)
  }

  fn collection(&self) -> Option<CollectionState> {
    self.with(|entry| entry.node.collection.clone())
  }

  fn child_adapter_position(&self, child: &Self) -> Option<i32> {
    self.with(|entry| entry.adapter_positions.get(&child.key).copied())
  }

  fn menu_item(&self) -> Option<MenuItem> {
    self.with(|entry| entry.node.menu_item.clone())
  }
}
