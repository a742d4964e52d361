/*!
Path builder.

Walks a chain downward from its boundary element, one `WalkNode` per
element. Each step derives the child's slot from the parent's container
kind, appends it, and carries the list index, list membership, override
flag, and clickable ancestor down.
*/

use super::encoding::{PathText, Slot, Step};
use super::expandable::ExpandableSlot;
use super::menu::{menu_item_node, menu_item_text};
use super::root::Boundary;
use super::ResolveConfig;
use crate::classify::{
  is_interactive, node_type, page_boundary, window_boundary, CapabilityRegistry, ContainerKind,
  Probe, Profile,
};
use crate::content::{extract_content, find_descendant_content};
use crate::page::PageRegistry;
use crate::platform::{CollectionState, ElementHandle, MenuItem};
use crate::types::{ElementNode, PageId, PathEncoding, ResolveMode};
use crate::widget::WidgetKind;

/// One element of a walk, with everything its children inherit.
#[derive(Debug, Clone)]
pub struct WalkNode<H> {
  pub element: H,
  pub profile: Profile,
  /// Container kind of the element's parent; `None` for parentless roots.
  parent_container: Option<ContainerKind>,
  pub text: PathText,
  pub index: i32,
  pub has_list_parent: bool,
  has_override_id: bool,
  clickable_path: Option<String>,
  clickable_outline: Option<String>,
  pub interactive: bool,
  /// Set once the walk reaches a menu item; deeper elements reuse its path.
  menu: Option<MenuItem>,
  pub page: Option<PageId>,
}

impl<H> WalkNode<H> {
  pub const fn is_menu_item(&self) -> bool {
    self.menu.is_some()
  }
}

/// Everything a walk reads besides the element tree.
#[derive(Debug, Clone, Copy)]
pub struct Walker<'a> {
  pub capabilities: &'a CapabilityRegistry,
  pub pages: &'a PageRegistry,
  pub config: ResolveConfig,
  pub foreground: Option<u64>,
  pub mode: ResolveMode,
}

impl Walker<'_> {
  const fn encoding(&self) -> PathEncoding {
    self.config.encoding
  }

  fn container_of<H: ElementHandle>(&self, element: &H) -> ContainerKind {
    self.capabilities.container_kind(&element.attributes().class_chain)
  }

  /// Menu item carried by an element, if it is a menu row.
  fn menu_item_of<H: ElementHandle>(element: &H, profile: &Profile) -> Option<MenuItem> {
    (profile.widget == WidgetKind::MenuItemView)
      .then(|| element.menu_item())
      .flatten()
  }

  fn page_ignored(&self, page: Option<PageId>) -> bool {
    page.is_some_and(|page| self.pages.is_ignored(page))
  }

  /// First node of a walk. `page` is the page enclosing the boundary.
  pub fn root<H: ElementHandle>(
    &self,
    element: H,
    boundary: &Boundary,
    page: Option<PageId>,
  ) -> WalkNode<H> {
    let profile = self.capabilities.profile(&element);
    let parent_container = element.parent().map(|parent| self.container_of(&parent));
    let menu = Self::menu_item_of(&element, &profile);

    let text = if let Some(item) = &menu {
      menu_item_text(item, self.encoding(), self.page_ignored(page))
    } else {
      match boundary {
        Boundary::Override(id) => PathText::at_override(self.encoding(), id),
        Boundary::Page(page) => PathText::at_boundary(
          self.encoding(),
          &page_boundary(self.pages, *page, self.mode),
          &profile.class_name,
        ),
        Boundary::WindowRoot | Boundary::Detached => PathText::at_boundary(
          self.encoding(),
          &window_boundary(
            element.window().as_ref(),
            self.foreground,
            &profile.class_name,
            self.config.os_api_level,
          ),
          &profile.class_name,
        ),
      }
    };
    log::debug!("root: {:?} boundary -> {}", boundary, text.structural());

    let interactive = is_interactive(&Probe::new(&profile, parent_container));
    WalkNode {
      element,
      profile,
      parent_container,
      text,
      index: -1,
      has_list_parent: false,
      has_override_id: matches!(boundary, Boundary::Override(_)),
      clickable_path: None,
      clickable_outline: None,
      interactive,
      menu,
      page,
    }
  }

  /// Append `child`, found at `raw_index` among the parent's children (-1
  /// when the parent no longer lists it).
  pub fn append<H: ElementHandle>(
    &self,
    parent: &WalkNode<H>,
    child: H,
    raw_index: i32,
  ) -> WalkNode<H> {
    let profile = self.capabilities.profile(&child);
    let overrides = child.overrides();
    let parent_container = parent.profile.container;

    let has_list_parent = parent.has_list_parent || profile.container.is_list();
    let mut index = if has_list_parent { parent.index } else { -1 };
    let (clickable_path, clickable_outline) = if parent.interactive {
      (
        Some(parent.text.structural().to_owned()),
        parent.text.positional_outline().map(str::to_owned),
      )
    } else {
      (parent.clickable_path.clone(), parent.clickable_outline.clone())
    };
    let mounted = self.pages.page_for_element(child.id()).map(|page| page.id);
    let page = mounted.or(parent.page);

    let mut text = parent.text.clone();
    let mut menu = None;

    if parent.menu.is_some() {
      menu.clone_from(&parent.menu);
      index = parent.index;
    } else if let Some(id) = overrides.custom_id() {
      text = PathText::at_override(self.encoding(), id);
    } else if let Some(item) = Self::menu_item_of(&child, &profile) {
      text = menu_item_text(&item, self.encoding(), self.page_ignored(page));
      index = -1;
      menu = Some(item);
    } else {
      let collection = parent.element.collection();
      let position = view_position(
        &parent.element,
        parent_container,
        collection.as_ref(),
        &child,
        raw_index,
      );
      let slot = match (parent_container, &collection) {
        (ContainerKind::ExpandableList, Some(CollectionState::Expandable(layout))) => {
          let slot = expandable_slot(layout.locate(position));
          let base = i32::from(self.encoding() == PathEncoding::Outline);
          match slot {
            Slot::Group(group) => index = group + base,
            Slot::Child { child, .. } => index = child + base,
            _ => {}
          }
          slot
        }
        (kind, _) if kind.is_list() => {
          index = position;
          Slot::Virtualized(position)
        }
        (ContainerKind::SwipeRefresh, _) => Slot::Sibling(0),
        _ => match same_class_position(&parent.element, &child, &profile) {
          Some(position) => Slot::Sibling(position),
          None => {
            log::debug!(
              "append: {} not among its parent's children, using raw index {raw_index}",
              child.id()
            );
            Slot::Sibling(raw_index)
          }
        },
      };

      let step = Step {
        class_name: &profile.class_name,
        slot,
        resource_id: profile.attributes.resource_id.as_deref(),
      };
      match mounted {
        Some(mounted) => {
          text.restart_at_page(&page_boundary(self.pages, mounted, self.mode), &step);
        }
        None => text.push(&step),
      }
    }

    let interactive = is_interactive(&Probe::new(&profile, Some(parent_container)));
    WalkNode {
      has_override_id: parent.has_override_id || overrides.custom_id().is_some(),
      element: child,
      profile,
      parent_container: Some(parent_container),
      text,
      index,
      has_list_parent,
      clickable_path,
      clickable_outline,
      interactive,
      menu,
      page,
    }
  }

  /// Append `child` at its current position under `parent`.
  pub fn append_found<H: ElementHandle>(&self, parent: &WalkNode<H>, child: H) -> WalkNode<H> {
    let raw_index = raw_index(&parent.element, &child);
    self.append(parent, child, raw_index)
  }

  /// Freeze a walk node into the reported form.
  pub fn finish<H: ElementHandle>(&self, node: &WalkNode<H>) -> ElementNode {
    let attributes = &node.profile.attributes;
    if let Some(item) = &node.menu {
      return menu_item_node(
        &node.text,
        item,
        node.page,
        Some(node.element.id()),
        attributes.bounds,
      );
    }

    let probe = Probe::new(&node.profile, node.parent_container);
    let node_type = node_type(&probe);
    let mut content = extract_content(&node.profile, &node.element.overrides());
    if content.is_empty() && node.parent_container.is_some_and(ContainerKind::is_list) {
      content = find_descendant_content(self.capabilities, &node.element);
    }

    ElementNode {
      element_id: Some(node.element.id()),
      structural_path: node.text.structural().to_owned(),
      positional_outline: node.text.positional_outline().map(str::to_owned),
      legacy_path: node.text.literal().map(str::to_owned),
      resolved_index: node.index,
      clickable_ancestor_path: node.clickable_path.clone(),
      clickable_ancestor_outline: node.clickable_outline.clone(),
      content,
      node_type,
      has_list_parent: node.has_list_parent,
      has_developer_override_id: node.has_override_id,
      enclosing_page: node.page,
      bounds: attributes.bounds,
    }
  }
}

fn expandable_slot(slot: ExpandableSlot) -> Slot {
  match slot {
    ExpandableSlot::Header(h) => Slot::Header(h),
    ExpandableSlot::Footer(f) => Slot::Footer(f),
    ExpandableSlot::Group(g) => Slot::Group(g),
    ExpandableSlot::Child { group, child } => Slot::Child { group, child },
  }
}

/// Index of `child` among the parent's current children, or -1.
pub fn raw_index<H: ElementHandle>(parent: &H, child: &H) -> i32 {
  let id = child.id();
  parent
    .children()
    .iter()
    .position(|sibling| sibling.id() == id)
    .and_then(|position| i32::try_from(position).ok())
    .unwrap_or(-1)
}

/// Position used for list slots: the adapter position where the container
/// knows it, else the raw index (offset by the first visible row for
/// adapter lists).
fn view_position<H: ElementHandle>(
  parent: &H,
  container: ContainerKind,
  collection: Option<&CollectionState>,
  child: &H,
  raw_index: i32,
) -> i32 {
  match (container, collection) {
    (ContainerKind::Pager, Some(CollectionState::Pager { current_item })) => *current_item,
    (
      ContainerKind::AdapterList | ContainerKind::ExpandableList | ContainerKind::MenuHost,
      Some(CollectionState::Adapter { first_visible }),
    ) => first_visible.saturating_add(raw_index),
    (ContainerKind::ExpandableList, Some(CollectionState::Expandable(layout))) => {
      layout.first_visible.saturating_add(raw_index)
    }
    (ContainerKind::RecyclerList, _) => match parent.child_adapter_position(child) {
      Some(position) if position >= 0 => position,
      _ => {
        log::debug!("view_position: no adapter position for {}, using raw index", child.id());
        raw_index
      }
    },
    (kind, _) if kind.is_list() => {
      log::debug!("view_position: {kind:?} without collection state, using raw index");
      raw_index
    }
    _ => raw_index,
  }
}

/// How many earlier siblings share the child's class name. `None` when the
/// parent does not list the child.
fn same_class_position<H: ElementHandle>(parent: &H, child: &H, profile: &Profile) -> Option<i32> {
  let id = child.id();
  let mut count = 0;
  for sibling in parent.children() {
    if sibling.id() == id {
      return Some(count);
    }
    if sibling.attributes().simple_class_name() == profile.class_name {
      count += 1;
    }
  }
  None
}
