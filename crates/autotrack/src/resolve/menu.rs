/*!
Menu item paths.

Overflow and context menu rows do not get positional paths: every item
resolves to one fixed class path disambiguated by the item's resource id.
*/

use super::encoding::{LegacyPath, OutlinePath, PathText};
use crate::content::truncate_content;
use crate::page::PageRegistry;
use crate::platform::MenuItem;
use crate::types::{Bounds, ElementId, ElementNode, NodeType, PageId, PathEncoding, WindowPrefix};

const MENU_ITEM_PATH: &str = "/MenuView/MenuItem";

/// Path strings for a menu item under a page that is (or is not) ignored.
pub fn menu_item_text(item: &MenuItem, encoding: PathEncoding, page_ignored: bool) -> PathText {
  let id = item.resource_id.as_deref().filter(|id| !id.is_empty());
  match encoding {
    PathEncoding::Legacy => {
      let prefix = if page_ignored {
        WindowPrefix::IgnorePage
      } else {
        WindowPrefix::Page
      };
      let path = match id {
        Some(id) => format!("{prefix}{MENU_ITEM_PATH}#{id}"),
        None => format!("{prefix}{MENU_ITEM_PATH}"),
      };
      PathText::Legacy(LegacyPath {
        pattern: path.clone(),
        literal: path,
      })
    }
    PathEncoding::Outline => {
      let outline = format!("/0/{}", id.unwrap_or("0"));
      PathText::Outline(OutlinePath {
        structural: MENU_ITEM_PATH.to_owned(),
        exact: outline.clone(),
        outline,
      })
    }
  }
}

/// Resolve a menu item reported without an element (menu callbacks hand
/// over the item, not the row).
pub fn resolve_menu_item(
  item: &MenuItem,
  page: Option<PageId>,
  pages: &PageRegistry,
  encoding: PathEncoding,
) -> ElementNode {
  let page_ignored = page.is_some_and(|page| pages.is_ignored(page));
  let text = menu_item_text(item, encoding, page_ignored);
  menu_item_node(&text, item, page, None, Bounds::default())
}

pub(super) fn menu_item_node(
  text: &PathText,
  item: &MenuItem,
  page: Option<PageId>,
  element_id: Option<ElementId>,
  bounds: Bounds,
) -> ElementNode {
  ElementNode {
    element_id,
    structural_path: text.structural().to_owned(),
    positional_outline: text.positional_outline().map(str::to_owned),
    legacy_path: text.literal().map(str::to_owned),
    resolved_index: -1,
    clickable_ancestor_path: None,
    clickable_ancestor_outline: None,
    content: truncate_content(item.title.as_deref()),
    node_type: NodeType::MenuItem,
    has_list_parent: false,
    has_developer_override_id: false,
    enclosing_page: page,
    bounds,
  }
}
