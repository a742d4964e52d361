/*!
Window/page prefix classifier.

Decides the leading segments of a path from the boundary the root finder
stopped at: a logical page, or a window root classified by its
window-manager parameters.
*/

use crate::page::PageRegistry;
use crate::types::{
  PageId, ResolveMode, WindowParams, WindowPrefix, LAST_APPLICATION_WINDOW, LAST_SUB_WINDOW,
  TYPE_BASE_APPLICATION,
};

/// Decor class popups gained in later OS versions.
pub const POPUP_DECOR_VIEW: &str = "PopupDecorView";
/// First OS API level whose popups carry `PopupDecorView` themselves.
pub const POPUP_DECOR_API_LEVEL: u32 = 23;

/// Leading segments for one boundary, per encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryPrefix {
  /// Legacy encoding prefix (tagged page names).
  pub legacy: String,
  /// Outline encoding structural prefix (names only).
  pub structural: String,
  /// Outline encoding positional prefix.
  pub outline: String,
  /// The boundary element's own legacy segment carries `[0]`.
  pub index_root: bool,
}

impl BoundaryPrefix {
  fn uniform(prefix: &str) -> Self {
    Self {
      legacy: prefix.to_owned(),
      structural: prefix.to_owned(),
      outline: "/0".to_owned(),
      index_root: false,
    }
  }
}

/// Classify a window root. `foreground` is the identity of the window
/// currently in front; matching it always means the main window.
pub fn window_prefix(window: Option<&WindowParams>, foreground: Option<u64>) -> WindowPrefix {
  let Some(window) = window else {
    return WindowPrefix::CustomWindow;
  };
  if foreground == Some(window.identity) {
    return WindowPrefix::MainWindow;
  }
  match window.layout_type {
    Some(TYPE_BASE_APPLICATION) => WindowPrefix::MainWindow,
    Some(kind) if kind < LAST_APPLICATION_WINDOW => WindowPrefix::DialogWindow,
    Some(kind) if kind < LAST_SUB_WINDOW => WindowPrefix::PopupWindow,
    Some(_) | None => WindowPrefix::CustomWindow,
  }
}

/// Older popups lack a decor layer; a synthetic one keeps their paths equal
/// to those produced on newer OS versions.
pub fn needs_popup_decor(prefix: WindowPrefix, root_class: &str, os_api_level: u32) -> bool {
  os_api_level < POPUP_DECOR_API_LEVEL
    && prefix == WindowPrefix::PopupWindow
    && root_class != POPUP_DECOR_VIEW
}

/// Prefix for a window-root boundary.
pub fn window_boundary(
  window: Option<&WindowParams>,
  foreground: Option<u64>,
  root_class: &str,
  os_api_level: u32,
) -> BoundaryPrefix {
  let prefix = window_prefix(window, foreground);
  if needs_popup_decor(prefix, root_class, os_api_level) {
    log::debug!("window_boundary: inserting {POPUP_DECOR_VIEW} for {root_class}");
    let with_decor = format!("{prefix}/{POPUP_DECOR_VIEW}");
    return BoundaryPrefix {
      legacy: with_decor.clone(),
      structural: with_decor,
      outline: "/0/0".to_owned(),
      index_root: true,
    };
  }
  BoundaryPrefix::uniform(prefix.as_str())
}

/// Prefix for a page boundary.
///
/// In pick mode a non-ignored page collapses to `/Page`, so every instance
/// of the same screen shape yields one path. Otherwise the page's own path
/// (its ancestors plus its name and tag) leads.
pub fn page_boundary(pages: &PageRegistry, page: PageId, mode: ResolveMode) -> BoundaryPrefix {
  if mode == ResolveMode::Pick && !pages.is_ignored(page) {
    return BoundaryPrefix::uniform(WindowPrefix::Page.as_str());
  }
  BoundaryPrefix {
    legacy: pages.path(page).unwrap_or_default(),
    structural: pages.structural_path(page).unwrap_or_default(),
    outline: pages.x_index(page).unwrap_or_default(),
    index_root: false,
  }
}
