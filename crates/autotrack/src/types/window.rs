/*! Window parameters and the root prefixes derived from them. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Layout type of the base application window.
pub const TYPE_BASE_APPLICATION: i32 = 1;
/// Last type in the application window range (dialogs live below it).
pub const LAST_APPLICATION_WINDOW: i32 = 99;
/// Last type in the sub-window range (popups live below it).
pub const LAST_SUB_WINDOW: i32 = 1999;

/// Window-manager parameters exposed by a window root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WindowParams {
  /// Identity hash of the root, compared against the foreground window.
  pub identity: u64,
  /// Window-manager layout type. `None` when the root carries plain
  /// (non window-manager) layout parameters.
  pub layout_type: Option<i32>,
}

impl WindowParams {
  pub const fn new(identity: u64, layout_type: Option<i32>) -> Self {
    Self {
      identity,
      layout_type,
    }
  }
}

/// Root prefix of a resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum WindowPrefix {
  Page,
  IgnorePage,
  MainWindow,
  DialogWindow,
  PopupWindow,
  CustomWindow,
}

impl WindowPrefix {
  /// The leading path segment, including its slash.
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Page => "/Page",
      Self::IgnorePage => "/IgnorePage",
      Self::MainWindow => "/MainWindow",
      Self::DialogWindow => "/DialogWindow",
      Self::PopupWindow => "/PopupWindow",
      Self::CustomWindow => "/CustomWindow",
    }
  }
}

impl std::fmt::Display for WindowPrefix {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
