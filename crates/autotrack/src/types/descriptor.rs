/*!
Serialized descriptors for the remote inspection tool.

Key names follow the inspector's wire contract, so they stay camelCase
with a few historical spellings (`xpath`, `parentXPath`, `zLevel`).
*/

use super::NodeType;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One interactive element on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ViewElementDescriptor {
  pub xpath: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub xindex: Option<String>,
  #[serde(rename = "parentXPath", default, skip_serializing_if = "Option::is_none")]
  pub parent_xpath: Option<String>,
  #[serde(rename = "parentXIndex", default, skip_serializing_if = "Option::is_none")]
  pub parent_xindex: Option<String>,
  pub left: i32,
  pub top: i32,
  pub width: i32,
  pub height: i32,
  #[serde(rename = "nodeType")]
  pub node_type: NodeType,
  #[serde(default)]
  pub content: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub page: Option<String>,
  /// Emission order; later elements draw above earlier ones.
  #[serde(rename = "zLevel")]
  pub z_level: usize,
  /// Omitted when the element is not list-contained.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub index: Option<i32>,
  /// DOM snapshot from the web bridge, when it answered in time.
  #[serde(rename = "webView", default, skip_serializing_if = "Option::is_none")]
  #[ts(type = "unknown")]
  pub web_view: Option<serde_json::Value>,
}

/// One page visible on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PageElementDescriptor {
  pub path: String,
  pub title: Option<String>,
  pub left: i32,
  pub top: i32,
  pub width: i32,
  pub height: i32,
  #[serde(rename = "isIgnored")]
  pub is_ignored: bool,
}

/// Result of a full-screen snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreenSnapshot {
  pub pages: Vec<PageElementDescriptor>,
  pub views: Vec<ViewElementDescriptor>,
}

impl ScreenSnapshot {
  /// Accept a view descriptor produced outside this engine (embedded
  /// cross-platform renderers). Malformed input is logged and dropped.
  pub fn push_foreign_view(&mut self, value: serde_json::Value) -> bool {
    match serde_json::from_value::<ViewElementDescriptor>(value) {
      Ok(mut view) => {
        if view.index.is_some_and(|index| index < 0) {
          view.index = None;
        }
        self.views.push(view);
        true
      }
      Err(e) => {
        log::warn!("push_foreign_view: dropping malformed descriptor: {e}");
        false
      }
    }
  }

  /// Accept a page descriptor produced outside this engine.
  pub fn push_foreign_page(&mut self, value: serde_json::Value) -> bool {
    match serde_json::from_value::<PageElementDescriptor>(value) {
      Ok(page) => {
        self.pages.push(page);
        true
      }
      Err(e) => {
        log::warn!("push_foreign_page: dropping malformed descriptor: {e}");
        false
      }
    }
  }
}
