/*! Events broadcast to subscribers of an `Autotracker`. */

use serde::Serialize;
use ts_rs::TS;

use crate::types::{ElementNode, NodeType};

/// Payload shared by click and change events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ViewElementEvent {
  /// Path of the enclosing page. `None` when no page encloses the element.
  pub page_path: Option<String>,
  pub xpath: String,
  pub xindex: Option<String>,
  /// Position inside the nearest list, omitted outside lists.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub index: Option<i32>,
  pub text_value: String,
  pub node_type: NodeType,
}

impl ViewElementEvent {
  pub(crate) fn from_node(node: &ElementNode, page_path: Option<String>) -> Self {
    Self {
      page_path,
      xpath: node.xpath().to_owned(),
      xindex: node.xindex().map(str::to_owned),
      index: (node.resolved_index > -1).then_some(node.resolved_index),
      text_value: node.content.clone(),
      node_type: node.node_type,
    }
  }
}

/// Events emitted when the user interacts with the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "event", content = "data")]
#[ts(export)]
pub enum Event {
  /// An element or menu item was clicked.
  #[serde(rename = "view:click")]
  ViewClick(ViewElementEvent),
  /// An input's value changed.
  #[serde(rename = "view:change")]
  ViewChange(ViewElementEvent),
}

impl Event {
  pub const fn payload(&self) -> &ViewElementEvent {
    match self {
      Self::ViewClick(event) | Self::ViewChange(event) => event,
    }
  }
}
