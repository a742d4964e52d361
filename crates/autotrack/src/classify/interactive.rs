/*!
Interactive predicate table.

An element is independently interactive ("circlable") when any rule in
`INTERACTIVE_RULES` fires. Rules are plain functions over the element's
profile and its parent's container kind, so adding a widget family means
adding a row, not another subclass check.
*/

use super::{ContainerKind, Profile};
use crate::types::NodeType;
use crate::widget::WidgetKind;

/// What a rule sees: one element plus its parent's container kind.
#[derive(Debug, Clone, Copy)]
pub struct Probe<'a> {
  pub profile: &'a Profile,
  /// `None` for roots and detached elements.
  pub parent: Option<ContainerKind>,
}

impl<'a> Probe<'a> {
  pub const fn new(profile: &'a Profile, parent: Option<ContainerKind>) -> Self {
    Self { profile, parent }
  }

  fn parent_is_list(&self) -> bool {
    self.parent.is_some_and(ContainerKind::is_list)
  }
}

type Rule = fn(&Probe<'_>) -> bool;

const INTERACTIVE_RULES: &[(&str, Rule)] = &[
  ("web_view", |p| p.profile.widget == WidgetKind::WebView),
  ("change", is_change_type),
  ("click", is_click_type),
  ("list_row", |p| p.parent_is_list()),
  ("menu_row", |p| p.profile.widget == WidgetKind::MenuItemView),
];

/// Elements that report value changes: text inputs, seek and rating bars,
/// enabled sliders.
pub fn is_change_type(probe: &Probe<'_>) -> bool {
  let widget = probe.profile.widget;
  widget == WidgetKind::EditText
    || widget.is_seek_family()
    || (widget.is_slider() && probe.profile.attributes.enabled)
}

/// Elements that report clicks on their own.
pub fn is_click_type(probe: &Probe<'_>) -> bool {
  let attributes = &probe.profile.attributes;
  match probe.profile.widget {
    WidgetKind::CompoundButton | WidgetKind::RadioButton => true,
    WidgetKind::MaterialButton if attributes.checkable => true,
    WidgetKind::TabView if attributes.enabled && attributes.clickable => true,
    _ => attributes.clickable && attributes.has_click_listeners,
  }
}

/// Name of the first rule that makes the element interactive.
pub fn interactive_rule(probe: &Probe<'_>) -> Option<&'static str> {
  INTERACTIVE_RULES
    .iter()
    .find(|(_, rule)| rule(probe))
    .map(|(name, _)| *name)
}

pub fn is_interactive(probe: &Probe<'_>) -> bool {
  interactive_rule(probe).is_some()
}

/// Coarse node category.
pub fn node_type(probe: &Probe<'_>) -> NodeType {
  let widget = probe.profile.widget;
  if is_change_type(probe) {
    NodeType::Input
  } else if widget.is_text_family() && !widget.is_button_family() {
    NodeType::Text
  } else if probe.parent_is_list() {
    NodeType::List
  } else if widget == WidgetKind::WebView {
    NodeType::WebView
  } else {
    NodeType::Button
  }
}
