/*!
Content extraction.

Derives a short label for an element. First non-empty source wins:

1. the developer content override,
2. a kind-specific label (toggle state, text, numeric value, selection),
3. the accessibility description.

Labels are cut to `MAX_CONTENT_LENGTH` characters and never absent: no
label at all is the empty string.
*/

use std::cmp::Reverse;
use std::collections::VecDeque;

use crate::classify::{CapabilityRegistry, Profile};
use crate::platform::ElementHandle;
use crate::types::Overrides;
use crate::visibility::is_self_visible;
use crate::widget::{WidgetKind, WidgetState};

/// Longest label reported, in characters.
pub const MAX_CONTENT_LENGTH: usize = 100;

/// Cut to `MAX_CONTENT_LENGTH` characters; absent becomes empty.
pub fn truncate_content(value: Option<&str>) -> String {
  value
    .map(|value| value.chars().take(MAX_CONTENT_LENGTH).collect())
    .unwrap_or_default()
}

/// Label for one element.
pub fn extract_content(profile: &Profile, overrides: &Overrides) -> String {
  if let Some(content) = overrides.content.as_deref().filter(|c| !c.is_empty()) {
    return truncate_content(Some(content));
  }
  let label = widget_content(profile, overrides)
    .filter(|label| !label.is_empty())
    .or_else(|| profile.attributes.description.clone());
  truncate_content(label.as_deref())
}

/// Kind-specific label. `None` when the kind has nothing to say.
fn widget_content(profile: &Profile, overrides: &Overrides) -> Option<String> {
  let attributes = &profile.attributes;
  let text = attributes.text.as_deref().unwrap_or_default();
  match profile.widget {
    WidgetKind::EditText => {
      let password = match &attributes.state {
        WidgetState::Input { input_type } => input_type.is_password(),
        _ => false,
      };
      (overrides.track_text && !password).then(|| text.to_owned())
    }
    WidgetKind::CompoundButton | WidgetKind::RadioButton => match attributes.state {
      WidgetState::Checked(checked) if text.is_empty() => Some(checked.to_string()),
      WidgetState::Checked(checked) => Some(format!("{text}[{checked}]")),
      _ => attributes.text.clone(),
    },
    WidgetKind::RatingBar
    | WidgetKind::SeekBar
    | WidgetKind::ProgressBar
    | WidgetKind::Slider
    | WidgetKind::RangeSlider
    | WidgetKind::Spinner
    | WidgetKind::RadioGroup
    | WidgetKind::TabView => attributes.state.render(),
    WidgetKind::TextView | WidgetKind::Button | WidgetKind::MaterialButton => {
      attributes.text.clone()
    }
    WidgetKind::WebView | WidgetKind::MenuItemView | WidgetKind::Generic => None,
  }
}

/// Label for an element or, failing that, its nearest labelled descendant.
///
/// Breadth-first; at each level children are tried visible before
/// invisible, text before non-text, then larger before smaller.
pub fn find_descendant_content<H: ElementHandle>(
  registry: &CapabilityRegistry,
  element: &H,
) -> String {
  let mut queue = VecDeque::from([element.clone()]);
  while let Some(current) = queue.pop_front() {
    let profile = registry.profile(&current);
    let content = extract_content(&profile, &current.overrides());
    if !content.is_empty() {
      return content;
    }

    let mut children: Vec<(H, Profile)> = current
      .children()
      .into_iter()
      .map(|child| {
        let profile = registry.profile(&child);
        (child, profile)
      })
      .collect();
    children.sort_by_key(|(_, profile)| {
      let mut score = 0;
      if is_self_visible(&profile.attributes, false) {
        score += 100;
      }
      if profile.widget.is_text_family() {
        score += 10;
      }
      (Reverse(score), Reverse(profile.attributes.bounds.area()))
    });
    queue.extend(children.into_iter().map(|(child, _)| child));
  }
  String::new()
}
