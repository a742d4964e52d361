/*!
Widget state.

The live value an element exposes, interpreted through its `WidgetKind`:
checked state for toggles, progress for bars, selection for pickers.
*/

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use ts_rs::TS;

const TYPE_MASK_CLASS: u32 = 0x0000_000f;
const TYPE_MASK_VARIATION: u32 = 0x0000_0ff0;
const TYPE_CLASS_TEXT: u32 = 0x0000_0001;
const TYPE_CLASS_NUMBER: u32 = 0x0000_0002;
const TYPE_TEXT_VARIATION_PASSWORD: u32 = 0x0000_0080;
const TYPE_TEXT_VARIATION_VISIBLE_PASSWORD: u32 = 0x0000_0090;
const TYPE_TEXT_VARIATION_WEB_PASSWORD: u32 = 0x0000_00e0;
const TYPE_NUMBER_VARIATION_PASSWORD: u32 = 0x0000_0010;

/// Input type bit field of a text input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InputType(pub u32);

impl InputType {
  pub const TEXT: Self = Self(TYPE_CLASS_TEXT);
  pub const TEXT_PASSWORD: Self = Self(TYPE_CLASS_TEXT | TYPE_TEXT_VARIATION_PASSWORD);
  pub const NUMBER_PASSWORD: Self = Self(TYPE_CLASS_NUMBER | TYPE_NUMBER_VARIATION_PASSWORD);

  /// Any password variation, text or numeric.
  pub const fn is_password(self) -> bool {
    let variation = self.0 & (TYPE_MASK_CLASS | TYPE_MASK_VARIATION);
    variation == TYPE_CLASS_TEXT | TYPE_TEXT_VARIATION_PASSWORD
      || variation == TYPE_CLASS_TEXT | TYPE_TEXT_VARIATION_WEB_PASSWORD
      || variation == TYPE_CLASS_NUMBER | TYPE_NUMBER_VARIATION_PASSWORD
      || variation == TYPE_CLASS_TEXT | TYPE_TEXT_VARIATION_VISIBLE_PASSWORD
  }
}

/// Current value of a widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value")]
#[ts(export)]
pub enum WidgetState {
  #[default]
  None,
  /// Toggle state.
  Checked(bool),
  /// Integer progress of progress and seek bars.
  Progress(i32),
  /// Star rating.
  Rating(f32),
  /// Slider value.
  Slider(f32),
  /// Range slider thumbs, in order.
  Range(Vec<f32>),
  /// Label of the selected option (dropdowns, radio groups). `None` when
  /// nothing is selected or the selection has no text.
  Selected(Option<String>),
  /// Tab text.
  Tab(Option<String>),
  /// Text input state.
  Input { input_type: InputType },
}

impl WidgetState {
  /// Render as a content label. `None` when the state carries no label.
  pub fn render(&self) -> Option<String> {
    match self {
      Self::None | Self::Input { .. } => None,
      Self::Checked(checked) => Some(checked.to_string()),
      Self::Progress(progress) => Some(progress.to_string()),
      Self::Rating(value) | Self::Slider(value) => Some(float_label(*value)),
      Self::Range(values) => match values.as_slice() {
        [low, high] => Some(format!("{}-{}", float_label(*low), float_label(*high))),
        _ => None,
      },
      Self::Selected(label) | Self::Tab(label) => label.clone(),
    }
  }
}

/// Float label with at least one fractional digit: `10.0`, `0.5`.
fn float_label(value: f32) -> String {
  if value.is_finite() && value.fract().abs() < f32::EPSILON {
    format!("{value:.1}")
  } else {
    value.to_string()
  }
}
