/*!
Widget kinds.

A kind describes what an element *is*, resolved once per element from its
class chain by the capability registry (see `classify::capabilities`).
The predicates below encode the widget family tree, so callers never test
class names directly.
*/

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// What an element is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub enum WidgetKind {
  // === Text family ===
  TextView,
  EditText,
  Button,
  /// Two-state buttons: checkboxes, switches, radio buttons, toggles.
  CompoundButton,
  /// Material button; only interactive on its own when checkable.
  MaterialButton,
  RadioButton,

  // === Numeric ===
  ProgressBar,
  /// Seek bars and other draggable progress bars.
  SeekBar,
  RatingBar,
  Slider,
  RangeSlider,

  // === Selection ===
  Spinner,
  RadioGroup,
  TabView,

  // === Embedded content ===
  WebView,

  // === Menus ===
  /// A list menu row that wraps one menu item.
  MenuItemView,

  /// Anything the registry does not know.
  #[default]
  Generic,
}

impl WidgetKind {
  /// Text-bearing widgets (the label family and everything derived from it).
  pub const fn is_text_family(self) -> bool {
    matches!(
      self,
      Self::TextView
        | Self::EditText
        | Self::Button
        | Self::CompoundButton
        | Self::MaterialButton
        | Self::RadioButton
    )
  }

  /// Buttons and everything derived from them.
  pub const fn is_button_family(self) -> bool {
    matches!(
      self,
      Self::Button | Self::CompoundButton | Self::MaterialButton | Self::RadioButton
    )
  }

  /// Two-state controls rendered as `label[state]`.
  pub const fn is_toggle(self) -> bool {
    matches!(self, Self::CompoundButton | Self::RadioButton)
  }

  /// Progress bars, seek bars and rating bars.
  pub const fn is_progress_family(self) -> bool {
    matches!(self, Self::ProgressBar | Self::SeekBar | Self::RatingBar)
  }

  /// Draggable progress bars (seek and rating).
  pub const fn is_seek_family(self) -> bool {
    matches!(self, Self::SeekBar | Self::RatingBar)
  }

  pub const fn is_slider(self) -> bool {
    matches!(self, Self::Slider | Self::RangeSlider)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn buttons_are_text_family() {
    for kind in [
      WidgetKind::Button,
      WidgetKind::CompoundButton,
      WidgetKind::MaterialButton,
      WidgetKind::RadioButton,
    ] {
      assert!(kind.is_button_family(), "{kind:?} should be a button");
      assert!(kind.is_text_family(), "{kind:?} should be text family");
    }
  }

  #[test]
  fn plain_text_is_not_a_button() {
    assert!(WidgetKind::TextView.is_text_family());
    assert!(!WidgetKind::TextView.is_button_family());
    assert!(!WidgetKind::EditText.is_button_family());
  }

  #[test]
  fn rating_is_seek_and_progress() {
    assert!(WidgetKind::RatingBar.is_seek_family());
    assert!(WidgetKind::RatingBar.is_progress_family());
    assert!(!WidgetKind::ProgressBar.is_seek_family());
  }

  #[test]
  fn default_is_generic() {
    assert_eq!(WidgetKind::default(), WidgetKind::Generic);
  }
}
