/*! Per-element developer overrides. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Developer ignore policy attached to an element or a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum IgnorePolicy {
  /// Ignore the decorated element only.
  IgnoreSelf,
  /// Ignore the decorated element and everything beneath it.
  IgnoreAll,
  /// Ignore everything beneath the decorated element, but not the element.
  IgnoreChild,
}

impl IgnorePolicy {
  /// Whether the decorated element itself is ignored.
  pub const fn ignores_self(self) -> bool {
    matches!(self, Self::IgnoreSelf | Self::IgnoreAll)
  }

  /// Whether descendants of the decorated element are ignored.
  pub const fn ignores_descendants(self) -> bool {
    matches!(self, Self::IgnoreAll | Self::IgnoreChild)
  }
}

/// Small per-element override store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Overrides {
  /// Developer-assigned identifier. Truncates the path to `/custom_id`.
  pub custom_id: Option<String>,
  /// Developer-assigned content label; beats every extracted label.
  pub content: Option<String>,
  pub ignore_policy: Option<IgnorePolicy>,
  /// Text inputs only report their text when this is set.
  pub track_text: bool,
}

impl Overrides {
  pub fn with_custom_id(mut self, id: impl Into<String>) -> Self {
    self.custom_id = Some(id.into());
    self
  }

  pub fn with_content(mut self, content: impl Into<String>) -> Self {
    self.content = Some(content.into());
    self
  }

  pub const fn with_ignore_policy(mut self, policy: IgnorePolicy) -> Self {
    self.ignore_policy = Some(policy);
    self
  }

  pub const fn with_track_text(mut self, track: bool) -> Self {
    self.track_text = track;
    self
  }

  /// Custom id, treating an empty string as unset.
  pub fn custom_id(&self) -> Option<&str> {
    self.custom_id.as_deref().filter(|id| !id.is_empty())
  }
}
