/*! Geometry types for screen coordinates (device pixels). */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rectangle in screen coordinates: top-left corner plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bounds {
  pub left: i32,
  pub top: i32,
  pub width: i32,
  pub height: i32,
}

impl Bounds {
  pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
    Self {
      left,
      top,
      width,
      height,
    }
  }

  /// Zero or negative width/height.
  pub const fn is_empty(&self) -> bool {
    self.width <= 0 || self.height <= 0
  }

  /// Area in pixels, zero for empty bounds. Widened to avoid overflow.
  pub fn area(&self) -> i64 {
    if self.is_empty() {
      return 0;
    }
    i64::from(self.width) * i64::from(self.height)
  }
}
