/*! Error types for autotrack operations. */

use super::{ElementId, PageId};

/// Errors that can occur during autotrack operations.
///
/// Path resolution itself never fails; it reports `Resolution::Unresolvable`
/// instead. These errors cover registry bookkeeping and the web bridge.
#[derive(Debug, thiserror::Error)]
pub enum AutotrackError {
  #[error("Page not found: {0}")]
  PageNotFound(PageId),

  #[error("Element {0} is already mounted as page {1}")]
  AlreadyMounted(ElementId, PageId),

  #[error("Element is ignored: {0}")]
  ElementIgnored(ElementId),

  #[error("Web bridge timed out for {surface} after {waited_ms}ms")]
  BridgeTimeout { surface: ElementId, waited_ms: u64 },

  #[error("Web bridge failed for {surface}: {reason}")]
  BridgeFailed { surface: ElementId, reason: String },

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Internal error: {0}")]
  Internal(String),
}

/// Result type for autotrack operations.
pub type AutotrackResult<T> = Result<T, AutotrackError>;
