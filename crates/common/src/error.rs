//! Central error types for the editing core (thiserror-based).

use thiserror::Error;

use crate::types::TimeOffset;

/// Errors surfaced by timeline editing operations.
///
/// All of these are deterministic input-validation failures. A failed call
/// leaves the segment set and the edit history untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// Deletion range is empty, reversed, negative, or past the end of the
    /// virtual timeline.
    #[error("Invalid range {start}..{end} (virtual duration {total})")]
    InvalidRange {
        start: TimeOffset,
        end: TimeOffset,
        total: TimeOffset,
    },

    /// A persisted interval list failed validation on load.
    #[error("Invalid segment list: {reason}")]
    InvalidSegments { reason: String },

    /// Cut list could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for TimelineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Convenience Result type for timeline operations.
pub type TimelineResult<T> = Result<T, TimelineError>;
