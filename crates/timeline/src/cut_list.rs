//! Persisted shape of an edit: the source duration plus the ordered kept
//! `(start, end)` pairs. Encoding only; reading and writing files belongs to
//! the caller.

use kc_common::{TimeOffset, TimelineError, TimelineResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::segments::SegmentSet;

/// Kept segments of one source recording, as saved in a project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutList {
    /// Duration of the unedited source.
    pub source_duration: TimeOffset,
    /// Kept source ranges in virtual order.
    pub segments: Vec<(TimeOffset, TimeOffset)>,
}

impl CutList {
    pub fn new(source_duration: TimeOffset, segments: &SegmentSet) -> Self {
        Self {
            source_duration,
            segments: segments.to_pairs(),
        }
    }

    /// Validate and rebuild the segment set.
    ///
    /// On top of the segment-set invariants, every segment must end within
    /// the recorded source duration.
    pub fn to_segment_set(&self) -> TimelineResult<SegmentSet> {
        if self.source_duration.is_negative() {
            return Err(TimelineError::InvalidSegments {
                reason: format!("negative source duration ({})", self.source_duration),
            });
        }
        if let Some(&(_, end)) = self.segments.last() {
            if end > self.source_duration {
                return Err(TimelineError::InvalidSegments {
                    reason: format!(
                        "segment ends at {end}, past source duration {}",
                        self.source_duration
                    ),
                });
            }
        }
        SegmentSet::from_pairs(self.segments.iter().copied())
    }
}

/// Serialize a cut list to pretty-printed JSON.
pub fn to_json_string(cut_list: &CutList) -> TimelineResult<String> {
    let json = serde_json::to_string_pretty(cut_list)?;
    debug!(
        segments = cut_list.segments.len(),
        bytes = json.len(),
        "Serialized cut list"
    );
    Ok(json)
}

/// Deserialize and validate a cut list.
pub fn from_json_string(json: &str) -> TimelineResult<CutList> {
    let cut_list: CutList = serde_json::from_str(json)?;
    if let Err(err) = cut_list.to_segment_set() {
        warn!(error = %err, "Rejected cut list");
        return Err(err);
    }
    debug!(segments = cut_list.segments.len(), "Deserialized cut list");
    Ok(cut_list)
}
