//! A single contiguous kept range of the source timeline.

use kc_common::TimeOffset;
use std::fmt;

/// Kept range `[start, end]` measured on the source timeline.
///
/// Immutable once built. Splits and trims produce new intervals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    start: TimeOffset,
    end: TimeOffset,
}

impl Interval {
    /// Create an interval. Panics if `start > end`.
    pub fn new(start: TimeOffset, end: TimeOffset) -> Self {
        assert!(
            start <= end,
            "Interval start ({start}) must not be after end ({end})"
        );
        Self { start, end }
    }

    pub fn start(&self) -> TimeOffset {
        self.start
    }

    pub fn end(&self) -> TimeOffset {
        self.end
    }

    /// Length of the range. Never negative.
    pub fn length(&self) -> TimeOffset {
        self.end - self.start
    }

    /// Inclusive membership test: `start <= t <= end`.
    pub fn contains(&self, t: TimeOffset) -> bool {
        self.start <= t && t <= self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
