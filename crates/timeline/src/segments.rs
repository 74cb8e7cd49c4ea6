//! Ordered set of kept intervals and the virtual/source time mapping.
//!
//! The intervals, read left to right, are exactly the parts of the source
//! that remain on the virtual timeline, back to back and in virtual order.
//! Invariants held by every `SegmentSet`:
//!
//! - sorted ascending by `start`
//! - no two intervals overlap (touching bounds are allowed)
//! - every interval has a strictly positive length

use kc_common::{TimeOffset, TimelineError, TimelineResult};

use crate::interval::Interval;

/// How one existing interval relates to a source range being deleted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Overlap {
    /// Untouched by the deletion.
    Disjoint,
    /// Deletion falls strictly inside: split in two.
    Inside,
    /// Deletion covers the tail: keep the head.
    Tail,
    /// Deletion covers the head: keep the tail.
    Head,
    /// Interval is wholly covered: drop it.
    Covered,
}

fn classify(interval: &Interval, source_start: TimeOffset, source_end: TimeOffset) -> Overlap {
    let (start, end) = (interval.start(), interval.end());
    if end <= source_start || start >= source_end {
        Overlap::Disjoint
    } else if start < source_start && end > source_end {
        Overlap::Inside
    } else if start < source_start {
        Overlap::Tail
    } else if end > source_end {
        Overlap::Head
    } else {
        Overlap::Covered
    }
}

/// Push `[start, end]` unless it would be empty.
fn push_piece(out: &mut Vec<Interval>, start: TimeOffset, end: TimeOffset) {
    if end > start {
        out.push(Interval::new(start, end));
    }
}

/// The kept portion of a source recording.
///
/// `Clone` is a deep copy; history snapshots never share storage with the
/// live set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SegmentSet {
    intervals: Vec<Interval>,
}

impl SegmentSet {
    /// An empty set (nothing kept).
    pub fn new() -> Self {
        Self::default()
    }

    /// A single interval spanning the whole source. A zero or negative
    /// duration yields an empty set.
    pub fn full(source_duration: TimeOffset) -> Self {
        let mut intervals = Vec::with_capacity(1);
        push_piece(&mut intervals, TimeOffset::ZERO, source_duration);
        Self { intervals }
    }

    /// Rebuild a set from persisted `(start, end)` pairs.
    ///
    /// Rejects negative starts, empty or reversed pairs, and pairs that are
    /// out of order or overlap their predecessor.
    pub fn from_pairs<I>(pairs: I) -> TimelineResult<Self>
    where
        I: IntoIterator<Item = (TimeOffset, TimeOffset)>,
    {
        let mut intervals: Vec<Interval> = Vec::new();
        for (index, (start, end)) in pairs.into_iter().enumerate() {
            if start.is_negative() {
                return Err(TimelineError::InvalidSegments {
                    reason: format!("segment {index} starts before zero ({start})"),
                });
            }
            if end <= start {
                return Err(TimelineError::InvalidSegments {
                    reason: format!("segment {index} has non-positive length ({start}..{end})"),
                });
            }
            if let Some(prev) = intervals.last() {
                if start < prev.end() {
                    return Err(TimelineError::InvalidSegments {
                        reason: format!(
                            "segment {index} ({start}..{end}) overlaps or precedes {prev}"
                        ),
                    });
                }
            }
            intervals.push(Interval::new(start, end));
        }
        Ok(Self { intervals })
    }

    /// The kept intervals in virtual order.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn first(&self) -> Option<&Interval> {
        self.intervals.first()
    }

    pub fn last(&self) -> Option<&Interval> {
        self.intervals.last()
    }

    /// Length of the virtual timeline: the sum of all interval lengths.
    pub fn total_duration(&self) -> TimeOffset {
        self.intervals.iter().map(Interval::length).sum()
    }

    /// Map a virtual time to the source.
    ///
    /// Each interval owns the half-open virtual range `[acc, acc + length)`.
    /// Times at or past the end clamp to the end of the last interval,
    /// negative times clamp to the start of the first. An empty set maps
    /// everything to zero.
    pub fn virtual_to_source(&self, virtual_time: TimeOffset) -> TimeOffset {
        let (Some(first), Some(last)) = (self.intervals.first(), self.intervals.last()) else {
            return TimeOffset::ZERO;
        };
        if virtual_time.is_negative() {
            return first.start();
        }

        let mut acc = TimeOffset::ZERO;
        for interval in &self.intervals {
            let next = acc + interval.length();
            if virtual_time < next {
                return interval.start() + (virtual_time - acc);
            }
            acc = next;
        }
        last.end()
    }

    /// Map a source time to the virtual timeline.
    ///
    /// Returns `None` when the time lies in a deleted region (or outside the
    /// source). Interval bounds are inclusive, so a time exactly on a kept
    /// boundary always maps.
    pub fn source_to_virtual(&self, source_time: TimeOffset) -> Option<TimeOffset> {
        let mut acc = TimeOffset::ZERO;
        for interval in &self.intervals {
            if interval.contains(source_time) {
                return Some(acc + (source_time - interval.start()));
            }
            acc = acc + interval.length();
        }
        None
    }

    /// The interval whose virtual range contains `virtual_time`.
    ///
    /// Ranges are half-open except that the very end of the virtual timeline
    /// resolves to the last interval.
    pub fn segment_at_virtual(&self, virtual_time: TimeOffset) -> Option<&Interval> {
        if virtual_time.is_negative() {
            return None;
        }
        let mut acc = TimeOffset::ZERO;
        for interval in &self.intervals {
            let next = acc + interval.length();
            if virtual_time < next {
                return Some(interval);
            }
            acc = next;
        }
        if virtual_time == acc {
            self.intervals.last()
        } else {
            None
        }
    }

    /// The interval containing `source_time` (inclusive bounds), if any.
    pub fn segment_at_source(&self, source_time: TimeOffset) -> Option<&Interval> {
        self.intervals.iter().find(|iv| iv.contains(source_time))
    }

    /// First interval that starts at or after `source_time`.
    pub fn next_segment_after(&self, source_time: TimeOffset) -> Option<&Interval> {
        self.intervals.iter().find(|iv| iv.start() >= source_time)
    }

    /// Virtual `(start, end)` of the interval at `index`.
    pub fn virtual_range_of(&self, index: usize) -> Option<(TimeOffset, TimeOffset)> {
        let interval = self.intervals.get(index)?;
        let start: TimeOffset = self.intervals[..index].iter().map(Interval::length).sum();
        Some((start, start + interval.length()))
    }

    /// Remove the virtual range `[virtual_start, virtual_end)`.
    ///
    /// Both bounds are mapped to the source, then every interval is judged on
    /// its own overlap with `[source_start, source_end)` and kept, split,
    /// trimmed, or dropped. Relative order is preserved and empty pieces are
    /// never emitted. On error the set is unchanged.
    pub fn delete(&mut self, virtual_start: TimeOffset, virtual_end: TimeOffset) -> TimelineResult<()> {
        let total = self.total_duration();
        if virtual_start.is_negative() || virtual_start >= virtual_end || virtual_end > total {
            return Err(TimelineError::InvalidRange {
                start: virtual_start,
                end: virtual_end,
                total,
            });
        }

        let source_start = self.virtual_to_source(virtual_start);
        let source_end = self.virtual_to_source(virtual_end);

        let mut kept = Vec::with_capacity(self.intervals.len() + 1);
        for interval in &self.intervals {
            match classify(interval, source_start, source_end) {
                Overlap::Disjoint => kept.push(*interval),
                Overlap::Inside => {
                    push_piece(&mut kept, interval.start(), source_start);
                    push_piece(&mut kept, source_end, interval.end());
                }
                Overlap::Tail => push_piece(&mut kept, interval.start(), source_start),
                Overlap::Head => push_piece(&mut kept, source_end, interval.end()),
                Overlap::Covered => {}
            }
        }

        tracing::debug!(
            %source_start,
            %source_end,
            before = self.intervals.len(),
            after = kept.len(),
            "Deleted source range"
        );

        self.intervals = kept;
        Ok(())
    }

    /// `(start, end)` pairs in virtual order, the shape used for persistence.
    pub fn to_pairs(&self) -> Vec<(TimeOffset, TimeOffset)> {
        self.intervals.iter().map(|iv| (iv.start(), iv.end())).collect()
    }
}

impl<'a> IntoIterator for &'a SegmentSet {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
