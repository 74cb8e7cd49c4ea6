//! Core time type with newtype pattern for type safety.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Offset from the beginning of the source recording, in whole microseconds.
///
/// Integer storage keeps virtual/source conversions exact: adding and
/// subtracting interval bounds never accumulates rounding error, so a point
/// mapped to the virtual timeline and back lands on the same microsecond.
/// The value is signed so that bad input (e.g. a negative seek request) can be
/// represented and rejected instead of wrapping.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeOffset(i64);

impl TimeOffset {
    pub const ZERO: Self = Self(0);

    const MICROS_PER_SEC: i64 = 1_000_000;

    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis * 1_000)
    }

    /// Whole seconds, convenient for tests and fixed offsets.
    pub const fn from_whole_secs(secs: i64) -> Self {
        Self(secs * Self::MICROS_PER_SEC)
    }

    /// Seconds as floating point, rounded to the nearest microsecond.
    pub fn from_secs(secs: f64) -> Self {
        Self((secs * Self::MICROS_PER_SEC as f64).round() as i64)
    }

    pub const fn as_micros(self) -> i64 {
        self.0
    }

    pub fn as_secs(self) -> f64 {
        self.0 as f64 / Self::MICROS_PER_SEC as f64
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl Add for TimeOffset {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TimeOffset {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for TimeOffset {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let total_millis = self.0.unsigned_abs() / 1_000;
        let hours = total_millis / 3_600_000;
        let mins = (total_millis % 3_600_000) / 60_000;
        let secs = (total_millis % 60_000) / 1_000;
        let millis = total_millis % 1_000;
        write!(f, "{sign}{hours:02}:{mins:02}:{secs:02}.{millis:03}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secs_conversions() {
        let t = TimeOffset::from_secs(1.5);
        assert_eq!(t.as_micros(), 1_500_000);
        assert!((t.as_secs() - 1.5).abs() < f64::EPSILON);
        assert_eq!(TimeOffset::from_whole_secs(2), TimeOffset::from_millis(2_000));
    }

    #[test]
    fn from_secs_rounds_to_nearest_micro() {
        assert_eq!(TimeOffset::from_secs(0.000_000_6).as_micros(), 1);
        assert_eq!(TimeOffset::from_secs(0.000_000_4).as_micros(), 0);
    }

    #[test]
    fn arithmetic() {
        let a = TimeOffset::from_whole_secs(10);
        let b = TimeOffset::from_whole_secs(4);
        assert_eq!(a + b, TimeOffset::from_whole_secs(14));
        assert_eq!(a - b, TimeOffset::from_whole_secs(6));
        assert!((b - a).is_negative());

        let total: TimeOffset = [a, b, b].into_iter().sum();
        assert_eq!(total, TimeOffset::from_whole_secs(18));
    }

    #[test]
    fn display() {
        assert_eq!(TimeOffset::ZERO.to_string(), "00:00:00.000");
        assert_eq!(
            TimeOffset::from_millis(3_723_456).to_string(),
            "01:02:03.456"
        );
        assert_eq!(TimeOffset::from_millis(-1_500).to_string(), "-00:00:01.500");
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&TimeOffset::from_millis(250)).unwrap();
        assert_eq!(json, "250000");
        let back: TimeOffset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TimeOffset::from_millis(250));
    }
}
