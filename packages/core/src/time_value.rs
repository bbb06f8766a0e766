//! Structured clock-time values for session planning
//!
//! A [`TimeValue`] is an (hours, minutes, seconds) triple used both as a
//! duration and as an offset from the start of a study session.

use serde::{Deserialize, Serialize};

/// A duration or offset expressed as hours/minutes/seconds.
///
/// Normalized form keeps `minutes` and `seconds` in `[0, 59]`. The
/// constructors here do not clamp; callers building values by hand must
/// pass pre-normalized components (use [`TimeValue::from_total_seconds`]
/// when in doubt). Ordering derives from field order, which agrees with
/// total-seconds ordering for normalized values.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeValue {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeValue {
    pub const ZERO: TimeValue = TimeValue {
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Build from literal components. No normalization is applied.
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Build a normalized value from a total number of seconds.
    pub const fn from_total_seconds(total: u64) -> Self {
        Self {
            hours: (total / 3600) as u32,
            minutes: ((total % 3600) / 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    pub const fn total_seconds(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    /// Total minutes including the fractional part contributed by seconds.
    /// This is the quantity the pixel grid scales by.
    pub fn total_minutes_f32(&self) -> f32 {
        self.hours as f32 * 60.0 + self.minutes as f32 + self.seconds as f32 / 60.0
    }

    pub const fn is_zero(&self) -> bool {
        self.total_seconds() == 0
    }

    /// True when minutes and seconds are both in `[0, 59]`.
    pub const fn is_normalized(&self) -> bool {
        self.minutes < 60 && self.seconds < 60
    }
}

impl std::fmt::Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}
