//! Pixel <-> time conversion for the break timeline grid
//!
//! The grid draws one vertical pixel row per minute at the reference scale,
//! so a pointer offset measured from the grid's top edge maps directly to a
//! clock offset within the session. Both directions live here as pure
//! functions on [`GridScale`].
//!
//! Rounding rule: a pixel offset is converted by rounding the implied time
//! to the nearest whole second before decomposing it into components. At
//! the reference scale (1 px/min) this makes `time_at(offset_of(t))`
//! reproduce `t` exactly for every normalized value; at other scales the
//! round trip is accurate to within one second.

use crate::TimeValue;

/// Reference scale: one pixel row per minute of session time.
pub const PIXELS_PER_MINUTE: f32 = 1.0;

/// Conversion scale between vertical pixels and session time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridScale {
    pub pixels_per_minute: f32,
}

impl Default for GridScale {
    fn default() -> Self {
        Self {
            pixels_per_minute: PIXELS_PER_MINUTE,
        }
    }
}

impl GridScale {
    pub fn new(pixels_per_minute: f32) -> Self {
        Self { pixels_per_minute }
    }

    /// Convert a pixel offset from the grid's top edge into a time offset.
    ///
    /// Total functions over f32: negative and non-finite offsets clamp to
    /// [`TimeValue::ZERO`] since the grid constrains real pointer
    /// coordinates to non-negative values anyway.
    pub fn time_at(&self, total_pixels: f32) -> TimeValue {
        if !total_pixels.is_finite() || total_pixels <= 0.0 {
            return TimeValue::ZERO;
        }

        let total_minutes = total_pixels / self.pixels_per_minute;
        if !total_minutes.is_finite() {
            return TimeValue::ZERO;
        }

        let total_seconds = (total_minutes as f64 * 60.0).round() as u64;
        TimeValue::from_total_seconds(total_seconds)
    }

    /// Convert a time offset or duration into a vertical pixel extent.
    pub fn offset_of(&self, time: TimeValue) -> f32 {
        time.total_minutes_f32() * self.pixels_per_minute
    }
}
