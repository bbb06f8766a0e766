//! Break intervals and the planner that owns them
//!
//! A [`Break`] is a scheduled pause inside a study session: a start offset
//! plus a duration, both [`TimeValue`]s. The [`BreakPlanner`] holds the
//! ordered collection for the current session and is its only writer; it is
//! constructed with an explicit [`GridScale`] rather than reading any
//! ambient configuration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{GridScale, RespiteError, RespiteResult, TimeValue};

/// Default duration assigned to a freshly created break: ten minutes.
pub const DEFAULT_BREAK_DURATION: TimeValue = TimeValue::new(0, 10, 0);

/// A scheduled break within a session.
///
/// Breaks carry no identity of their own; they are addressed by their index
/// in the planner's list, insertion order being creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Break {
    pub start: TimeValue,
    pub duration: TimeValue,
}

impl Break {
    pub fn new(start: TimeValue, duration: TimeValue) -> Self {
        Self { start, duration }
    }

    /// Offset of the break's end from session start, in seconds.
    pub fn end_seconds(&self) -> u64 {
        self.start.total_seconds() + self.duration.total_seconds()
    }
}

/// Owns the ordered break collection for one session.
#[derive(Debug, Clone)]
pub struct BreakPlanner {
    scale: GridScale,
    breaks: Vec<Break>,
}

impl BreakPlanner {
    pub fn new(scale: GridScale) -> Self {
        Self {
            scale,
            breaks: Vec::new(),
        }
    }

    /// Rebuild a planner from previously saved breaks, preserving order.
    pub fn with_breaks(scale: GridScale, breaks: Vec<Break>) -> Self {
        Self { scale, breaks }
    }

    pub fn scale(&self) -> GridScale {
        self.scale
    }

    /// Create a break starting at the time mapped from `pixel_y` with the
    /// default ten-minute duration, and append it to the collection.
    ///
    /// Never fails: negative offsets clamp to session start via the scale's
    /// conversion policy, and offsets past the session end pass through
    /// unchanged. Overlap with existing breaks is not checked.
    pub fn create_break_at(&mut self, pixel_y: f32) -> Break {
        let start = self.scale.time_at(pixel_y);
        let created = Break::new(start, DEFAULT_BREAK_DURATION);
        self.breaks.push(created);
        debug!(
            "Created break #{} at {} ({} px)",
            self.breaks.len() - 1,
            start,
            pixel_y
        );
        created
    }

    /// Ordered view of all breaks, for rendering.
    pub fn breaks(&self) -> &[Break] {
        &self.breaks
    }

    pub fn get(&self, index: usize) -> Option<&Break> {
        self.breaks.get(index)
    }

    /// Replace the break at `index`, the save path of the popup editor.
    pub fn update_break(&mut self, index: usize, updated: Break) -> RespiteResult<()> {
        let len = self.breaks.len();
        match self.breaks.get_mut(index) {
            Some(slot) => {
                *slot = updated;
                debug!("Updated break #{index}: {} for {}", updated.start, updated.duration);
                Ok(())
            }
            None => Err(RespiteError::BreakIndex { index, len }),
        }
    }

    /// Remove and return the break at `index`, if any. Later breaks shift
    /// down one index.
    pub fn remove_break(&mut self, index: usize) -> Option<Break> {
        if index < self.breaks.len() {
            let removed = self.breaks.remove(index);
            debug!("Removed break #{index} at {}", removed.start);
            Some(removed)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.breaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }
}
