//! Inclusive analysis window.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::WindowError;

/// Returns true if `timestamp` lies within `[start, end]` (both bounds inclusive).
///
/// This is the single range predicate used by the session store and the
/// trend estimator. An inverted window simply contains nothing.
#[inline]
#[must_use]
pub fn in_window(timestamp: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    timestamp >= start && timestamp <= end
}

/// A validated time window with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: NaiveDateTime,
    /// End of the window (inclusive).
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a new window, validating that start is strictly before end.
    ///
    /// # Errors
    ///
    /// Returns an error if `start >= end`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, WindowError> {
        if start >= end {
            return Err(WindowError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if the window contains the given timestamp.
    #[must_use]
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        in_window(timestamp, self.start, self.end)
    }

    /// Returns the length of the window in minutes.
    #[must_use]
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}
