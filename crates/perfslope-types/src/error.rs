//! Error types shared across perfslope crates.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Error for invalid analysis windows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// Start time is not strictly before the end time.
    #[error("Invalid time window: {start} is not before {end}")]
    InvalidRange {
        /// The requested start time.
        start: NaiveDateTime,
        /// The requested end time.
        end: NaiveDateTime,
    },
}
