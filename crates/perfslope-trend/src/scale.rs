//! Reporting units for fitted slopes.

use std::str::FromStr;

use thiserror::Error;

/// Bytes per kilobyte.
const BYTES_PER_KB: f64 = 1024.0;

/// Unit the estimator reports slopes in.
///
/// Memory counters are sampled in bytes; [`ValueScale::Kilobytes`] turns a
/// bytes-per-10-minutes slope into kilobytes per 10 minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValueScale {
    /// Report slopes in the counter's own unit.
    #[default]
    Native,
    /// Divide slopes by 1024.
    Kilobytes,
}

impl ValueScale {
    /// Returns the scale as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Kilobytes => "kb",
        }
    }

    /// Returns the unit label used next to slopes, e.g. in report headers.
    #[must_use]
    pub const fn unit_label(&self) -> &'static str {
        match self {
            Self::Native => "units/10min",
            Self::Kilobytes => "KB/10min",
        }
    }

    /// Converts a value in the counter's unit to this scale.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::Native => value,
            Self::Kilobytes => value / BYTES_PER_KB,
        }
    }
}

impl std::fmt::Display for ValueScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ValueScale {
    type Err = ScaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" | "raw" => Ok(Self::Native),
            "kb" | "kib" | "kilobytes" => Ok(Self::Kilobytes),
            _ => Err(ScaleParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid value unit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value unit '{0}', expected one of: native, kb")]
pub struct ScaleParseError(String);
