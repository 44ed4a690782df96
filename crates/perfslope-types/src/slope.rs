//! Trend analysis result.

use serde::{Deserialize, Serialize};

/// Linear trend computed for one counter over an analysis window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlopeResult {
    /// Display name of the analysed counter.
    pub counter_name: String,
    /// Fitted rate of change per 10 minutes, in the estimator's reporting unit.
    pub slope_per_10min: f64,
    /// Coefficient of determination of the fit (`NaN` when all samples share one timestamp).
    pub r_squared: f64,
    /// True if the absolute slope exceeds the threshold.
    pub is_warning: bool,
}

impl SlopeResult {
    /// Returns true if the slope is positive (the counter is growing).
    #[must_use]
    pub fn is_rising(&self) -> bool {
        self.slope_per_10min > 0.0
    }

    /// Returns the status label used in summaries.
    #[must_use]
    pub const fn status(&self) -> &'static str {
        if self.is_warning { "warning" } else { "ok" }
    }
}
