//! Per-counter trend estimation over a time window.

use chrono::NaiveDateTime;
use perfslope_types::{CounterSeries, SlopeResult, in_window};

use crate::{ValueScale, linear_regression};

/// Minimum number of usable samples for a counter to be fitted.
pub const MIN_DATA_POINTS: usize = 2;

/// Microseconds per minute, the regression's x unit.
const MICROS_PER_MINUTE: f64 = 60_000_000.0;

/// Computes linear trends for counter series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrendEstimator {
    scale: ValueScale,
}

impl TrendEstimator {
    /// Creates an estimator that reports slopes in `scale`.
    #[must_use]
    pub const fn new(scale: ValueScale) -> Self {
        Self { scale }
    }

    /// Returns the reporting scale.
    #[must_use]
    pub const fn scale(&self) -> ValueScale {
        self.scale
    }

    /// Computes the trend of every counter over `[start, end]`.
    ///
    /// Counters with fewer than [`MIN_DATA_POINTS`] non-missing samples in the
    /// window are omitted; the rest keep their input order. A counter is a
    /// warning when the absolute slope per 10 minutes strictly exceeds
    /// `threshold_per_10min`. The window is not validated: an inverted
    /// window simply selects nothing.
    #[must_use]
    pub fn compute(
        &self,
        counters: &[CounterSeries],
        start: NaiveDateTime,
        end: NaiveDateTime,
        threshold_per_10min: f64,
    ) -> Vec<SlopeResult> {
        let results: Vec<SlopeResult> = counters
            .iter()
            .filter_map(|series| self.analyze(series, start, end, threshold_per_10min))
            .collect();

        tracing::debug!(
            counters = counters.len(),
            fitted = results.len(),
            warnings = results.iter().filter(|r| r.is_warning).count(),
            scale = %self.scale,
            "computed trends"
        );
        results
    }

    /// Computes the trend of a single counter over `[start, end]`.
    ///
    /// Returns `None` if the window holds too few usable samples.
    #[must_use]
    pub fn analyze(
        &self,
        series: &CounterSeries,
        start: NaiveDateTime,
        end: NaiveDateTime,
        threshold_per_10min: f64,
    ) -> Option<SlopeResult> {
        let points = regression_points(series, start, end);
        if points.len() < MIN_DATA_POINTS {
            tracing::trace!(
                counter = series.display_name(),
                samples = points.len(),
                "too few samples to fit"
            );
            return None;
        }

        let fit = linear_regression(&points)?;
        let slope_per_10min = self.scale.apply(fit.slope * 10.0);

        Some(SlopeResult {
            counter_name: series.display_name().to_string(),
            slope_per_10min,
            r_squared: fit.r_squared,
            is_warning: slope_per_10min.abs() > threshold_per_10min,
        })
    }
}

/// Converts in-window samples to `(minutes since first sample, value)`.
fn regression_points(
    series: &CounterSeries,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<(f64, f64)> {
    let mut samples = series
        .data_points
        .iter()
        .filter(|p| in_window(p.timestamp, start, end) && p.has_value())
        .peekable();

    let Some(origin) = samples.peek().map(|p| p.timestamp) else {
        return Vec::new();
    };

    samples
        .map(|p| {
            let offset = p.timestamp - origin;
            // Microsecond counts overflow only past ~292,000 years.
            let micros = offset
                .num_microseconds()
                .map_or_else(|| offset.num_milliseconds() as f64 * 1000.0, |us| us as f64);
            (micros / MICROS_PER_MINUTE, p.value)
        })
        .collect()
}
