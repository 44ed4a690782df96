//! Report input.

use chrono::{Local, NaiveDateTime};
use perfslope_types::{CounterSeries, SlopeResult, TimeWindow};

/// Unit label used for slopes and the threshold unless overridden.
pub const DEFAULT_UNIT_LABEL: &str = "KB/10min";

/// Everything a report shows.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Imported counters the analysis ran over.
    pub counters: &'a [CounterSeries],
    /// Per-counter trend results, in display order.
    pub results: &'a [SlopeResult],
    /// Local time the report was generated.
    pub generated_at: NaiveDateTime,
    /// Analysis window.
    pub window: TimeWindow,
    /// Warning threshold per 10 minutes.
    pub threshold: f64,
    /// Unit label for slopes and the threshold.
    pub unit_label: &'a str,
    /// Chart image as base64 or a `data:` URI; empty when no chart was given.
    pub chart_image_base64: &'a str,
}

impl<'a> ReportContext<'a> {
    /// Creates a context generated now, with no counters and no chart.
    #[must_use]
    pub fn new(results: &'a [SlopeResult], window: TimeWindow, threshold: f64) -> Self {
        Self {
            counters: &[],
            results,
            generated_at: Local::now().naive_local(),
            window,
            threshold,
            unit_label: DEFAULT_UNIT_LABEL,
            chart_image_base64: "",
        }
    }

    /// Sets the imported counters.
    #[must_use]
    pub const fn with_counters(mut self, counters: &'a [CounterSeries]) -> Self {
        self.counters = counters;
        self
    }

    /// Sets the generation time.
    #[must_use]
    pub const fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Sets the unit label.
    #[must_use]
    pub const fn with_unit_label(mut self, unit_label: &'a str) -> Self {
        self.unit_label = unit_label;
        self
    }

    /// Sets the chart image.
    #[must_use]
    pub const fn with_chart(mut self, chart_image_base64: &'a str) -> Self {
        self.chart_image_base64 = chart_image_base64;
        self
    }

    /// Returns the results over the threshold.
    pub fn warnings(&self) -> impl Iterator<Item = &'a SlopeResult> + 'a {
        self.results.iter().filter(|r| r.is_warning)
    }

    /// Returns the number of results over the threshold.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }
}
