//! Display utilities and output formatting for the perfslope CLI.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use perfslope_lib::parse_timestamp;
use perfslope_lib::prelude::*;
use serde::Serialize;
use std::time::Duration;

/// Timestamp format used in tables.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Unit slopes are reported in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Unit {
    /// Raw counter units.
    Native,
    /// Raw values divided by 1024.
    Kb,
}

impl From<Unit> for ValueScale {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Native => Self::Native,
            Unit::Kb => Self::Kilobytes,
        }
    }
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportKind {
    Html,
    Md,
}

impl ReportKind {
    /// Returns the format tag understood by the report generator.
    pub(crate) const fn tag(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Md => "md",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Per-counter summary printed by `import`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CounterSummary<'a> {
    pub(crate) display_name: &'a str,
    pub(crate) machine: &'a str,
    pub(crate) category: &'a str,
    pub(crate) instance: &'a str,
    pub(crate) counter: &'a str,
    pub(crate) points: usize,
    pub(crate) valid_points: usize,
    pub(crate) first: Option<NaiveDateTime>,
    pub(crate) last: Option<NaiveDateTime>,
}

impl<'a> From<&'a CounterSeries> for CounterSummary<'a> {
    fn from(series: &'a CounterSeries) -> Self {
        let span = series.time_span();
        Self {
            display_name: series.display_name(),
            machine: &series.identity.machine_name,
            category: &series.identity.category,
            instance: &series.identity.instance_name,
            counter: &series.identity.counter_name,
            points: series.len(),
            valid_points: series.valid_len(),
            first: span.map(|(first, _)| first),
            last: span.map(|(_, last)| last),
        }
    }
}

/// Parses a `--start`/`--end` argument in any accepted export timestamp form.
pub(crate) fn parse_time_arg(text: &str) -> Result<NaiveDateTime> {
    parse_timestamp(text).with_context(|| format!("Invalid timestamp: {text}"))
}

/// Returns the earliest and latest timestamps over all counters.
pub(crate) fn data_span(counters: &[CounterSeries]) -> Option<(NaiveDateTime, NaiveDateTime)> {
    counters
        .iter()
        .filter_map(CounterSeries::time_span)
        .reduce(|(start, end), (first, last)| (start.min(first), end.max(last)))
}

/// Creates a spinner, hidden in quiet mode.
pub(crate) fn spinner(quiet: bool, message: impl Into<String>) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) =
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prints imported counters as a table.
pub(crate) fn print_counters(counters: &[CounterSeries]) {
    println!(
        "{:<60} {:>8} {:>8} {:<19} {:<19}",
        "COUNTER", "POINTS", "VALID", "FIRST", "LAST"
    );
    println!("{}", "-".repeat(118));

    for summary in counters.iter().map(CounterSummary::from) {
        println!(
            "{:<60} {:>8} {:>8} {:<19} {:<19}",
            truncate(summary.display_name, 60),
            summary.points,
            summary.valid_points,
            format_time(summary.first),
            format_time(summary.last),
        );
    }

    println!("\nTotal: {} counters", counters.len());
}

/// Prints trend results as a table.
pub(crate) fn print_results(
    results: &[SlopeResult],
    window: &TimeWindow,
    threshold: f64,
    unit_label: &str,
) {
    println!("Window:    {window}");
    println!("Threshold: {threshold} {unit_label}\n");
    println!(
        "{:<60} {:>16} {:>8} {:<10}",
        "COUNTER",
        format!("SLOPE ({unit_label})"),
        "R2",
        "STATUS"
    );
    println!("{}", "-".repeat(97));

    for result in results {
        println!(
            "{:<60} {:>16.2} {:>8.4} {:<10}",
            truncate(&result.counter_name, 60),
            result.slope_per_10min,
            result.r_squared,
            result.status(),
        );
    }

    let warnings = results.iter().filter(|r| r.is_warning).count();
    println!("\nTotal: {} counters, {} over threshold", results.len(), warnings);
}

fn format_time(time: Option<NaiveDateTime>) -> String {
    time.map_or_else(|| "-".to_string(), |t| t.format(TIME_FORMAT).to_string())
}

/// Shortens `text` to at most `width` characters, marking the cut with `…`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
