//! Counter identity and time-series representation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::in_window;

/// A single counter sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Sample time as written by the monitor (local, no offset).
    pub timestamp: NaiveDateTime,
    /// Sampled value, or `NaN` when the source cell was empty or non-numeric.
    pub value: f64,
}

impl DataPoint {
    /// Creates a new data point.
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Creates a data point that carries no sample.
    #[must_use]
    pub const fn missing(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            value: f64::NAN,
        }
    }

    /// Returns true if this point carries a sample.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        !self.value.is_nan()
    }
}

/// Identity of a performance counter decoded from a PDH-CSV header.
///
/// A header such as `\\SERVER\Processor(_Total)\% Processor Time` decodes to
/// machine `SERVER`, category `Processor`, instance `_Total` and counter
/// `% Processor Time`. Headers that do not follow the grammar keep only their
/// display name; every other field is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CounterIdentity {
    /// Machine name (e.g. `SERVER`).
    pub machine_name: String,
    /// Counter category, also called the performance object (e.g. `Processor`).
    pub category: String,
    /// Instance name (e.g. `_Total`), empty for single-instance categories.
    pub instance_name: String,
    /// Counter name (e.g. `% Processor Time`).
    pub counter_name: String,
    /// The header text as found in the file, trimmed.
    pub display_name: String,
}

impl CounterIdentity {
    /// Creates a fully decoded identity.
    #[must_use]
    pub fn new(
        machine_name: impl Into<String>,
        category: impl Into<String>,
        instance_name: impl Into<String>,
        counter_name: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            machine_name: machine_name.into(),
            category: category.into(),
            instance_name: instance_name.into(),
            counter_name: counter_name.into(),
            display_name: display_name.into(),
        }
    }

    /// Creates an identity for a header that could not be decoded.
    #[must_use]
    pub fn display_only(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Returns true if the header was decoded into its parts.
    #[must_use]
    pub fn is_decoded(&self) -> bool {
        !self.machine_name.is_empty()
    }

    /// Rebuilds the PDH counter path from the decoded parts.
    ///
    /// Returns `None` for display-only identities.
    #[must_use]
    pub fn path(&self) -> Option<String> {
        if !self.is_decoded() {
            return None;
        }
        let path = if self.instance_name.is_empty() {
            format!(
                "\\\\{}\\{}\\{}",
                self.machine_name, self.category, self.counter_name
            )
        } else {
            format!(
                "\\\\{}\\{}({})\\{}",
                self.machine_name, self.category, self.instance_name, self.counter_name
            )
        };
        Some(path)
    }
}

/// A counter and its samples in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterSeries {
    /// Counter identity.
    #[serde(flatten)]
    pub identity: CounterIdentity,
    /// Samples in parse order (non-decreasing timestamps for well-formed files).
    pub data_points: Vec<DataPoint>,
}

impl CounterSeries {
    /// Creates a new series.
    #[must_use]
    pub const fn new(identity: CounterIdentity, data_points: Vec<DataPoint>) -> Self {
        Self {
            identity,
            data_points,
        }
    }

    /// Returns the display name (the original header text).
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.identity.display_name
    }

    /// Returns the number of samples, including missing ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data_points.len()
    }

    /// Returns true if the series has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }

    /// Returns the number of samples that carry a value.
    #[must_use]
    pub fn valid_len(&self) -> usize {
        self.data_points.iter().filter(|p| p.has_value()).count()
    }

    /// Returns the first and last timestamps of the series.
    #[must_use]
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.data_points.first()?.timestamp;
        let last = self.data_points.last()?.timestamp;
        Some((first, last))
    }

    /// Returns a copy restricted to samples within `[start, end]`.
    ///
    /// The identity is copied unchanged and `self` is never modified.
    #[must_use]
    pub fn windowed(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            identity: self.identity.clone(),
            data_points: self
                .data_points
                .iter()
                .filter(|p| in_window(p.timestamp, start, end))
                .copied()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeDelta};

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 8)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn series(values: &[f64]) -> CounterSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| DataPoint::new(base() + TimeDelta::minutes(i as i64), *v))
            .collect();
        CounterSeries::new(
            CounterIdentity::new("SERVER", "Memory", "", "Available Bytes", "x"),
            points,
        )
    }

    #[test]
    fn test_path_with_instance() {
        let id = CounterIdentity::new(
            "SERVER",
            "Processor",
            "_Total",
            "% Processor Time",
            "\\\\SERVER\\Processor(_Total)\\% Processor Time",
        );
        assert_eq!(id.path().as_deref(), Some(id.display_name.as_str()));
    }

    #[test]
    fn test_path_without_instance() {
        let id = CounterIdentity::new("SERVER", "Memory", "", "Available MBytes", "");
        assert_eq!(
            id.path().as_deref(),
            Some("\\\\SERVER\\Memory\\Available MBytes")
        );
    }

    #[test]
    fn test_display_only_identity() {
        let id = CounterIdentity::display_only("Broken Header");
        assert!(!id.is_decoded());
        assert!(id.path().is_none());
        assert_eq!(id.display_name, "Broken Header");
        assert!(id.category.is_empty());
    }

    #[test]
    fn test_missing_point() {
        let p = DataPoint::missing(base());
        assert!(!p.has_value());
        assert!(DataPoint::new(base(), 0.0).has_value());
    }

    #[test]
    fn test_windowed_copies_without_mutating() {
        let s = series(&[1.0, 2.0, f64::NAN, 4.0, 5.0]);
        let w = s.windowed(base() + TimeDelta::minutes(1), base() + TimeDelta::minutes(3));

        assert_eq!(w.len(), 3);
        assert_eq!(w.identity, s.identity);
        assert_eq!(s.len(), 5);
        assert_eq!(w.valid_len(), 2);
    }

    #[test]
    fn test_time_span() {
        let s = series(&[1.0, 2.0, 3.0]);
        assert_eq!(
            s.time_span(),
            Some((base(), base() + TimeDelta::minutes(2)))
        );
        assert_eq!(series(&[]).time_span(), None);
    }

    #[test]
    fn test_series_serializes_flat_identity() {
        let s = series(&[1.0]);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["machine_name"], "SERVER");
        assert_eq!(json["data_points"][0]["value"], 1.0);
    }
}
