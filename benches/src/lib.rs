//! Benchmark fixtures for perfslope.
//!
//! Builds synthetic PDH-CSV exports and counter series of a given size so the
//! import and trend paths can be measured without real capture files.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use perfslope_lib::{CounterIdentity, CounterSeries, DataPoint};
use std::fmt::Write;

/// First sample time of every fixture.
pub fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Value of counter `counter` at sample `i`: a slow ramp with a little
/// deterministic jitter so the fit is not exact.
fn sample(counter: usize, i: usize) -> f64 {
    let ramp = (counter + 1) as f64 * 512.0 * i as f64;
    let jitter = ((i * 7 + counter * 13) % 17) as f64 * 64.0;
    1_000_000.0 + ramp + jitter
}

/// Builds `counters` series of `points` one-second samples each.
pub fn synthetic_counters(counters: usize, points: usize) -> Vec<CounterSeries> {
    let start = base_time();
    (0..counters)
        .map(|c| {
            let identity = CounterIdentity::new(
                "BENCH",
                "Process",
                format!("worker#{c}"),
                "Private Bytes",
                format!("\\\\BENCH\\Process(worker#{c})\\Private Bytes"),
            );
            let data_points = (0..points)
                .map(|i| DataPoint::new(start + TimeDelta::seconds(i as i64), sample(c, i)))
                .collect();
            CounterSeries::new(identity, data_points)
        })
        .collect()
}

/// Renders a PDH-CSV export with `counters` columns and `points` rows.
pub fn synthetic_export(counters: usize, points: usize) -> String {
    let start = base_time();
    let mut out = String::with_capacity(counters * points * 12);

    out.push_str("\"(PDH-CSV 4.0) (Tokyo Standard Time)(-540)\"");
    for c in 0..counters {
        let _ = write!(out, ",\"\\\\BENCH\\Process(worker#{c})\\Private Bytes\"");
    }
    out.push('\n');

    for i in 0..points {
        let ts = start + TimeDelta::seconds(i as i64);
        let _ = write!(out, "\"{}\"", ts.format("%m/%d/%Y %H:%M:%S%.3f"));
        for c in 0..counters {
            let _ = write!(out, ",\"{}\"", sample(c, i));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_counters_shape() {
        let counters = synthetic_counters(3, 10);
        assert_eq!(counters.len(), 3);
        assert!(counters.iter().all(|c| c.len() == 10));
        assert_eq!(counters[2].identity.instance_name, "worker#2");
    }

    #[test]
    fn test_synthetic_export_shape() {
        let export = synthetic_export(2, 5);
        let lines: Vec<&str> = export.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("worker#1"));
        assert!(lines[1].starts_with("\"03/01/2024 00:00:00.000\""));
    }
}
