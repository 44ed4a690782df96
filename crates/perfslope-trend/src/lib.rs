//! Least-squares trend estimation for perfslope counter series.
//!
//! - [`linear_regression`] - Fits a line to `(minutes, value)` points
//! - [`LinearFit`] - Slope, intercept and R² of a fit
//! - [`TrendEstimator`] - Computes per-counter slopes over a time window
//! - [`ValueScale`] - Unit the slopes are reported in

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/perfslope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod estimator;
mod regression;
mod scale;

pub use estimator::{MIN_DATA_POINTS, TrendEstimator};
pub use regression::{EPSILON, LinearFit, linear_regression};
pub use scale::{ScaleParseError, ValueScale};
