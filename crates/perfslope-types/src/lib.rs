//! Core types for the perfslope performance-counter trend analyzer.
//!
//! This crate provides the data model shared by every perfslope crate:
//!
//! - [`DataPoint`] - A single timestamped counter sample (`NaN` marks a missing sample)
//! - [`CounterIdentity`] - Machine/category/instance/counter identity decoded from a PDH header
//! - [`CounterSeries`] - A counter identity with its ordered samples
//! - [`SlopeResult`] - The linear trend computed for one counter
//! - [`TimeWindow`] - Validated inclusive time window for analysis

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/perfslope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod counter;
mod error;
mod slope;
mod window;

pub use counter::{CounterIdentity, CounterSeries, DataPoint};
pub use error::WindowError;
pub use slope::SlopeResult;
pub use window::{TimeWindow, in_window};
