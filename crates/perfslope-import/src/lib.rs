//! PDH-CSV performance counter import for perfslope.
//!
//! This crate turns the CSV logs written by Windows Performance Monitor into
//! typed counter series:
//!
//! - [`import_counters`] - Reads a whole export from any async reader
//! - [`decode_text`] - BOM-based UTF-8 / Shift-JIS decoding
//! - [`parse_header`] - Decodes a `\\MACHINE\Category(Instance)\Counter` header
//! - [`parse_timestamp`] - Locale-invariant timestamp parsing

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/perfslope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod encoding;
mod error;
mod header;
mod reader;
mod timestamp;

pub use encoding::{TextEncoding, UTF8_BOM, decode_text};
pub use error::ImportError;
pub use header::parse_header;
pub use reader::{import_counters, import_counters_with_cancel, import_file, parse_value};
pub use timestamp::parse_timestamp;

/// Re-exported so callers can cancel an import without depending on `tokio-util`.
pub use tokio_util::sync::CancellationToken;
