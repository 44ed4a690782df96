//! Performance Monitor counter import and trend analysis.
//!
//! This is a facade crate that re-exports functionality from the perfslope
//! workspace crates and adds [`AnalysisService`], which ties import, session
//! storage, trend estimation and reporting together.
//!
//! # Quick Start
//!
//! ```ignore
//! use perfslope_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = tokio::fs::File::open("counters.csv").await?;
//!     let counters = import_counters(file).await?;
//!
//!     let (start, end) = counters[0].time_span().unwrap();
//!     let estimator = TrendEstimator::new(ValueScale::Kilobytes);
//!     for result in estimator.compute(&counters, start, end, 50.0) {
//!         println!("{} {:.2} {}", result.counter_name, result.slope_per_10min, result.status());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/perfslope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(feature = "service")]
mod service;

// Re-export core types
pub use perfslope_types::*;

// Re-export import
pub use perfslope_import::{
    CancellationToken, ImportError, TextEncoding, decode_text, import_counters,
    import_counters_with_cancel, import_file, parse_header, parse_timestamp, parse_value,
};

// Re-export trend estimation
pub use perfslope_trend::{LinearFit, ScaleParseError, TrendEstimator, ValueScale, linear_regression};

// Re-export session storage
#[cfg(feature = "session")]
pub use perfslope_session::{
    DEFAULT_IDLE_TIMEOUT, InMemorySessionStore, MIN_SWEEP_INTERVAL, Session, SessionId,
    SessionStore, StoreError, spawn_sweeper,
};

// Re-export reporting
#[cfg(feature = "report")]
pub use perfslope_report::{
    FormatError, HtmlRenderer, MarkdownRenderer, Report, ReportContext, ReportFormat,
    ReportRenderer, generate_report,
};

#[cfg(feature = "service")]
pub use service::{
    AnalysisService, DEFAULT_THRESHOLD_PER_10MIN, DataResponse, ReportRequest, ServiceError,
    SlopeRequest, SlopeResponse, UploadResult,
};

/// Prelude module for convenient imports.
///
/// ```
/// use perfslope_lib::prelude::*;
/// ```
pub mod prelude {
    pub use perfslope_types::{
        CounterIdentity, CounterSeries, DataPoint, SlopeResult, TimeWindow, WindowError,
    };

    pub use perfslope_import::{CancellationToken, ImportError, import_counters, import_file};

    pub use perfslope_trend::{TrendEstimator, ValueScale};

    #[cfg(feature = "session")]
    pub use perfslope_session::{InMemorySessionStore, SessionId, SessionStore};

    #[cfg(feature = "report")]
    pub use perfslope_report::{Report, ReportFormat, generate_report};

    #[cfg(feature = "service")]
    pub use crate::service::{AnalysisService, ReportRequest, ServiceError, SlopeRequest};
}
