//! Session-based analysis service.
//!
//! Validates requests, resolves session ids and hands the stored counters to
//! the estimator and report renderers.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};
use perfslope_import::{CancellationToken, ImportError, import_counters_with_cancel};
use perfslope_report::{Report, ReportContext, generate_report};
use perfslope_session::{InMemorySessionStore, SessionId, SessionStore, StoreError, spawn_sweeper};
use perfslope_trend::{TrendEstimator, ValueScale};
use perfslope_types::{CounterSeries, SlopeResult, TimeWindow, WindowError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::io::AsyncRead;
use tokio::task::JoinHandle;

/// Warning threshold used when a request does not set one.
pub const DEFAULT_THRESHOLD_PER_10MIN: f64 = 50.0;

const fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD_PER_10MIN
}

fn default_format() -> String {
    "html".to_string()
}

/// Errors returned by [`AnalysisService`].
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request carried no session id.
    #[error("SessionId is required")]
    MissingSessionId,

    /// The requested window does not have its start before its end.
    #[error(transparent)]
    InvalidWindow(#[from] WindowError),

    /// The session id is unknown, expired or not a valid id.
    #[error("Session {0} expired or invalid")]
    SessionNotFound(String),

    /// The upload could not be imported.
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::SessionNotFound(id.to_string()),
        }
    }
}

/// Result of importing an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    /// Id under which the counters are stored.
    pub session_id: SessionId,
    /// Imported counters.
    pub counters: Vec<CounterSeries>,
}

/// Counters of a session, optionally limited to a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataResponse {
    /// Stored counters.
    pub counters: Vec<CounterSeries>,
}

/// Trend analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlopeRequest {
    /// Session to analyse.
    pub session_id: String,
    /// Window start (inclusive).
    pub start_time: NaiveDateTime,
    /// Window end (inclusive).
    pub end_time: NaiveDateTime,
    /// Warning threshold per 10 minutes.
    #[serde(default = "default_threshold")]
    pub threshold_per_10min: f64,
}

impl SlopeRequest {
    /// Creates a request with the default threshold.
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            start_time,
            end_time,
            threshold_per_10min: DEFAULT_THRESHOLD_PER_10MIN,
        }
    }

    /// Sets the warning threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold_per_10min: f64) -> Self {
        self.threshold_per_10min = threshold_per_10min;
        self
    }
}

/// Trend analysis response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlopeResponse {
    /// One result per counter with enough samples, in import order.
    pub results: Vec<SlopeResult>,
}

/// Report request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    /// Session to report on.
    pub session_id: String,
    /// Window start (inclusive).
    pub start_time: NaiveDateTime,
    /// Window end (inclusive).
    pub end_time: NaiveDateTime,
    /// Warning threshold per 10 minutes.
    #[serde(default = "default_threshold")]
    pub threshold_per_10min: f64,
    /// Chart image as base64 or a `data:` URI.
    #[serde(default)]
    pub chart_image_base64: String,
    /// Report format tag, `html` or `md`. Unknown tags produce HTML.
    #[serde(default = "default_format")]
    pub format: String,
}

impl ReportRequest {
    /// Creates an HTML report request with the default threshold and no chart.
    #[must_use]
    pub fn new(
        session_id: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            start_time,
            end_time,
            threshold_per_10min: DEFAULT_THRESHOLD_PER_10MIN,
            chart_image_base64: String::new(),
            format: default_format(),
        }
    }

    /// Sets the warning threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold_per_10min: f64) -> Self {
        self.threshold_per_10min = threshold_per_10min;
        self
    }

    /// Sets the chart image.
    #[must_use]
    pub fn with_chart(mut self, chart_image_base64: impl Into<String>) -> Self {
        self.chart_image_base64 = chart_image_base64.into();
        self
    }

    /// Sets the format tag.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

/// Imports uploads into sessions and analyses them.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    store: Arc<dyn SessionStore>,
    estimator: TrendEstimator,
}

impl AnalysisService {
    /// Creates a service over `store` reporting slopes in `scale`.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, scale: ValueScale) -> Self {
        Self {
            store,
            estimator: TrendEstimator::new(scale),
        }
    }

    /// Creates a service with a fresh in-memory store.
    #[must_use]
    pub fn in_memory(scale: ValueScale) -> Self {
        Self::new(InMemorySessionStore::shared(), scale)
    }

    /// Returns the session store.
    #[must_use]
    pub const fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Returns the estimator.
    #[must_use]
    pub const fn estimator(&self) -> TrendEstimator {
        self.estimator
    }

    /// Starts evicting sessions idle for longer than `idle`, checking every
    /// `every`. Must be called from within a tokio runtime.
    pub fn spawn_sweeper(&self, every: Duration, idle: TimeDelta) -> JoinHandle<()> {
        spawn_sweeper(Arc::clone(&self.store), every, idle)
    }

    /// Imports an upload and stores it under a new session.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Import`] if the upload cannot be imported.
    pub async fn upload<R>(
        &self,
        reader: R,
        cancel: &CancellationToken,
    ) -> Result<UploadResult, ServiceError>
    where
        R: AsyncRead + Unpin,
    {
        let counters = import_counters_with_cancel(reader, cancel).await?;
        let session_id = self.store.save(counters.clone());
        tracing::info!(%session_id, counters = counters.len(), "upload stored");
        Ok(UploadResult {
            session_id,
            counters,
        })
    }

    /// Returns a session's counters, limited to `window` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the session id is missing, unknown or expired.
    pub fn data(
        &self,
        session_id: &str,
        window: Option<(NaiveDateTime, NaiveDateTime)>,
    ) -> Result<DataResponse, ServiceError> {
        let id = resolve_session_id(require_session_id(session_id)?)?;
        let counters = match window {
            Some((start, end)) => self.store.get_range(id, start, end)?,
            None => self.store.get(id)?.to_vec(),
        };
        Ok(DataResponse { counters })
    }

    /// Computes per-counter trends over the requested window.
    ///
    /// # Errors
    ///
    /// Returns an error if the session id is missing, unknown or expired, or
    /// the window is not ordered.
    pub fn slope(&self, request: &SlopeRequest) -> Result<SlopeResponse, ServiceError> {
        let (window, counters) =
            self.windowed_counters(&request.session_id, request.start_time, request.end_time)?;
        let results = self.estimator.compute(
            &counters,
            window.start,
            window.end,
            request.threshold_per_10min,
        );
        Ok(SlopeResponse { results })
    }

    /// Analyses the requested window and renders a report.
    ///
    /// # Errors
    ///
    /// Returns an error if the session id is missing, unknown or expired, or
    /// the window is not ordered.
    pub fn report(&self, request: &ReportRequest) -> Result<Report, ServiceError> {
        let (window, counters) =
            self.windowed_counters(&request.session_id, request.start_time, request.end_time)?;
        let results = self.estimator.compute(
            &counters,
            window.start,
            window.end,
            request.threshold_per_10min,
        );

        let ctx = ReportContext::new(&results, window, request.threshold_per_10min)
            .with_counters(&counters)
            .with_unit_label(self.estimator.scale().unit_label())
            .with_chart(&request.chart_image_base64);
        Ok(generate_report(Some(&request.format), &ctx))
    }

    fn windowed_counters(
        &self,
        session_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<(TimeWindow, Vec<CounterSeries>), ServiceError> {
        let session_id = require_session_id(session_id)?;
        let window = TimeWindow::new(start, end)?;
        let id = resolve_session_id(session_id)?;
        let counters = self.store.get_range(id, window.start, window.end)?;
        Ok((window, counters))
    }
}

fn require_session_id(session_id: &str) -> Result<&str, ServiceError> {
    let session_id = session_id.trim();
    if session_id.is_empty() {
        return Err(ServiceError::MissingSessionId);
    }
    Ok(session_id)
}

fn resolve_session_id(session_id: &str) -> Result<SessionId, ServiceError> {
    session_id
        .parse()
        .map_err(|_| ServiceError::SessionNotFound(session_id.to_string()))
}
