//! CLI command implementations.

pub(crate) mod analyze;
pub(crate) mod import;
pub(crate) mod report;

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::{NaiveDateTime, TimeDelta};
use clap::Args;
use perfslope_lib::prelude::*;
use perfslope_lib::{SessionId, UploadResult};

use crate::display::{self, Unit};
use crate::settings::Settings;

/// Window, threshold and unit options shared by `analyze` and `report`.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct AnalysisArgs {
    /// Window start. Defaults to the first sample in the file
    #[arg(short, long)]
    pub(crate) start: Option<String>,

    /// Window end. Defaults to the last sample in the file
    #[arg(short, long)]
    pub(crate) end: Option<String>,

    /// Warning threshold per 10 minutes, in the reporting unit
    #[arg(short, long)]
    pub(crate) threshold: Option<f64>,

    /// Reporting unit
    #[arg(short, long, value_enum)]
    pub(crate) unit: Option<Unit>,
}

impl AnalysisArgs {
    /// Returns the threshold, falling back to the configured one.
    pub(crate) fn threshold(&self, settings: &Settings) -> f64 {
        self.threshold.unwrap_or(settings.threshold_per_10min)
    }

    /// Returns the unit, falling back to the configured one.
    pub(crate) fn scale(&self, settings: &Settings) -> Result<ValueScale> {
        match self.unit {
            Some(unit) => Ok(unit.into()),
            None => settings.value_scale(),
        }
    }

    /// Resolves the window, defaulting each missing bound to the data span.
    pub(crate) fn window(
        &self,
        counters: &[CounterSeries],
    ) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let span = display::data_span(counters);
        let start = match &self.start {
            Some(text) => display::parse_time_arg(text)?,
            None => span
                .map(|(first, _)| first)
                .context("No samples to take a start time from")?,
        };
        let end = match &self.end {
            Some(text) => display::parse_time_arg(text)?,
            // A single-row export spans no time; open the window by one tick.
            None => span
                .map(|(_, last)| last)
                .context("No samples to take an end time from")?
                .max(start + TimeDelta::milliseconds(1)),
        };
        Ok((start, end))
    }
}

/// An export imported into a fresh session.
pub(crate) struct Loaded {
    pub(crate) service: AnalysisService,
    pub(crate) session_id: SessionId,
    pub(crate) counters: Vec<CounterSeries>,
}

/// Imports `path` into a new in-memory session.
///
/// The file is rejected before reading if it exceeds the configured cap, and
/// Ctrl-C cancels the import.
pub(crate) async fn load(
    path: &Path,
    settings: &Settings,
    scale: ValueScale,
    quiet: bool,
) -> Result<Loaded> {
    let file = open_export(path, settings.max_upload_bytes).await?;
    let service = AnalysisService::in_memory(scale);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let progress = display::spinner(quiet, format!("Importing {}", path.display()));
    let uploaded = service.upload(file, &cancel).await;
    interrupt.abort();

    let UploadResult {
        session_id,
        counters,
    } = uploaded.with_context(|| format!("Failed to import {}", path.display()))?;
    progress.finish_with_message(format!("Imported {} counters", counters.len()));

    Ok(Loaded {
        service,
        session_id,
        counters,
    })
}

/// Opens an export, refusing files over `max_bytes`.
pub(crate) async fn open_export(path: &Path, max_bytes: u64) -> Result<tokio::fs::File> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    if metadata.len() > max_bytes {
        bail!(
            "{} is {} bytes, over the {} byte upload limit",
            path.display(),
            metadata.len(),
            max_bytes
        );
    }

    tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Cannot open {}", path.display()))
}
