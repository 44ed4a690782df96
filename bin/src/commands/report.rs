//! Report command implementation.
//!
//! Runs the same analysis as `analyze` and writes the rendered report to disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use perfslope_lib::prelude::*;

use super::{AnalysisArgs, load};
use crate::display::ReportKind;
use crate::settings::Settings;

/// Analyse `path` and write a report.
///
/// `output` may name a file or an existing directory; the generated file name
/// is used when it is a directory or absent.
pub(crate) async fn report(
    path: &Path,
    args: &AnalysisArgs,
    settings: &Settings,
    format: ReportKind,
    chart: Option<&Path>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let chart = match chart {
        Some(chart) => tokio::fs::read_to_string(chart)
            .await
            .with_context(|| format!("Cannot read chart {}", chart.display()))?,
        None => String::new(),
    };

    let loaded = load(path, settings, args.scale(settings)?, quiet).await?;
    let (start, end) = args.window(&loaded.counters)?;

    let request = ReportRequest::new(loaded.session_id.to_string(), start, end)
        .with_threshold(args.threshold(settings))
        .with_format(format.tag())
        .with_chart(chart.trim());
    let report = loaded
        .service
        .report(&request)
        .context("Report generation failed")?;

    let target = output_path(output, &report.file_name);
    tokio::fs::write(&target, report.content.as_bytes())
        .await
        .with_context(|| format!("Cannot write {}", target.display()))?;

    if !quiet {
        println!("Wrote {} report to {}", format, target.display());
    }
    Ok(())
}

fn output_path(output: Option<PathBuf>, file_name: &str) -> PathBuf {
    match output {
        Some(dir) if dir.is_dir() => dir.join(file_name),
        Some(file) => file,
        None => PathBuf::from(file_name),
    }
}
