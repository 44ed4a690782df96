//! Analyze command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use perfslope_lib::prelude::*;

use super::{AnalysisArgs, load};
use crate::display;
use crate::settings::Settings;

/// Compute slopes for every counter in `path` and print them.
pub(crate) async fn analyze(
    path: &Path,
    args: &AnalysisArgs,
    settings: &Settings,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let scale = args.scale(settings)?;
    let threshold = args.threshold(settings);
    let loaded = load(path, settings, scale, quiet).await?;
    let (start, end) = args.window(&loaded.counters)?;

    let request =
        SlopeRequest::new(loaded.session_id.to_string(), start, end).with_threshold(threshold);
    let response = loaded
        .service
        .slope(&request)
        .context("Trend analysis failed")?;

    if json {
        let out = serde_json::to_string_pretty(&response).context("Failed to encode results")?;
        println!("{out}");
        return Ok(());
    }

    let window = TimeWindow::new(start, end)?;
    display::print_results(&response.results, &window, threshold, scale.unit_label());
    Ok(())
}
