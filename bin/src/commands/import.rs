//! Import command implementation.
//!
//! Parses an export and lists its counters without analysing them.

use std::path::Path;

use anyhow::{Context, Result};

use super::load;
use crate::display::{self, CounterSummary};
use crate::settings::Settings;

/// Import `path` and print its counters.
pub(crate) async fn import(
    path: &Path,
    settings: &Settings,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let loaded = load(path, settings, settings.value_scale()?, quiet).await?;

    if json {
        let summaries: Vec<CounterSummary<'_>> =
            loaded.counters.iter().map(CounterSummary::from).collect();
        let out = serde_json::to_string_pretty(&summaries).context("Failed to encode counters")?;
        println!("{out}");
        return Ok(());
    }

    if loaded.counters.is_empty() {
        println!("No counters found in {}", path.display());
        return Ok(());
    }

    display::print_counters(&loaded.counters);
    Ok(())
}
