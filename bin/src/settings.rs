//! Layered CLI settings.
//!
//! Sources, lowest priority first: built-in defaults, the user config file in
//! the platform config directory, the file given with `--config`, then
//! `PERFSLOPE_*` environment variables. Command-line flags override all of
//! them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use directories::ProjectDirs;
use perfslope_lib::ValueScale;
use serde::Deserialize;

/// Environment variable prefix.
const ENV_PREFIX: &str = "PERFSLOPE";

/// Resolved settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Settings {
    /// Warning threshold per 10 minutes.
    pub(crate) threshold_per_10min: f64,
    /// Unit slopes are reported in (`native` or `kb`).
    pub(crate) value_unit: String,
    /// Largest export accepted, in bytes.
    pub(crate) max_upload_bytes: u64,
}

impl Settings {
    /// Loads settings from every source.
    pub(crate) fn load(config_file: Option<&Path>) -> Result<Self> {
        Self::build(
            user_config_path(),
            config_file,
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
    }

    fn build(
        user_file: Option<PathBuf>,
        config_file: Option<&Path>,
        env: Environment,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("threshold_per_10min", 50.0)?
            .set_default("value_unit", "kb")?
            .set_default("max_upload_bytes", 50_i64 * 1024 * 1024)?;

        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Self = builder
            .add_source(env)
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        tracing::debug!(?settings, "loaded settings");
        Ok(settings)
    }

    /// Returns the configured value scale.
    pub(crate) fn value_scale(&self) -> Result<ValueScale> {
        self.value_unit
            .parse()
            .with_context(|| format!("Invalid value_unit in configuration: {}", self.value_unit))
    }
}

/// Returns the user config file path, e.g. `~/.config/perfslope/config.toml`.
fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "perfslope").map(|dirs| dirs.config_dir().join("config.toml"))
}
