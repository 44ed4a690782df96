//! perfslope CLI - find Performance Monitor counters that keep rising.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod settings;

use commands::AnalysisArgs;
use display::ReportKind;
use settings::Settings;

#[derive(Parser)]
#[command(name = "perfslope")]
#[command(about = "Trend analysis for Performance Monitor counter exports", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a PDH-CSV export and list its counters
    Import {
        /// Counter export written by Performance Monitor or relog
        file: PathBuf,

        /// Print the counters as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute per-counter slopes and flag the ones over the threshold
    Analyze {
        /// Counter export written by Performance Monitor or relog
        file: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Print the results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write an HTML or Markdown trend report
    Report {
        /// Counter export written by Performance Monitor or relog
        file: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        /// Report format
        #[arg(short, long, value_enum, default_value = "html")]
        format: ReportKind,

        /// Text file holding the chart image as base64 or a data: URI
        #[arg(long, value_name = "FILE")]
        chart: Option<PathBuf>,

        /// Output file or directory. Defaults to a timestamped file name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = Settings::load(cli.config.as_deref())?;

    match command {
        Commands::Import { file, json } => {
            commands::import::import(&file, &settings, json, cli.quiet).await
        }
        Commands::Analyze {
            file,
            analysis,
            json,
        } => commands::analyze::analyze(&file, &analysis, &settings, json, cli.quiet).await,
        Commands::Report {
            file,
            analysis,
            format,
            chart,
            output,
        } => {
            commands::report::report(
                &file,
                &analysis,
                &settings,
                format,
                chart.as_deref(),
                output,
                cli.quiet,
            )
            .await
        }
    }
}
