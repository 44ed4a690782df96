//! Import error types.

use thiserror::Error;

/// Errors that can occur while importing a PDH-CSV export.
///
/// Dirty cells, rows and headers are never errors; only a stream that has
/// content but no header record is rejected.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The stream has content but no header row.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The CSV tokenizer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The import was cancelled before it completed.
    #[error("Import cancelled")]
    Cancelled,
}
