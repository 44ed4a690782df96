//! PDH-CSV export reader.

use std::path::Path;

use csv_async::{AsyncReaderBuilder, StringRecord};
use perfslope_types::{CounterSeries, DataPoint};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;

use crate::{ImportError, decode_text, parse_header, parse_timestamp};

/// Rows parsed between yields to the runtime.
///
/// The tokenizer reads from memory and never returns `Pending`, so without
/// these yields a cancelling task on the same thread would never run.
const ROWS_PER_YIELD: usize = 1024;

/// Parses a value cell.
///
/// Commas are read as thousands separators. Empty, whitespace-only,
/// non-numeric and non-finite cells become `NaN`.
#[must_use]
pub fn parse_value(cell: &str) -> f64 {
    let cell = cell.trim();
    let parsed = if cell.contains(',') {
        cell.replace(',', "").parse::<f64>()
    } else {
        cell.parse::<f64>()
    };
    parsed
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(f64::NAN)
}

/// Reads a whole PDH-CSV export into one series per counter column.
///
/// # Errors
///
/// Returns an error if the stream cannot be read or holds no header record.
pub async fn import_counters<R>(reader: R) -> Result<Vec<CounterSeries>, ImportError>
where
    R: AsyncRead + Unpin,
{
    import_counters_with_cancel(reader, &CancellationToken::new()).await
}

/// Reads a whole PDH-CSV export, stopping early when `cancel` fires.
///
/// Cancellation is checked while the input is read and before every data row.
///
/// # Errors
///
/// Returns [`ImportError::Cancelled`] if the token fires, or any error
/// [`import_counters`] can return.
pub async fn import_counters_with_cancel<R>(
    mut reader: R,
    cancel: &CancellationToken,
) -> Result<Vec<CounterSeries>, ImportError>
where
    R: AsyncRead + Unpin,
{
    let mut raw = Vec::new();
    tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(ImportError::Cancelled),
        read = reader.read_to_end(&mut raw) => {
            read?;
        }
    }

    parse_export(&raw, cancel).await
}

/// Opens and imports an export file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, or any error
/// [`import_counters_with_cancel`] can return.
pub async fn import_file(
    path: impl AsRef<Path>,
    cancel: &CancellationToken,
) -> Result<Vec<CounterSeries>, ImportError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "importing export file");
    let file = tokio::fs::File::open(path).await?;
    import_counters_with_cancel(file, cancel).await
}

async fn parse_export(
    raw: &[u8],
    cancel: &CancellationToken,
) -> Result<Vec<CounterSeries>, ImportError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    let (text, encoding) = decode_text(raw);
    let mut csv = AsyncReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .create_reader(text.as_bytes());

    let mut record = StringRecord::new();
    if !csv.read_record(&mut record).await? {
        return Err(ImportError::MalformedInput(
            "export has no header record".to_string(),
        ));
    }

    // The first column is the timestamp; its header names the log format.
    let mut series: Vec<CounterSeries> = record
        .iter()
        .skip(1)
        .map(|header| CounterSeries::new(parse_header(header), Vec::new()))
        .collect();
    if series.is_empty() {
        tracing::debug!(%encoding, "export has no counter columns");
        return Ok(series);
    }

    let mut rows = 0usize;
    let mut skipped = 0usize;
    for read in 1usize.. {
        if read % ROWS_PER_YIELD == 0 {
            tokio::task::yield_now().await;
        }
        if cancel.is_cancelled() {
            return Err(ImportError::Cancelled);
        }
        if !csv.read_record(&mut record).await? {
            break;
        }

        let Some(timestamp) = record.get(0).and_then(parse_timestamp) else {
            skipped += 1;
            tracing::trace!(
                line = record.position().map_or(0, |pos| pos.line()),
                "skipping row with unreadable timestamp"
            );
            continue;
        };

        for (column, counter) in series.iter_mut().enumerate() {
            let value = record.get(column + 1).map_or(f64::NAN, parse_value);
            counter.data_points.push(DataPoint::new(timestamp, value));
        }
        rows += 1;
    }

    tracing::debug!(
        %encoding,
        counters = series.len(),
        rows,
        skipped,
        "imported export"
    );
    Ok(series)
}
