//! Bulk append of validated rows onto the end of a sheet.
//!
//! The batch is written as one block directly below the sheet's last
//! occupied row. Reading the last row and writing the block are two separate
//! store calls with no lock held between them.

use crate::error::{AppendError, Result};
use crate::models::{AppendSummary, Row};
use crate::store::TabularStore;
use tracing::{debug, info};

/// Append `batch` to `sheet` in one write and report where it landed
///
/// The batch must be non-empty. Write failures are reported as
/// [`AppendError::StorageWrite`] and are not retried.
pub fn append_batch<S: TabularStore + ?Sized>(
    store: &S,
    sheet: &str,
    batch: &[Row],
) -> Result<AppendSummary> {
    if batch.is_empty() {
        return Err(AppendError::storage_write("Cannot append an empty batch"));
    }

    let last_row = store.last_row(sheet)?;
    let first_row = last_row + 1;
    let values: Vec<Vec<String>> = batch.iter().map(|row| row.fields.clone()).collect();

    debug!(
        "Writing {} rows to sheet {} starting at row {}",
        values.len(),
        sheet,
        first_row
    );

    store
        .write_block(sheet, first_row, &values)
        .map_err(|e| match e {
            AppendError::StorageWrite { .. } | AppendError::DestinationNotFound { .. } => e,
            other => AppendError::storage_write(other.to_string()),
        })?;

    info!("Successfully appended {} rows to {}", values.len(), sheet);

    Ok(AppendSummary {
        sheet: sheet.to_string(),
        rows_written: values.len(),
        first_row,
        last_row: last_row + values.len(),
        rows_rejected: 0,
    })
}
