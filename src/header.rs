//! Header row initialization for a destination sheet.
//!
//! Writes the header names into row 1 of the sheet unless row 1 already
//! holds something other than a header.

use crate::error::{AppendError, Result};
use crate::models::HeaderStatus;
use crate::store::TabularStore;
use tracing::{debug, info, warn};

/// Write `headers` into row 1 of `sheet`
///
/// Row 1 is overwritten when its first cell is empty or already equals the
/// first header name. Any other content is left alone and reported as
/// [`HeaderStatus::HeadersPresent`].
pub fn initialize_headers<S: TabularStore + ?Sized>(
    store: &S,
    sheet: &str,
    headers: &[String],
) -> Result<HeaderStatus> {
    if !store.has_sheet(sheet)? {
        return Err(AppendError::destination_not_found(sheet));
    }

    let first_cell = store
        .read_rows(sheet, 1, 1)?
        .into_iter()
        .next()
        .and_then(|row| row.into_iter().next())
        .unwrap_or_default();
    debug!("Row 1 of {} starts with {:?}", sheet, first_cell);

    let header_start = headers.first().map(String::as_str).unwrap_or_default();
    if !first_cell.is_empty() && first_cell != header_start {
        warn!("Headers may already exist. First row contains data.");
        return Ok(HeaderStatus::HeadersPresent);
    }

    store.write_block(sheet, 1, &[headers.to_vec()])?;
    info!("Headers set successfully on {}", sheet);
    Ok(HeaderStatus::Written)
}
