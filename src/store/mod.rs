//! Tabular stores that receive appended rows
//!
//! A store holds named sheets, each a grid of string cells addressed by
//! 1-based row numbers the way a spreadsheet is. The append executor only
//! needs the position of the last occupied row and a single bulk write of a
//! block of rows starting at a given row.
//!
//! ## Implementations
//!
//! - [`memory::MemoryStore`] - sheets held in memory
//! - [`parquet::ParquetStore`] - a workbook directory with one Parquet file per sheet
//!
//! Neither implementation locks between reading the last row and writing a
//! block, so concurrent appends to the same sheet can overwrite each other.

pub mod memory;
pub mod parquet;

pub use memory::MemoryStore;
pub use parquet::ParquetStore;

use crate::error::{AppendError, Result};

/// Sheet-addressed grid storage
pub trait TabularStore: Send + Sync {
    /// Whether the named sheet exists
    fn has_sheet(&self, sheet: &str) -> Result<bool>;

    /// Create an empty sheet; existing sheets are left untouched
    fn create_sheet(&self, sheet: &str) -> Result<()>;

    /// Names of all sheets, sorted
    fn sheet_names(&self) -> Result<Vec<String>>;

    /// 1-based index of the last row holding any non-empty cell, 0 when empty
    fn last_row(&self, sheet: &str) -> Result<usize>;

    /// Write `values` as one contiguous block whose first row is `start_row`
    ///
    /// Rows between the current end of the sheet and `start_row` are filled
    /// with empty cells. Existing rows in the block's range are overwritten.
    fn write_block(&self, sheet: &str, start_row: usize, values: &[Vec<String>]) -> Result<()>;

    /// Read up to `count` rows starting at `start_row`
    fn read_rows(&self, sheet: &str, start_row: usize, count: usize) -> Result<Vec<Vec<String>>>;
}

/// Last row with content in a grid
pub(crate) fn last_occupied(grid: &[Vec<String>]) -> usize {
    grid.iter()
        .rposition(|row| row.iter().any(|cell| !cell.is_empty()))
        .map_or(0, |index| index + 1)
}

/// Place a block into a grid of fixed width
pub(crate) fn place_block(
    grid: &mut Vec<Vec<String>>,
    start_row: usize,
    values: &[Vec<String>],
    width: usize,
) -> Result<()> {
    if start_row == 0 {
        return Err(AppendError::storage_write(
            "Row numbers start at 1; cannot write at row 0",
        ));
    }

    if let Some(row) = values.iter().find(|row| row.len() != width) {
        return Err(AppendError::storage_write(format!(
            "The number of columns in the data does not match the number of columns in the range. The data has {} but the range has {}.",
            row.len(),
            width
        )));
    }

    let end = start_row - 1 + values.len();
    if grid.len() < end {
        grid.resize(end, vec![String::new(); width]);
    }

    for (offset, row) in values.iter().enumerate() {
        grid[start_row - 1 + offset] = row.clone();
    }

    Ok(())
}

/// Slice of a grid as owned rows
pub(crate) fn slice_rows(grid: &[Vec<String>], start_row: usize, count: usize) -> Vec<Vec<String>> {
    if start_row == 0 {
        return Vec::new();
    }
    grid.iter().skip(start_row - 1).take(count).cloned().collect()
}

/// Spreadsheet column letter for a 0-based column index (A, B, ..., Z, AA, ...)
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}
