//! In-memory sheet store

use super::{TabularStore, last_occupied, place_block, slice_rows};
use crate::error::{AppendError, Result};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Sheets held in memory, each a grid of fixed width
#[derive(Debug)]
pub struct MemoryStore {
    width: usize,
    sheets: RwLock<BTreeMap<String, Vec<Vec<String>>>>,
}

impl MemoryStore {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            sheets: RwLock::new(BTreeMap::new()),
        }
    }

    /// Store with one empty sheet already created
    pub fn with_sheet(width: usize, sheet: &str) -> Self {
        let store = Self::new(width);
        if let Ok(mut sheets) = store.sheets.write() {
            sheets.insert(sheet.to_string(), Vec::new());
        }
        store
    }

    fn poisoned() -> AppendError {
        AppendError::storage_write("Sheet store lock poisoned")
    }
}

impl TabularStore for MemoryStore {
    fn has_sheet(&self, sheet: &str) -> Result<bool> {
        let sheets = self.sheets.read().map_err(|_| Self::poisoned())?;
        Ok(sheets.contains_key(sheet))
    }

    fn create_sheet(&self, sheet: &str) -> Result<()> {
        let mut sheets = self.sheets.write().map_err(|_| Self::poisoned())?;
        sheets.entry(sheet.to_string()).or_default();
        Ok(())
    }

    fn sheet_names(&self) -> Result<Vec<String>> {
        let sheets = self.sheets.read().map_err(|_| Self::poisoned())?;
        Ok(sheets.keys().cloned().collect())
    }

    fn last_row(&self, sheet: &str) -> Result<usize> {
        let sheets = self.sheets.read().map_err(|_| Self::poisoned())?;
        let grid = sheets
            .get(sheet)
            .ok_or_else(|| AppendError::destination_not_found(sheet))?;
        Ok(last_occupied(grid))
    }

    fn write_block(&self, sheet: &str, start_row: usize, values: &[Vec<String>]) -> Result<()> {
        let mut sheets = self.sheets.write().map_err(|_| Self::poisoned())?;
        let grid = sheets
            .get_mut(sheet)
            .ok_or_else(|| AppendError::destination_not_found(sheet))?;

        // Stage on a copy so a rejected block leaves the sheet unchanged
        let mut staged = grid.clone();
        place_block(&mut staged, start_row, values, self.width)?;
        *grid = staged;
        Ok(())
    }

    fn read_rows(&self, sheet: &str, start_row: usize, count: usize) -> Result<Vec<Vec<String>>> {
        let sheets = self.sheets.read().map_err(|_| Self::poisoned())?;
        let grid = sheets
            .get(sheet)
            .ok_or_else(|| AppendError::destination_not_found(sheet))?;
        Ok(slice_rows(grid, start_row, count))
    }
}
