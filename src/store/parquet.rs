//! Parquet-backed workbook store
//!
//! A workbook is a directory; each sheet is one Parquet file named
//! `<sheet>.parquet` with string columns named by spreadsheet letters
//! (`A`, `B`, ...). Every row of the sheet, header row included, is a data
//! row of the file, so row numbers match what a spreadsheet would show.
//!
//! A block write rewrites the whole sheet into a temporary file in the
//! workbook directory and renames it over the old file. Readers see either
//! the sheet before the block or after it.

use super::{TabularStore, column_letter, last_occupied, place_block, slice_rows};
use crate::constants::SHEET_FILE_EXTENSION;
use crate::error::{AppendError, Result};
use polars::prelude::{
    Column, DataFrame, ParquetReader, ParquetWriter, PolarsResult, SerReader, StringChunked,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Workbook directory with one Parquet file per sheet
#[derive(Debug, Clone)]
pub struct ParquetStore {
    root: PathBuf,
    width: usize,
}

impl ParquetStore {
    /// Open a workbook directory; it is created on first sheet creation
    pub fn new(root: impl Into<PathBuf>, width: usize) -> Self {
        Self {
            root: root.into(),
            width,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn sheet_path(&self, sheet: &str) -> Result<PathBuf> {
        if sheet.is_empty()
            || sheet.contains(['/', '\\'])
            || sheet == "."
            || sheet == ".."
        {
            return Err(AppendError::configuration(format!(
                "Invalid sheet name: \"{}\"",
                sheet
            )));
        }
        Ok(self
            .root
            .join(format!("{}.{}", sheet, SHEET_FILE_EXTENSION)))
    }

    fn existing_sheet_path(&self, sheet: &str) -> Result<PathBuf> {
        let path = self.sheet_path(sheet)?;
        if !path.is_file() {
            return Err(AppendError::destination_not_found(sheet));
        }
        Ok(path)
    }

    /// Read a sheet file into a grid of rows
    fn load_grid(&self, path: &Path) -> Result<Vec<Vec<String>>> {
        let file = File::open(path)?;
        let df = ParquetReader::new(file).finish()?;

        let columns: Vec<&StringChunked> = df
            .get_columns()
            .iter()
            .map(|column| column.str())
            .collect::<PolarsResult<_>>()?;

        let grid = (0..df.height())
            .map(|index| {
                columns
                    .iter()
                    .map(|column| column.get(index).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();

        Ok(grid)
    }

    /// Replace a sheet file with the given grid
    fn save_grid(&self, path: &Path, grid: &[Vec<String>]) -> Result<()> {
        let columns: Vec<Column> = (0..self.width)
            .map(|index| {
                let values: Vec<String> = grid
                    .iter()
                    .map(|row| row.get(index).cloned().unwrap_or_default())
                    .collect();
                Column::new(column_letter(index).into(), values)
            })
            .collect();
        let mut df = DataFrame::new(columns)?;

        let mut staged = NamedTempFile::new_in(&self.root)?;
        ParquetWriter::new(staged.as_file_mut()).finish(&mut df)?;
        staged.persist(path).map_err(|e| AppendError::Io(e.error))?;

        debug!("Wrote {} rows to {}", grid.len(), path.display());
        Ok(())
    }
}

impl TabularStore for ParquetStore {
    fn has_sheet(&self, sheet: &str) -> Result<bool> {
        Ok(self.sheet_path(sheet)?.is_file())
    }

    fn create_sheet(&self, sheet: &str) -> Result<()> {
        let path = self.sheet_path(sheet)?;
        if path.is_file() {
            return Ok(());
        }
        std::fs::create_dir_all(&self.root)?;
        self.save_grid(&path, &[])
    }

    fn sheet_names(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == SHEET_FILE_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn last_row(&self, sheet: &str) -> Result<usize> {
        let path = self.existing_sheet_path(sheet)?;
        Ok(last_occupied(&self.load_grid(&path)?))
    }

    fn write_block(&self, sheet: &str, start_row: usize, values: &[Vec<String>]) -> Result<()> {
        let path = self.existing_sheet_path(sheet)?;
        let mut grid = self.load_grid(&path)?;
        place_block(&mut grid, start_row, values, self.width)?;
        self.save_grid(&path, &grid)
    }

    fn read_rows(&self, sheet: &str, start_row: usize, count: usize) -> Result<Vec<Vec<String>>> {
        let path = self.existing_sheet_path(sheet)?;
        Ok(slice_rows(&self.load_grid(&path)?, start_row, count))
    }
}
