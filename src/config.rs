//! Configuration management and validation.
//!
//! Holds the fixed destination (workbook location and sheet name), the
//! schema shape and the delimiter default. A configuration value is passed
//! to the pipeline at construction time.

use crate::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_DELIMITER, DEFAULT_SHEET_NAME, DEFAULT_WORKBOOK_DIR,
    DEFAULT_WORKBOOK_NAME, HEADER_NAMES, QUOTE_CHAR, SCHEMA_WIDTH,
};
use crate::error::{AppendError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for the append pipeline and its adapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppendConfig {
    /// Workbook directory holding one file per sheet
    pub store_path: PathBuf,

    /// Sheet that receives appended rows
    pub sheet_name: String,

    /// Default field delimiter (overridable per call)
    pub delimiter: char,

    /// Required number of fields per row
    pub schema_width: usize,

    /// Header names written by header initialization
    pub headers: Vec<String>,

    /// Socket address for the HTTP server
    pub bind_address: String,
}

impl Default for AppendConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            delimiter: DEFAULT_DELIMITER,
            schema_width: SCHEMA_WIDTH,
            headers: HEADER_NAMES.iter().map(|h| h.to_string()).collect(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

/// Default workbook under the user data directory, or the working directory
/// when no data directory is known
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_WORKBOOK_DIR)
        .join(DEFAULT_WORKBOOK_NAME)
}

impl AppendConfig {
    /// Load configuration from a JSON file; missing keys take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            AppendError::configuration(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Set the workbook directory
    pub fn with_store_path(mut self, store_path: impl Into<PathBuf>) -> Self {
        self.store_path = store_path.into();
        self
    }

    /// Set the destination sheet
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    /// Set the default delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the HTTP bind address
    pub fn with_bind_address(mut self, bind_address: impl Into<String>) -> Self {
        self.bind_address = bind_address.into();
        self
    }

    /// Set a schema width and matching header names
    pub fn with_schema(mut self, headers: Vec<String>) -> Self {
        self.schema_width = headers.len();
        self.headers = headers;
        self
    }

    /// Check the configuration for values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        validate_delimiter(self.delimiter)?;

        if self.schema_width == 0 {
            return Err(AppendError::configuration(
                "Schema width must be greater than 0",
            ));
        }

        if self.headers.len() != self.schema_width {
            return Err(AppendError::configuration(format!(
                "Expected {} header names, found {}",
                self.schema_width,
                self.headers.len()
            )));
        }

        if self.sheet_name.trim().is_empty() {
            return Err(AppendError::configuration("Sheet name must not be empty"));
        }

        Ok(())
    }
}

/// Reject delimiters that collide with quoting or line splitting
pub fn validate_delimiter(delimiter: char) -> Result<()> {
    if delimiter == QUOTE_CHAR {
        return Err(AppendError::configuration(
            "Delimiter cannot be the quote character",
        ));
    }
    if delimiter == '\n' || delimiter == '\r' {
        return Err(AppendError::configuration(
            "Delimiter cannot be a line break",
        ));
    }
    Ok(())
}
