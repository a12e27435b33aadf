//! Error handling for sheet append operations.
//!
//! Provides the failure taxonomy for payload extraction, schema validation,
//! destination lookup and store writes.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("CSV data is empty")]
    EmptyInput,

    #[error(
        "No CSV data found in request. Send CSV data in request body or as csvData parameter."
    )]
    NoPayload,

    #[error("Sheet \"{sheet}\" not found")]
    DestinationNotFound { sheet: String },

    #[error("No valid rows found. Each row must have exactly {expected} columns. ({rows} rows rejected)")]
    SchemaMismatch { expected: usize, rows: usize },

    #[error("{message}")]
    StorageWrite { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl AppendError {
    /// Create a destination-not-found error for a sheet
    pub fn destination_not_found(sheet: impl Into<String>) -> Self {
        Self::DestinationNotFound {
            sheet: sheet.into(),
        }
    }

    /// Create a storage write error
    pub fn storage_write(message: impl Into<String>) -> Self {
        Self::StorageWrite {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppendError>;
