//! Sheet Appender Library
//!
//! Parses raw delimited-text payloads into fixed-width rows and appends the
//! valid rows as one block onto the end of a sheet.
//!
//! This library provides tools for:
//! - Quote-aware tokenizing of delimited lines
//! - Assembling payloads into rows and validating their width
//! - Appending validated rows below the last occupied row of a sheet
//! - Parquet-backed and in-memory sheet stores
//! - Header initialization, an HTTP endpoint and a CLI
//!
//! ```rust
//! use sheet_appender::{AppendConfig, AppendProcessor, MemoryStore, TabularStore};
//!
//! # fn example() -> sheet_appender::Result<()> {
//! let store = MemoryStore::with_sheet(9, "Sheet1");
//! let processor = AppendProcessor::new(store, AppendConfig::default())?;
//! let outcome = processor.append("T,1,2,3,4,5,6,7,8")?;
//!
//! assert_eq!(outcome.rows_written(), 1);
//! assert_eq!(processor.store().last_row("Sheet1")?, 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod appender;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod header;
pub mod models;
pub mod parser;
pub mod processor;
pub mod request;
pub mod server;
pub mod store;
pub mod validator;

// Re-export commonly used types
pub use config::AppendConfig;
pub use error::{AppendError, Result};
pub use models::{AppendOutcome, AppendSummary, HeaderStatus, Row};
pub use processor::AppendProcessor;
pub use store::{MemoryStore, ParquetStore, TabularStore};
