//! Append pipeline.
//!
//! Runs one payload through destination check, row assembly, schema
//! validation and the bulk append, synchronously and start to finish. The
//! destination is fixed by the [`AppendConfig`] given at construction.

use crate::appender::append_batch;
use crate::config::{AppendConfig, validate_delimiter};
use crate::error::{AppendError, Result};
use crate::header::initialize_headers;
use crate::models::{AppendOutcome, HeaderStatus};
use crate::parser::assemble_rows;
use crate::store::TabularStore;
use crate::validator::{require_accepted, validate_rows};
use tracing::{debug, info};

/// Pipeline bound to one store and one destination sheet
#[derive(Debug)]
pub struct AppendProcessor<S> {
    store: S,
    config: AppendConfig,
}

impl<S: TabularStore> AppendProcessor<S> {
    /// Create a processor after validating the configuration
    pub fn new(store: S, config: AppendConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AppendConfig {
        &self.config
    }

    /// Append a payload using the configured delimiter
    pub fn append(&self, payload: &str) -> Result<AppendOutcome> {
        self.append_with_delimiter(payload, self.config.delimiter)
    }

    /// Append a payload using `delimiter` for this call only
    pub fn append_with_delimiter(&self, payload: &str, delimiter: char) -> Result<AppendOutcome> {
        validate_delimiter(delimiter)?;
        let sheet = self.config.sheet_name.as_str();

        // Destination must exist before any content is looked at
        if !self.store.has_sheet(sheet)? {
            return Err(AppendError::destination_not_found(sheet));
        }

        let rows = assemble_rows(payload, delimiter);
        if rows.is_empty() {
            info!("No data to append");
            return Ok(AppendOutcome::NoData);
        }

        let report = validate_rows(rows, self.config.schema_width);
        let rows_rejected = report.rejected.len();
        let batch = require_accepted(report, self.config.schema_width)?;
        debug!(
            "Appending {} rows to {} ({} rejected)",
            batch.len(),
            sheet,
            rows_rejected
        );

        let mut summary = append_batch(&self.store, sheet, &batch)?;
        summary.rows_rejected = rows_rejected;
        Ok(AppendOutcome::Appended(summary))
    }

    /// Write the configured header names into row 1 of the destination sheet
    pub fn initialize_headers(&self) -> Result<HeaderStatus> {
        initialize_headers(&self.store, &self.config.sheet_name, &self.config.headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{SAMPLE_PAYLOAD, SCHEMA_WIDTH};
    use crate::store::MemoryStore;

    fn processor() -> AppendProcessor<MemoryStore> {
        AppendProcessor::new(
            MemoryStore::with_sheet(SCHEMA_WIDTH, "Sheet1"),
            AppendConfig::default(),
        )
        .unwrap()
    }

    fn nine(tag: &str) -> String {
        let mut fields = vec![format!("Type{}", tag)];
        fields.extend((1..=8).map(|i| format!("Value{}{}", i, tag)));
        fields.join(",")
    }

    #[test]
    fn test_empty_payload_is_no_data() {
        let processor = processor();
        assert_eq!(processor.append("").unwrap(), AppendOutcome::NoData);
        assert_eq!(processor.append(" \n\t\n").unwrap(), AppendOutcome::NoData);
        assert_eq!(processor.store().last_row("Sheet1").unwrap(), 0);
    }

    #[test]
    fn test_all_rows_wrong_width() {
        let processor = processor();
        let result = processor.append("a,b,c\nd,e");
        assert!(matches!(
            result,
            Err(AppendError::SchemaMismatch {
                expected: 9,
                rows: 2
            })
        ));
        assert_eq!(processor.store().last_row("Sheet1").unwrap(), 0);
    }

    #[test]
    fn test_sample_payload_appends_three_rows() {
        let processor = processor();
        processor.initialize_headers().unwrap();

        let outcome = processor.append(SAMPLE_PAYLOAD).unwrap();
        assert_eq!(outcome.rows_written(), 3);
        assert_eq!(outcome.message(), "Successfully appended 3 rows");

        let rows = processor.store().read_rows("Sheet1", 2, 3).unwrap();
        assert_eq!(rows[0][0], "TypeA");
        assert_eq!(rows[2][8], "Value8C");
    }

    #[test]
    fn test_partial_rejection_keeps_order() {
        let processor = processor();
        let payload = format!("{}\nshort,row\n{}\n", nine("A"), nine("B"));

        match processor.append(&payload).unwrap() {
            AppendOutcome::Appended(summary) => {
                assert_eq!(summary.rows_written, 2);
                assert_eq!(summary.rows_rejected, 1);
                assert_eq!(summary.first_row, 1);
                assert_eq!(summary.last_row, 2);
            }
            other => panic!("expected append, got {:?}", other),
        }

        let rows = processor.store().read_rows("Sheet1", 1, 2).unwrap();
        assert_eq!(rows[0][0], "TypeA");
        assert_eq!(rows[1][0], "TypeB");
    }

    #[test]
    fn test_missing_sheet_checked_before_parsing() {
        let processor =
            AppendProcessor::new(MemoryStore::new(SCHEMA_WIDTH), AppendConfig::default()).unwrap();

        // Even an empty payload reports the missing destination
        assert!(matches!(
            processor.append(""),
            Err(AppendError::DestinationNotFound { .. })
        ));
    }

    #[test]
    fn test_per_call_delimiter() {
        let processor = processor();
        let payload = nine("A").replace(',', ";");

        assert!(matches!(
            processor.append(&payload),
            Err(AppendError::SchemaMismatch { .. })
        ));
        assert_eq!(
            processor
                .append_with_delimiter(&payload, ';')
                .unwrap()
                .rows_written(),
            1
        );
        assert!(matches!(
            processor.append_with_delimiter(&payload, '"'),
            Err(AppendError::Configuration { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AppendConfig::default().with_delimiter('"');
        assert!(AppendProcessor::new(MemoryStore::new(SCHEMA_WIDTH), config).is_err());
    }
}
