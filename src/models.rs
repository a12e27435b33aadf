//! Core data structures for the append pipeline.
//!
//! Defines parsed rows, validation partitions and the outcome reported
//! back to callers after an append.

use crate::constants::NO_DATA_MESSAGE;

/// One parsed line of a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based line number within the payload
    pub line: usize,
    pub fields: Vec<String>,
}

impl Row {
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Number of fields in the row
    pub fn width(&self) -> usize {
        self.fields.len()
    }
}

/// A row dropped by schema validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub row: Row,
    pub expected: usize,
}

/// Result of partitioning rows by width
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Rows with the required width, in payload order
    pub accepted: Vec<Row>,
    /// Rows with any other width, in payload order
    pub rejected: Vec<RejectedRow>,
}

impl ValidationReport {
    pub fn total_rows(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}

/// Rows committed to the store by one append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendSummary {
    pub sheet: String,
    pub rows_written: usize,
    /// 1-based store row of the first written row
    pub first_row: usize,
    /// 1-based store row of the last written row
    pub last_row: usize,
    pub rows_rejected: usize,
}

/// Non-failing result of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// Payload held no non-blank lines; the store was not touched
    NoData,
    Appended(AppendSummary),
}

impl AppendOutcome {
    pub fn rows_written(&self) -> usize {
        match self {
            AppendOutcome::NoData => 0,
            AppendOutcome::Appended(summary) => summary.rows_written,
        }
    }

    /// Human-readable summary used in responses and CLI output
    pub fn message(&self) -> String {
        match self {
            AppendOutcome::NoData => NO_DATA_MESSAGE.to_string(),
            AppendOutcome::Appended(summary) => {
                format!("Successfully appended {} rows", summary.rows_written)
            }
        }
    }
}

/// Result of header initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStatus {
    /// Header row was written
    Written,
    /// Row 1 already holds other data and was left alone
    HeadersPresent,
}

impl HeaderStatus {
    pub fn message(&self) -> &'static str {
        match self {
            HeaderStatus::Written => "Headers set successfully",
            HeaderStatus::HeadersPresent => "Headers may already exist",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(AppendOutcome::NoData.message(), "No data to append");
        assert_eq!(AppendOutcome::NoData.rows_written(), 0);

        let outcome = AppendOutcome::Appended(AppendSummary {
            sheet: "Sheet1".to_string(),
            rows_written: 3,
            first_row: 2,
            last_row: 4,
            rows_rejected: 1,
        });
        assert_eq!(outcome.message(), "Successfully appended 3 rows");
        assert_eq!(outcome.rows_written(), 3);
    }

    #[test]
    fn test_validation_report_counts() {
        let report = ValidationReport {
            accepted: vec![],
            rejected: vec![RejectedRow {
                row: Row::new(1, vec!["a".to_string()]),
                expected: 9,
            }],
        };
        assert_eq!(report.total_rows(), 1);
        assert_eq!(ValidationReport::default().total_rows(), 0);
    }
}
