//! Fixed-width schema validation.
//!
//! Partitions assembled rows into those with exactly the required number of
//! fields and those without. Rejected rows are logged and dropped; they are
//! never padded or truncated.

use crate::error::{AppendError, Result};
use crate::models::{RejectedRow, Row, ValidationReport};
use tracing::{debug, warn};

/// Partition rows by width, keeping payload order within each partition
pub fn validate_rows(rows: Vec<Row>, expected_width: usize) -> ValidationReport {
    let mut report = ValidationReport::default();

    for row in rows {
        if row.width() == expected_width {
            report.accepted.push(row);
        } else {
            warn!(
                "Skipping row with {} columns: {}",
                row.width(),
                row.fields.join(", ")
            );
            debug!("Rejected payload line {}", row.line);
            report.rejected.push(RejectedRow {
                row,
                expected: expected_width,
            });
        }
    }

    debug!(
        "Validated {} rows: {} accepted, {} rejected",
        report.total_rows(),
        report.accepted.len(),
        report.rejected.len()
    );

    report
}

/// Accepted rows of a report, or a schema mismatch when none survived
pub fn require_accepted(report: ValidationReport, expected_width: usize) -> Result<Vec<Row>> {
    if report.accepted.is_empty() {
        return Err(AppendError::SchemaMismatch {
            expected: expected_width,
            rows: report.rejected.len(),
        });
    }
    Ok(report.accepted)
}
