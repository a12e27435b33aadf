//! Application constants for the sheet appender
//!
//! Default destination, schema shape, transport field names and the
//! user-facing summary messages.

// =============================================================================
// Destination Defaults
// =============================================================================

/// Sheet that receives appended rows unless configured otherwise
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Directory name under the user data directory holding the default workbook
pub const DEFAULT_WORKBOOK_DIR: &str = "sheet-appender";

/// Workbook directory name within [`DEFAULT_WORKBOOK_DIR`]
pub const DEFAULT_WORKBOOK_NAME: &str = "workbook";

/// File extension of a sheet inside a workbook directory
pub const SHEET_FILE_EXTENSION: &str = "parquet";

// =============================================================================
// Parsing and Schema
// =============================================================================

/// Field delimiter used when none is supplied
pub const DEFAULT_DELIMITER: char = ',';

/// Quote character; not configurable
pub const QUOTE_CHAR: char = '"';

/// Number of fields every accepted row must carry
pub const SCHEMA_WIDTH: usize = 9;

/// Header row written by header initialization
pub const HEADER_NAMES: [&str; SCHEMA_WIDTH] = [
    "Type", "Value1", "Value2", "Value3", "Value4", "Value5", "Value6", "Value7", "Value8",
];

// =============================================================================
// HTTP Transport
// =============================================================================

/// Form or query field carrying the payload when the body is not used
pub const CSV_DATA_FIELD: &str = "csvData";

/// Query parameter overriding the delimiter for one request
pub const DELIMITER_FIELD: &str = "delimiter";

/// Address the HTTP server binds to by default
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

// =============================================================================
// Messages
// =============================================================================

/// Summary reported when a payload has no rows
pub const NO_DATA_MESSAGE: &str = "No data to append";

/// Three valid rows used by the `sample` command
pub const SAMPLE_PAYLOAD: &str = "\
TypeA,Value1A,Value2A,Value3A,Value4A,Value5A,Value6A,Value7A,Value8A
TypeB,Value1B,Value2B,Value3B,Value4B,Value5B,Value6B,Value7B,Value8B
TypeC,Value1C,Value2C,Value3C,Value4C,Value5C,Value6C,Value7C,Value8C";
