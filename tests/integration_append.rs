//! End-to-end append tests against a Parquet workbook on disk
//!
//! Each test creates a workbook in a temporary directory, runs payloads
//! through the full pipeline and reads the sheet back.

use sheet_appender::constants::{HEADER_NAMES, SCHEMA_WIDTH};
use sheet_appender::parser::{assemble_rows, parse_line};
use sheet_appender::validator::validate_rows;
use sheet_appender::{
    AppendConfig, AppendError, AppendOutcome, AppendProcessor, HeaderStatus, ParquetStore,
    TabularStore,
};
use tempfile::TempDir;

fn workbook(dir: &TempDir) -> AppendProcessor<ParquetStore> {
    let config = AppendConfig::default().with_store_path(dir.path().join("workbook"));
    let store = ParquetStore::new(config.store_path.clone(), SCHEMA_WIDTH);
    store.create_sheet(&config.sheet_name).unwrap();
    AppendProcessor::new(store, config).unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_three_rows_land_below_last_row() {
    let dir = TempDir::new().unwrap();
    let processor = workbook(&dir);
    assert_eq!(processor.initialize_headers().unwrap(), HeaderStatus::Written);

    let before = processor.store().last_row("Sheet1").unwrap();
    assert_eq!(before, 1);

    let payload = r#"
temp, 1, 2, 3, 4, 5, 6, 7, 8
"hum, rel","a ""b"" c",2,3,4,5,6,7,8

soil,x,y,z,,,,,last
"#;
    let outcome = processor.append(payload).unwrap();

    match outcome {
        AppendOutcome::Appended(summary) => {
            assert_eq!(summary.rows_written, 3);
            assert_eq!(summary.first_row, before + 1);
            assert_eq!(summary.last_row, before + 3);
            assert_eq!(summary.rows_rejected, 0);
        }
        other => panic!("expected append, got {:?}", other),
    }

    let rows = processor.store().read_rows("Sheet1", 1, 10).unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0], strings(&HEADER_NAMES));
    assert_eq!(rows[1], strings(&["temp", "1", "2", "3", "4", "5", "6", "7", "8"]));
    assert_eq!(
        rows[2],
        strings(&["hum, rel", "a \"b\" c", "2", "3", "4", "5", "6", "7", "8"])
    );
    assert_eq!(rows[3], strings(&["soil", "x", "y", "z", "", "", "", "", "last"]));
}

#[test]
fn test_round_trip_matches_accepted_fields() {
    let dir = TempDir::new().unwrap();
    let processor = workbook(&dir);

    let payload = "a,b,c,d,e,f,g,h,i\nbad,row\n\" q \",2,3,4,5,6,7,8,9\n";
    let accepted: Vec<Vec<String>> = validate_rows(assemble_rows(payload, ','), SCHEMA_WIDTH)
        .accepted
        .into_iter()
        .map(|row| row.fields)
        .collect();

    processor.append(payload).unwrap();
    let stored = processor.store().read_rows("Sheet1", 1, 10).unwrap();
    assert_eq!(stored, accepted);
}

#[test]
fn test_consecutive_appends_are_contiguous() {
    let dir = TempDir::new().unwrap();
    let processor = workbook(&dir);

    processor.append("1,2,3,4,5,6,7,8,9").unwrap();
    processor.append("a,b,c,d,e,f,g,h,i\nj,k,l,m,n,o,p,q,r").unwrap();

    let rows = processor.store().read_rows("Sheet1", 1, 10).unwrap();
    let first_cells: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();
    assert_eq!(first_cells, vec!["1", "a", "j"]);
}

#[test]
fn test_empty_payload_leaves_store_unmodified() {
    let dir = TempDir::new().unwrap();
    let processor = workbook(&dir);
    processor.append("x,1,2,3,4,5,6,7,8").unwrap();

    assert_eq!(processor.append("").unwrap(), AppendOutcome::NoData);
    assert_eq!(processor.append("\n   \n").unwrap().rows_written(), 0);
    assert_eq!(processor.store().last_row("Sheet1").unwrap(), 1);
}

#[test]
fn test_all_wrong_width_leaves_store_unmodified() {
    let dir = TempDir::new().unwrap();
    let processor = workbook(&dir);
    processor.append("x,1,2,3,4,5,6,7,8").unwrap();

    let result = processor.append("a,b,c\n1,2,3,4,5,6,7,8,9,10");
    assert!(matches!(
        result,
        Err(AppendError::SchemaMismatch { expected: 9, rows: 2 })
    ));
    assert_eq!(processor.store().last_row("Sheet1").unwrap(), 1);
}

#[test]
fn test_missing_destination_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = AppendConfig::default()
        .with_store_path(dir.path().join("workbook"))
        .with_sheet_name("Missing");
    let store = ParquetStore::new(config.store_path.clone(), SCHEMA_WIDTH);
    let processor = AppendProcessor::new(store, config).unwrap();

    let error = processor.append("x,1,2,3,4,5,6,7,8").unwrap_err();
    assert_eq!(error.to_string(), "Sheet \"Missing\" not found");
}

#[test]
fn test_documented_parse_examples() {
    assert_eq!(parse_line("a,b,c", ','), strings(&["a", "b", "c"]));
    assert_eq!(parse_line(r#"a,"b,c",d"#, ','), strings(&["a", "b,c", "d"]));
    assert_eq!(parse_line(r#"a,"b""c",d"#, ','), strings(&["a", "b\"c", "d"]));
}
