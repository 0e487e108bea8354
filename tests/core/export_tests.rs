//! CSV export tests driven through the parser

use crate::common::example_files::*;
use crate::common::read_example_file;
use crate::common::synthetic::{two_section_log, Run};
use benchlog::export::{header, read_csv, read_dataset, to_csv_string, write_csv};
use benchlog::{BenchmarkLog, LogError, Parseable};
use tempfile::tempdir;

#[test]
fn test_two_section_table() {
    let report = BenchmarkLog::new().parse(&two_section_log()).unwrap();
    let csv = to_csv_string(&report.dataset).unwrap();

    let expected_row = "a,1,100,100,10.0,5.0,1.0,4096,10,20,100,125.0,250.0";
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], header().join(","));
    assert_eq!(lines[1], expected_row);
    assert_eq!(lines[2], expected_row);
}

#[test]
fn test_every_row_has_thirteen_columns() {
    let content = read_example_file(ZTREE_YCSB_4096);
    let report = BenchmarkLog::new().parse(&content).unwrap();
    let csv = to_csv_string(&report.dataset).unwrap();

    for line in csv.lines() {
        assert_eq!(line.split(',').count(), 13, "bad row: {}", line);
    }
    assert_eq!(csv.lines().count(), ZTREE_YCSB_4096_RECORDS + 1);
}

#[test]
fn test_integral_throughput_keeps_decimal_point() {
    let run = Run {
        load_kops: "512",
        run_kops: "256",
        ..Run::default()
    };
    let report = BenchmarkLog::new().parse(&run.render()).unwrap();
    let csv = to_csv_string(&report.dataset).unwrap();
    let row = csv.lines().nth(1).unwrap();

    assert!(row.starts_with("a,1,100,100,512.0,256.0,"), "row: {}", row);
}

#[test]
fn test_write_and_read_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ycsb.csv");

    let content = read_example_file(ZTREE_YCSB_4096);
    let report = BenchmarkLog::new().parse(&content).unwrap();
    write_csv(&report.dataset, &path).unwrap();

    let read_back = read_csv(&path).unwrap();
    assert_eq!(read_back, report.dataset);
}

#[test]
fn test_read_missing_file() {
    let dir = tempdir().unwrap();
    let err = read_csv(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, LogError::Read { .. }));
}

#[test]
fn test_read_rejects_short_row() {
    let csv = format!("{}\na,1,100\n", header().join(","));
    let err = read_dataset(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, LogError::Csv(_)));
}
