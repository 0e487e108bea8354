//! Command-line tests against the built binary

use crate::common::example_files::*;
use crate::common::synthetic::{two_section_log, Run};
use assert_cmd::Command;
use benchlog::settings::Settings;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Command with a private settings file so the user's config is never read
fn benchlog_cmd(dir: &Path) -> Command {
    let config = dir.join("settings.json");
    if !config.exists() {
        Settings::default().save_to(&config).unwrap();
    }
    let mut cmd = Command::cargo_bin("benchlog").expect("Failed to find benchlog binary");
    cmd.arg("--config").arg(config);
    cmd
}

fn log_in(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_help() {
    let dir = tempdir().unwrap();
    benchlog_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("pivot"));
}

#[test]
fn test_parse_single_log() {
    let dir = tempdir().unwrap();
    let log = log_in(&dir, "run.log", &two_section_log());

    benchlog_cmd(dir.path())
        .arg("parse")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records"))
        .stdout(predicate::str::contains("run.csv"));

    let table = fs::read_to_string(dir.path().join("run.csv")).unwrap();
    assert!(table.starts_with("workload,threads,"));
}

#[test]
fn test_parse_reports_discarded_sections() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("ycsb.log");
    fs::copy(ZTREE_YCSB_4096, &log).unwrap();

    benchlog_cmd(dir.path())
        .args(["-v", "parse"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 records, 2 sections discarded"))
        .stderr(predicate::str::contains("Discarding run section"));
}

#[test]
fn test_parse_empty_log_fails() {
    let dir = tempdir().unwrap();
    let log = log_in(&dir, "empty.log", "");

    benchlog_cmd(dir.path())
        .arg("parse")
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no complete run section"));

    assert!(!dir.path().join("empty.csv").exists());
}

#[test]
fn test_parse_missing_log_fails() {
    let dir = tempdir().unwrap();
    benchlog_cmd(dir.path())
        .args(["parse", "/nonexistent/run.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 1 logs failed"));
}

#[test]
fn test_parse_into_output_dir() {
    let dir = tempdir().unwrap();
    let log = log_in(&dir, "run.log", &Run::default().render());

    benchlog_cmd(dir.path())
        .arg("parse")
        .arg(&log)
        .arg("--output-dir")
        .arg(dir.path().join("out"))
        .assert()
        .success();

    assert!(dir.path().join("out/run.csv").is_file());
}

#[test]
fn test_batch() {
    let dir = tempdir().unwrap();
    let logs = tempdir().unwrap();
    log_in(&logs, "a.log", &Run::default().render());
    log_in(&logs, "b.log", "nothing here");

    benchlog_cmd(dir.path())
        .arg("batch")
        .arg(logs.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 of 2 logs converted"))
        .stdout(predicate::str::contains("failed"));

    assert!(logs.path().join("a.csv").is_file());
}

#[test]
fn test_inspect_writes_nothing() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("ycsb.log");
    fs::copy(ZTREE_YCSB_4096, &log).unwrap();

    benchlog_cmd(dir.path())
        .arg("inspect")
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("sections:  5"))
        .stdout(predicate::str::contains("records:   3"))
        .stdout(predicate::str::contains("section 3: "));

    assert!(!dir.path().join("ycsb.csv").exists());
}

#[test]
fn test_pivot_to_stdout() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("ycsb.log");
    fs::copy(ZTREE_YCSB_4096, &log).unwrap();
    benchlog_cmd(dir.path()).arg("parse").arg(&log).assert().success();

    benchlog_cmd(dir.path())
        .arg("pivot")
        .arg(dir.path().join("ycsb.csv"))
        .args(["--metric", "zone_read"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("workload,tid-1,tid-8,tid-16\n"))
        .stdout(predicate::str::contains("b,,128000.0,\n"));
}

#[test]
fn test_pivot_unknown_metric() {
    let dir = tempdir().unwrap();
    let log = log_in(&dir, "run.log", &Run::default().render());
    benchlog_cmd(dir.path()).arg("parse").arg(&log).assert().success();

    benchlog_cmd(dir.path())
        .arg("pivot")
        .arg(dir.path().join("run.csv"))
        .args(["-m", "latency"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field `latency`"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("settings.json"), "[1, 2").unwrap();
    let log = log_in(&dir, "run.log", &Run::default().render());

    benchlog_cmd(dir.path())
        .arg("parse")
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse settings file"));
}
