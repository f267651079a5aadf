use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn prints_total_of_sublines() {
    cargo_bin_cmd!("sublines")
        .env_remove("RUST_LOG")
        .write_stdin("ab\ncde\\nf\n")
        .assert()
        .success()
        .stdout("Total: 6\n");
}

#[test]
fn empty_stdin_prints_zero() {
    cargo_bin_cmd!("sublines")
        .write_stdin("")
        .assert()
        .success()
        .stdout("Total: 0\n");
}

#[test]
fn every_reader_prints_a_total() {
    for (reader, expected) in [
        ("splitter", "Total: 6\n"),
        ("chunked", "Total: 6\n"),
        ("chunked-plain", "Total: 8\n"),
        ("plain", "Total: 8\n"),
    ] {
        cargo_bin_cmd!("sublines")
            .args(["--reader", reader])
            .write_stdin("ab\ncde\\nf\n")
            .assert()
            .success()
            .stdout(expected);
    }
}

#[test]
fn reads_from_file_argument() {
    let mut log = NamedTempFile::new().unwrap();
    write!(log, "one\\ntwo\nthree").unwrap();

    cargo_bin_cmd!("sublines")
        .arg(log.path())
        .write_stdin("ignored\n")
        .assert()
        .success()
        .stdout("Total: 11\n");
}

#[test]
fn missing_file_fails_without_total() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("sublines")
        .arg(dir.path().join("absent.log"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn verbose_logs_stay_off_stdout() {
    cargo_bin_cmd!("sublines")
        .env_remove("RUST_LOG")
        .arg("-vv")
        .write_stdin("a\\nb\n")
        .assert()
        .success()
        .stdout("Total: 2\n")
        .stderr(predicate::str::contains("input exhausted"));
}

#[test]
fn help_describes_reader_flag() {
    cargo_bin_cmd!("sublines")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Strategy used to walk the input"))
        .stdout(predicate::str::contains("chunked-plain"));
}
