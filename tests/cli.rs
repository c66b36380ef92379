//! Binary-level tests: argument handling, exit codes and stdout contract.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

const BIN: &str = env!("CARGO_BIN_EXE_county-report");
const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/three_counties.json");

fn script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn run_with_fixture(args: &[&Path]) -> Output {
    Command::new(BIN)
        .args(args)
        .env("COUNTY_DATA", FIXTURE)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn missing_argument_prints_usage() {
    let output = Command::new(BIN).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "Usage: county-report <operations_file>\n");
}

#[test]
fn missing_script_is_fatal_after_load() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.ops");
    let output = run_with_fixture(&[missing.as_path()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        format!(
            "3 records loaded\nError: Operations file '{}' not found.\n",
            missing.display()
        )
    );
}

#[test]
fn script_runs_to_completion_despite_errors() {
    let ops = script(
        "filter-state:CO\n\
         \n\
         bogus\n\
         population-total\n\
         percent:Age.< 5\n",
    );
    let output = run_with_fixture(&[ops.path()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "3 records loaded\n\
         Filter: state == CO (1 entries)\n\
         Error: Malformed line 3: bogus\n\
         2014 population: 313333\n\
         Error: Field 'Age.< 5' not found in entry.\n"
    );
}

#[test]
fn blank_script_only_announces_records() {
    let ops = script("\n\n   \n");
    let output = run_with_fixture(&[ops.path()]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "3 records loaded\n");
}

#[test]
fn builtin_dataset_is_used_without_configuration() {
    let ops = script("");
    let output = Command::new(BIN)
        .arg(ops.path())
        .env_remove("COUNTY_DATA")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "12 records loaded\n");
}

#[test]
fn unloadable_dataset_is_fatal() {
    let ops = script("display\n");
    let output = Command::new(BIN)
        .arg(ops.path())
        .env("COUNTY_DATA", "counties.xlsx")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("Error: loading county data from counties.xlsx"));
}
