//! Integration tests for top-level CLI behavior.

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_rostermatch(dir: &Path, args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_rostermatch");
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_remove("ROSTERMATCH_ROSTER")
        .env_remove("ROSTERMATCH_INPUT")
        .env_remove("ROSTERMATCH_OUTPUT")
        .env_remove("ROSTERMATCH_AMBIGUITY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run rostermatch binary")
}

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Roster plus input tree under the default `./names.csv` and `./input` locations.
fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let roster = "Smith,John\nGarcia,Maria,Elena\nSmith,John\n";
    write(dir.path(), "names.csv", roster);
    write(dir.path(), "input/xrays/1234_Garcia_report.pdf", "scan");
    write(dir.path(), "input/xrays/1235_misc.pdf", "scan");
    write(dir.path(), "input/labs/88_Garcia.pdf", "scan");
    dir
}

#[test]
fn plan_with_defaults_prints_report_and_creates_output_root() {
    let dir = fixture();
    let output = run_rostermatch(dir.path(), &["plan"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stdout.contains("./input/xrays/1234_Garcia_report.pdf"));
    assert!(stdout.contains("./output/Garcia_Maria_Elena_xrays.pdf"));
    assert!(stdout.contains("./output/misc_xrays.pdf"));
    assert!(stdout.contains("NEEDS MANUAL WORK"));
    assert!(stdout.contains("Garcia_Maria_Elena (2 files)"));
    assert!(dir.path().join("output").is_dir());
    // Nothing is moved.
    assert!(dir.path().join("input/xrays/1234_Garcia_report.pdf").exists());
    assert_eq!(fs::read_dir(dir.path().join("output")).unwrap().count(), 0);
}

#[test]
fn plan_json_is_machine_readable() {
    let dir = fixture();
    let output = run_rostermatch(dir.path(), &["plan", "--format", "json"]);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["traces"].as_array().unwrap().len(), 3);
    let collision = &value["diagnostics"]["name_collisions"][0];
    assert_eq!(collision["value"], "Garcia_Maria_Elena");
}

#[test]
fn config_file_supplies_locations() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "people/roster.csv", "Nguyen,Bao\n");
    write(dir.path(), "scans/labs/7_Nguyen.pdf", "scan");
    write(
        dir.path(),
        "rostermatch.yaml",
        "roster_path: people/roster.csv\ninput_root: scans\noutput_root: sorted\n",
    );

    let output = run_rostermatch(dir.path(), &["plan"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert!(stdout.contains("sorted/Nguyen_Bao_labs.pdf"));
    assert!(dir.path().join("sorted").is_dir());
}

#[test]
fn filename_without_id_fails_the_run() {
    let dir = fixture();
    write(dir.path(), "input/labs/Garcia.pdf", "scan");

    let output = run_rostermatch(dir.path(), &["plan"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("cannot be renamed"));
    assert!(stderr.contains("Garcia.pdf"));
}

#[test]
fn missing_roster_fails_before_planning() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_rostermatch(dir.path(), &["plan"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Failed to read roster ./names.csv"));
    assert!(!dir.path().join("output").exists());
}

#[test]
fn check_roster_lists_names() {
    let dir = fixture();
    let output = run_rostermatch(dir.path(), &["check-roster"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Last, First Middle"));
    assert!(stdout.contains("3 name(s) loaded."));
}

#[test]
fn help_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_rostermatch(dir.path(), &["plan", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--ambiguity"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_rostermatch(dir.path(), &["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
