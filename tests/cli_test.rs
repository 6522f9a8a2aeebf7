//! Integration tests for the defcheck binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const DUMP: &str = "\
version\t5.7.21-log
version_compile_os\tLinux
version_compile_machine\tx86_64
max_connections\t151
back_log\t80
binlog_format\tMIXED
";

fn defcheck(dir: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("defcheck"));
    cmd.current_dir(dir.path())
        .env_remove("DEFCHECK_RULES_DIR")
        .arg("--no-color");
    cmd
}

fn write_dump(dir: &TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("dump.txt");
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("defcheck"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("factory defaults"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("defcheck"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("defcheck"));
    cmd.assert().failure();
    Ok(())
}

#[test]
fn check_reports_verdicts() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);

    defcheck(&temp)
        .arg("check")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok      back_log = 80"))
        .stdout(predicate::str::contains(
            "ko      binlog_format = MIXED (default: ROW)",
        ))
        .stdout(predicate::str::contains("6 variables:"));
    Ok(())
}

#[test]
fn check_reads_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    defcheck(&temp)
        .args(["check", "-"])
        .write_stdin(DUMP)
        .assert()
        .success()
        .stdout(predicate::str::contains("version:  5.7.21"));
    Ok(())
}

#[test]
fn check_fail_on_ko_exits_1() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);

    defcheck(&temp)
        .arg("check")
        .arg(&dump)
        .arg("--fail-on-ko")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 variable(s) differ"));
    Ok(())
}

#[test]
fn silent_check_reports_through_exit_code_only() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);

    defcheck(&temp)
        .arg("--silent")
        .arg("check")
        .arg(&dump)
        .arg("--fail-on-ko")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("1 variable(s) differ"));
    Ok(())
}

#[test]
fn check_reads_non_utf8_dump() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let path = temp.path().join("dump.txt");
    let mut bytes = DUMP.as_bytes().to_vec();
    bytes.extend_from_slice(b"datadir\tC:\\donn\xe9es\\\n");
    fs::write(&path, bytes)?;

    defcheck(&temp)
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok      back_log = 80"));
    Ok(())
}

#[test]
fn check_only_filters_lines() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);

    defcheck(&temp)
        .arg("check")
        .arg(&dump)
        .args(["--only", "ko"])
        .assert()
        .success()
        .stdout(predicate::str::contains("binlog_format"))
        .stdout(predicate::str::contains("back_log").not());
    Ok(())
}

#[test]
fn check_json_output() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);

    let output = defcheck(&temp)
        .arg("check")
        .arg(&dump)
        .args(["--format", "json"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["detected"]["bucket"], "5.7");
    assert_eq!(json["summary"]["ko"], 1);
    assert!(json["checked_at"].is_string());
    Ok(())
}

#[test]
fn check_undetected_server_exits_2() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, "version\t10.2-MariaDB\nmax_connections\t151\n");

    defcheck(&temp)
        .arg("check")
        .arg(&dump)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Could not detect server version"));
    Ok(())
}

#[test]
fn check_missing_input_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    defcheck(&temp)
        .args(["check", "missing.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input not found"));
    Ok(())
}

#[test]
fn config_file_sets_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);
    fs::write(
        temp.path().join(".defcheck.yml"),
        "fail_on_ko: true\nignore: [binlog_format]\n",
    )?;

    defcheck(&temp)
        .arg("check")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("-       binlog_format = MIXED"));
    Ok(())
}

#[test]
fn invalid_config_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);
    fs::write(temp.path().join(".defcheck.yml"), "output: [")?;

    defcheck(&temp)
        .arg("check")
        .arg(&dump)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn rules_dir_replaces_builtin_tables() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);
    let rules = temp.path().join("rules");
    fs::create_dir(&rules)?;
    fs::write(
        rules.join("mysql-5.7.yml"),
        "bucket: \"5.7\"\nvariables:\n  binlog_format:\n    - { type: enumeration, value: MIXED }\n",
    )?;

    defcheck(&temp)
        .arg("--rules-dir")
        .arg(&rules)
        .arg("check")
        .arg(&dump)
        .arg("--fail-on-ko")
        .assert()
        .success()
        .stdout(predicate::str::contains("ok      binlog_format = MIXED"))
        .stdout(predicate::str::contains("unknown back_log = 80"));
    Ok(())
}

#[test]
fn missing_rules_dir_fails() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);

    defcheck(&temp)
        .args(["--rules-dir", "no-such-dir", "check"])
        .arg(&dump)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Rules directory not found"));
    Ok(())
}

#[test]
fn detect_prints_server() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);

    defcheck(&temp)
        .arg("detect")
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("bucket:   5.7"))
        .stdout(predicate::str::contains("platform: 64-bit"));
    Ok(())
}

#[test]
fn explain_shows_selected_rule() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    defcheck(&temp)
        .args([
            "explain",
            "binlog_format",
            "--server-version",
            "5.7.21",
            "--os",
            "linux",
            "--platform",
            "64-bit",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ROW [patch>=7 os=all platform=all] selected"))
        .stdout(predicate::str::contains("default: ROW"));
    Ok(())
}

#[test]
fn explain_computes_autosized_default_from_input() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let dump = write_dump(&temp, DUMP);

    defcheck(&temp)
        .args(["explain", "back_log", "--input"])
        .arg(&dump)
        .assert()
        .success()
        .stdout(predicate::str::contains("default: 80 (autosized)"));
    Ok(())
}

#[test]
fn schema_is_json() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = defcheck(&temp).arg("schema").output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert!(json["properties"]["variables"].is_object());
    Ok(())
}

#[test]
fn completions_for_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    defcheck(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defcheck"));
    Ok(())
}
