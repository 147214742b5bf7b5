use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    repo_root().join("fixtures").join("social").join(name)
}

#[test]
fn scc_reports_components_as_json() {
    let exe = assert_cmd::cargo_bin!("shoal-cli");
    let output = Command::new(exe)
        .args(["scc", fixture("basic.follows").to_string_lossy().as_ref()])
        .assert()
        .success()
        .get_output()
        .clone();

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON on stdout");
    assert_eq!(
        json["components"],
        serde_json::json!([["@alice", "@bob"], ["@carol", "@dave"]])
    );
}

#[test]
fn scc_mapping_flag_adds_the_component_index_map() {
    let exe = assert_cmd::cargo_bin!("shoal-cli");
    let output = Command::new(exe)
        .args([
            "scc",
            "--mapping",
            fixture("basic.follows").to_string_lossy().as_ref(),
        ])
        .assert()
        .success()
        .get_output()
        .clone();

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON on stdout");
    assert_eq!(json["mapping"]["@alice"], 0);
    assert_eq!(json["mapping"]["@bob"], 0);
    assert_eq!(json["mapping"]["@carol"], 1);
    assert_eq!(json["mapping"]["@dave"], 1);
}

#[test]
fn stats_counts_users_relations_and_components() {
    let exe = assert_cmd::cargo_bin!("shoal-cli");
    let output = Command::new(exe)
        .args(["stats", fixture("basic.follows").to_string_lossy().as_ref()])
        .assert()
        .success()
        .get_output()
        .clone();

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON on stdout");
    assert_eq!(json["users"], 4);
    assert_eq!(json["relations"], 5);
    assert_eq!(json["components"], 2);
    assert_eq!(json["warnings"], serde_json::json!([]));
}

#[test]
fn fmt_normalizes_messy_input_and_reports_warnings_on_stderr() {
    let exe = assert_cmd::cargo_bin!("shoal-cli");
    let output = Command::new(exe)
        .args(["fmt", fixture("messy.follows").to_string_lossy().as_ref()])
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "users\n@alice\n@bob\n@ghost\nrelations\n@alice, @ghost\n@bob, @alice\n"
    );

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("duplicate user ignored"));
    assert!(stderr.contains("auto-created"));
    assert!(stderr.contains("self-referential relation ignored"));
}

#[test]
fn fmt_out_writes_a_file() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("normalized.follows");

    let exe = assert_cmd::cargo_bin!("shoal-cli");
    Command::new(exe)
        .args([
            "fmt",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture("basic.follows").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let written = fs::read_to_string(&out).expect("read normalized file");
    assert!(written.starts_with("users\n@alice\n"));
    assert!(written.contains("relations\n"));
}

#[test]
fn reads_from_stdin_when_path_is_dash() {
    let exe = assert_cmd::cargo_bin!("shoal-cli");
    let output = assert_cmd::Command::new(exe)
        .args(["scc", "-"])
        .write_stdin("users\n@a\n@b\nrelations\n@a, @b\n@b, @a\n")
        .assert()
        .success()
        .get_output()
        .clone();

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON on stdout");
    assert_eq!(json["components"], serde_json::json!([["@a", "@b"]]));
}

#[test]
fn malformed_relation_lines_fail_with_a_nonzero_exit() {
    let exe = assert_cmd::cargo_bin!("shoal-cli");
    assert_cmd::Command::new(exe)
        .args(["scc", "-"])
        .write_stdin("users\n@a\nrelations\n@a @b\n")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn unknown_flags_exit_with_usage() {
    let exe = assert_cmd::cargo_bin!("shoal-cli");
    Command::new(exe)
        .args(["--definitely-not-a-flag"])
        .assert()
        .failure()
        .code(2);
}
