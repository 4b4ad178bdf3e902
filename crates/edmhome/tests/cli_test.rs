//! Integration tests for the `edmhome` CLI binary.
//!
//! A small hutch (two stands, three devices) is written into a temp
//! directory per test; nothing touches the user's real configuration.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `edmhome` binary with env isolation.
fn edmhome_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("edmhome");
    cmd.env("HOME", "/tmp/edmhome-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/edmhome-cli-test-nonexistent")
        .env_remove("EDMHOME_CONFIG")
        .env_remove("EDMHOME_DATABASE")
        .env_remove("EDMHOME_HUTCH")
        .env_remove("EDMHOME_STATIC_DIR")
        .env_remove("EDMHOME_BUILD_DIR")
        .env_remove("EDMHOME_OUTPUT")
        .env_remove("EDMHOME_VIEWER_EXECUTABLE")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

const DATABASE: &str = r#"{
  "dg1_yag": {"prefix": "HXD:DG1:PIM", "stand": "DG1", "z": 10.0,
              "beamline": "tst", "embedded_screen": "device.edl"},
  "dg1_mms": {"prefix": "HXD:DG1:MMS:01", "stand": "DG1", "z": 10.5,
              "beamline": "tst", "parent": "dg1_yag", "embedded_screen": "device.edl"},
  "dg2_ipm": {"prefix": "HXD:DG2:IPM", "stand": "DG2", "z": 20.0,
              "beamline": "tst", "embedded_screen": "device.edl"},
  "xpp_yag": {"prefix": "XPP:PIM", "stand": "SB1", "z": 99.0,
              "beamline": "xpp", "embedded_screen": "device.edl"}
}"#;

const DEVICE_SCREEN: &str = "4 0 1\n\
beginScreenProperties\n\
major 4\n\
minor 0\n\
release 1\n\
x 0\n\
y 0\n\
w 200\n\
h 60\n\
endScreenProperties\n";

/// Database, device screen, and config in a fresh temp dir.
struct Hutch {
    dir: TempDir,
}

impl Hutch {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let screens = dir.path().join("screens");
        std::fs::create_dir_all(&screens).unwrap();
        std::fs::write(screens.join("device.edl"), DEVICE_SCREEN).unwrap();
        std::fs::write(dir.path().join("db.json"), DATABASE).unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            format!(
                "hutch: tst\ndatabase: {}\nstatic_dir: {}\n",
                dir.path().join("db.json").display(),
                screens.display()
            ),
        )
        .unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn config(&self) -> PathBuf {
        self.path().join("config.yaml")
    }

    fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = edmhome_cmd();
        cmd.arg("--config").arg(self.config());
        cmd
    }
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = edmhome_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    edmhome_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("EDM")
            .and(predicate::str::contains("build"))
            .and(predicate::str::contains("show"))
            .and(predicate::str::contains("tree")),
    );
}

#[test]
fn test_version_flag() {
    edmhome_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("edmhome"));
}

#[test]
fn test_invalid_subcommand() {
    let output = edmhome_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("foobar") || text.contains("unrecognized"), "{text}");
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    edmhome_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    edmhome_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── build ───────────────────────────────────────────────────────────

#[test]
fn test_build_stand_writes_group_overview_and_root() {
    let hutch = Hutch::new();
    let out = hutch.path().join("out");

    let output = hutch
        .cmd()
        .args(["build", "--stand", "DG1", "-o", "plain", "--build-dir"])
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    for name in ["dg1dg1_yag.edl", "dg1overview.edl", "dg1.edl"] {
        assert!(out.join(name).exists(), "missing {name}");
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.lines().last().unwrap().ends_with("dg1.edl"));
}

#[test]
fn test_build_hutch_root_links_stands() {
    let hutch = Hutch::new();
    let out = hutch.path().join("out");

    hutch
        .cmd()
        .args(["build", "-q", "--build-dir"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let root = std::fs::read_to_string(out.join("tst.edl")).unwrap();
    assert!(root.contains("beginScreenProperties"));
    assert!(root.contains(r"LOC\\tst=e:2,dg1,dg2,overview"));
    assert!(out.join("tstdg1.edl").exists());
    assert!(out.join("tstdg2.edl").exists());
    assert!(out.join("dg2dg2_ipm.edl").exists());
}

#[test]
fn test_build_without_build_dir_is_usage_error() {
    let hutch = Hutch::new();
    let output = hutch.cmd().arg("build").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("build_dir"));
}

#[test]
fn test_build_unknown_stand() {
    let hutch = Hutch::new();
    let output = hutch
        .cmd()
        .args(["build", "--stand", "DG9", "--build-dir"])
        .arg(hutch.path().join("out"))
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("dg9"));
}

// ── tree / devices ──────────────────────────────────────────────────

#[test]
fn test_tree_json() {
    let hutch = Hutch::new();
    let output = hutch.cmd().args(["tree", "-o", "json"]).output().unwrap();
    assert!(output.status.success(), "{}", combined_output(&output));

    let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(tree["name"], "tst");
    assert_eq!(tree["kind"], "hutch");
    let stands: Vec<&str> = tree["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(stands, ["DG1", "DG2"]);
    assert_eq!(tree["children"][0]["children"][0]["name"], "dg1_yag");
}

#[test]
fn test_devices_plain_follows_screen_order() {
    let hutch = Hutch::new();
    hutch
        .cmd()
        .args(["devices", "-o", "plain"])
        .assert()
        .success()
        .stdout("dg1_mms\ndg1_yag\ndg2_ipm\n");
}

#[test]
fn test_devices_hutch_flag_rescopes_query() {
    let hutch = Hutch::new();
    hutch
        .cmd()
        .args(["devices", "-o", "plain", "--hutch", "xpp"])
        .assert()
        .success()
        .stdout("xpp_yag\n");
}

#[test]
fn test_unknown_hutch_has_no_devices() {
    let hutch = Hutch::new();
    let output = hutch
        .cmd()
        .args(["devices", "--hutch", "nowhere"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("No devices found for hutch 'nowhere'"));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_database_setting() {
    let output = edmhome_cmd().arg("tree").output().unwrap();
    assert_eq!(output.status.code(), Some(6));
    assert!(combined_output(&output).contains("No device database configured"));
}

#[test]
fn test_unreadable_database() {
    let output = edmhome_cmd()
        .args(["tree", "--database", "/nonexistent/db.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
    assert!(combined_output(&output).contains("/nonexistent/db.json"));
}

#[test]
fn test_explicit_config_must_exist() {
    let output = edmhome_cmd()
        .args(["tree", "--config", "/nonexistent/edmhome.yaml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6));
    assert!(combined_output(&output).contains("config init"));
}

#[test]
fn test_malformed_config_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("config.yaml");
    std::fs::write(&broken, "hutch: tst\nfilters:\n  include: 5\n").unwrap();

    let output = edmhome_cmd()
        .arg("tree")
        .arg("--config")
        .arg(&broken)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(6), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("include"));
}

#[test]
fn test_config_init_then_refuse_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edmhome.yaml");

    edmhome_cmd()
        .args(["config", "init", "--hutch", "mfx", "--config"])
        .arg(&path)
        .assert()
        .success();
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("hutch: mfx"));

    let output = edmhome_cmd()
        .args(["config", "init", "--config"])
        .arg(&path)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--force"));
}

#[test]
fn test_config_show_merges_flags() {
    let hutch = Hutch::new();
    hutch
        .cmd()
        .args(["config", "show", "-o", "json", "--hutch", "mfx"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""hutch": "mfx""#));
}

// ── show ────────────────────────────────────────────────────────────

#[test]
fn test_show_missing_viewer() {
    let hutch = Hutch::new();
    let output = hutch
        .cmd()
        .args(["show", "--viewer", "/nonexistent/edm"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("/nonexistent/edm"));
}

#[cfg(unix)]
#[test]
fn test_show_waits_for_viewer() {
    let hutch = Hutch::new();
    hutch
        .cmd()
        .args(["show", "--stand", "DG2", "--viewer", "true"])
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn test_show_reports_viewer_failure() {
    let hutch = Hutch::new();
    let output = hutch
        .cmd()
        .args(["show", "--viewer", "false"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
}
