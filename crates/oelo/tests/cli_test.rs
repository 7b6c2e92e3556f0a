//! Integration tests for the `oelo` CLI binary.
//!
//! Argument parsing, offline commands and error exit codes run without a
//! controller; the networked commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `oelo` binary with env isolation.
fn oelo_cmd() -> assert_cmd::Command {
    oelo_cmd_in(Path::new("/tmp/oelo-cli-test-nonexistent"))
}

/// Same, with `home` as HOME and the root of the XDG config and data dirs.
fn oelo_cmd_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("oelo");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_DATA_HOME", home.join(".local/share"))
        .env_remove("OELO_ADDRESS")
        .env_remove("OELO_ZONE_COUNT")
        .env_remove("OELO_OUTPUT")
        .env_remove("OELO_TIMEOUT")
        .env_remove("OELO_POLL_INTERVAL_SECS")
        .env_remove("RUST_LOG");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run a blocking command from inside an async test.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = oelo_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    oelo_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Oelo")
            .and(predicate::str::contains("status"))
            .and(predicate::str::contains("set"))
            .and(predicate::str::contains("watch")),
    );
}

#[test]
fn test_version_flag() {
    oelo_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("oelo"));
}

#[test]
fn test_completions_bash() {
    oelo_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Offline commands ────────────────────────────────────────────────

#[test]
fn test_effects_lists_catalog() {
    oelo_cmd()
        .args(["effects", "--output", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Christmas: Icicle Chase")
                .and(predicate::str::contains("Pride: Split")),
        );
}

#[test]
fn test_effects_json_has_colors() {
    let output = oelo_cmd().args(["fx", "-o", "json"]).output().unwrap();
    assert!(output.status.success());
    let effects: Value = serde_json::from_slice(&output.stdout).unwrap();
    let chase = effects
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "Christmas: Icicle Chase")
        .unwrap();
    assert_eq!(chase["pattern_type"], "chase");
    assert_eq!(chase["colors"].as_array().unwrap().len(), 3);
}

#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();

    oelo_cmd_in(home.path())
        .args(["config", "init", "192.168.1.40", "--zone-count", "4"])
        .assert()
        .success();

    oelo_cmd_in(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("192.168.1.40")
                .and(predicate::str::contains("zone_count = 4")),
        );

    // A second init without --force refuses to overwrite.
    let output = oelo_cmd_in(home.path())
        .args(["config", "init", "10.0.0.9"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("already exists"));
}

#[test]
fn test_config_path_points_into_config_home() {
    let home = tempfile::tempdir().unwrap();
    oelo_cmd_in(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_missing_address_is_usage_error() {
    let output = oelo_cmd().arg("status").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("No controller address"),
        "Expected missing-address error:\n{text}"
    );
}

#[test]
fn test_zone_count_out_of_range() {
    let output = oelo_cmd()
        .args(["--address", "127.0.0.1", "--zones", "9", "status"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("zone_count"));
}

#[test]
fn test_set_requires_a_change() {
    let output = oelo_cmd()
        .args(["--address", "127.0.0.1", "set", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_set_off_conflicts_with_color() {
    let output = oelo_cmd()
        .args(["--address", "127.0.0.1", "set", "1", "--off", "--color", "255,0,0"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_zone_is_not_found() {
    // Zone numbers are checked before any request goes out.
    let output = oelo_cmd()
        .args(["--address", "127.0.0.1:1", "--zones", "2", "set", "5", "--on"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Zone 5"));
}

// ── Against a controller ────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_status_reads_controller() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getController"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "num": 1, "pattern": "custom" },
            { "num": 2, "pattern": "off" },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut cmd = oelo_cmd();
    cmd.args(["--address", &server.uri(), "--zones", "2", "-o", "json", "status"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let zones: Value = serde_json::from_slice(&output.stdout).unwrap();
    let zones = zones.as_array().unwrap();
    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0]["zone"], 1);
    assert_eq!(zones[0]["power"], true);
    assert_eq!(zones[1]["power"], false);
    assert_eq!(zones[1]["available"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_color_sends_one_pattern() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getController"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "num": 1, "pattern": "off" },
            { "num": 2, "pattern": "off" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/setPattern"))
        .and(query_param("patternType", "custom"))
        .and(query_param("zones", "1,2"))
        .and(query_param("colors", "255,0,0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Command Received"))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let mut cmd = oelo_cmd_in(home.path());
    cmd.args([
        "--address",
        &server.uri(),
        "--zones",
        "2",
        "-o",
        "json",
        "set",
        "1",
        "2",
        "--color",
        "#ff0000",
    ]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let zones: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(zones.as_array().unwrap().iter().all(|z| z["power"] == true));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_brightness_change_keeps_color_from_earlier_run() {
    let server = MockServer::start().await;
    // The controller only ever reports "custom", never the color.
    Mock::given(method("GET"))
        .and(path("/getController"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "num": 1, "pattern": "custom" }])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/setPattern"))
        .and(query_param("colors", "255,0,0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Command Received"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/setPattern"))
        .and(query_param("colors", "100,0,0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Command Received"))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    let uri = server.uri();

    let mut first = oelo_cmd_in(home.path());
    first.args(["--address", &uri, "--zones", "1", "set", "1", "--color", "255,0,0"]);
    let output = run(first).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let mut second = oelo_cmd_in(home.path());
    second.args(["--address", &uri, "--zones", "1", "-o", "json", "set", "1", "-b", "100"]);
    let output = run(second).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let zones: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(zones[0]["color"], json!({ "r": 255, "g": 0, "b": 0 }));
    assert_eq!(zones[0]["brightness"], 100);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_effect_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getController"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "num": 1, "pattern": "off" }])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/setPattern"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut cmd = oelo_cmd();
    cmd.args(["--address", &server.uri(), "--zones", "1", "set", "1", "-e", "Disco"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("Unknown effect"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_probe_reports_zone_coverage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getController"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "num": 1, "pattern": "custom" },
            { "num": 2, "pattern": "off" },
        ])))
        .mount(&server)
        .await;

    let mut cmd = oelo_cmd();
    cmd.args(["--address", &server.uri(), "--zones", "3", "--color", "never", "probe"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("2 of 3 reported"), "unexpected probe output:\n{text}");
    assert!(text.contains("Available    yes"), "unexpected probe output:\n{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_probe_unreachable_is_connection_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let mut cmd = oelo_cmd();
    cmd.args(["--address", &uri, "--timeout", "2", "probe"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(7), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("Could not reach controller"));
}
