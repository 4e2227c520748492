// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! End-to-end tests for the `treewatch` binary.

use assert_cmd::Command;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn treewatch() -> Command {
    let mut cmd = Command::cargo_bin("treewatch").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .env_remove("COLOR")
        .env_remove("TREEWATCH_TREE")
        .env_remove("TREEWATCH_MAX_CONCURRENT_BUILDERS")
        .env_remove("TREEWATCH_MAX_RECENT_BUILDS")
        .env_remove("TREEWATCH_LOG_FORMAT");
    cmd
}

/// Run a command expected to fail with `code`, returning its stderr.
fn stderr(cmd: &mut Command, code: i32) -> String {
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(code));
    String::from_utf8(output.stderr).unwrap()
}

fn stdout(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn analyze_prints_merged_alerts() {
    let out = stdout(treewatch().args(["analyze", "--builds", &fixture("history.json")]));

    similar_asserts::assert_eq!(
        out,
        "[new_failure] compile failing on multiple builders\n\
         \x20 key: chromium.linux.linux-rel.compile.compile\n\
         \x20 chromium/ci/linux-rel  build 12, last passing 11\n\
         \x20 chromium/ci/mac-rel  build 7, last passing 6\n\
         \x20 regression: refs/heads/main@{#120} .. refs/heads/main@{#125}\n\
         [new_failure] lint failing on chromium.linux/linux-rel\n\
         \x20 key: chromium.linux.linux-rel.lint.lint\n\
         \x20 chromium/ci/linux-rel  build 12, last passing 11\n\
         \x20 regression: refs/heads/main@{#100} .. refs/heads/main@{#130}\n"
    );
}

#[test]
fn analyze_json_applies_gatekeeper() {
    let out = stdout(treewatch().args([
        "analyze",
        "--builds",
        &fixture("history.json"),
        "--gatekeeper",
        &fixture("gatekeeper.json"),
        "--trees",
        &fixture("trees.json"),
        "--tree",
        "chromium",
        "-o",
        "json",
    ]));

    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    let alerts = report["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["key"], "chromium.linux.linux-rel.compile.compile");
    assert_eq!(alerts[0]["severity"], "tree_closer");
    assert_eq!(alerts[0]["tree_closer"], true);
    assert_eq!(alerts[0]["regression_range"]["lower"]["position"], 120);
    assert_eq!(report["skipped"].as_array().unwrap().len(), 0);
}

#[test]
fn analyze_tree_from_env() {
    let out = stdout(
        treewatch()
            .env("TREEWATCH_TREE", "chromium")
            .args(["analyze", "--builds", &fixture("history.json")])
            .args(["--gatekeeper", &fixture("gatekeeper.json"), "-o", "json"]),
    );

    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["alerts"].as_array().unwrap().len(), 1);
}

#[test]
fn analyze_missing_history_exits_1() {
    let err = stderr(treewatch().args(["analyze", "--builds", "/nonexistent/history.json"]), 1);
    assert!(err.contains("failed to read /nonexistent/history.json"), "{err}");
}

#[test]
fn analyze_invalid_history_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, r#"{"not": "a list"}"#).unwrap();

    let err = stderr(treewatch().args(["analyze", "--builds", path.to_str().unwrap()]), 1);
    assert!(err.contains("invalid build history"), "{err}");
}

#[yare::parameterized(
    closing_step      = { &["close", "chromium.linux", "linux-rel", "compile"], "true" },
    excluded_step     = { &["close", "chromium.linux", "linux-rel", "lint"], "false" },
    wildcard_builder  = { &["close", "chromium.mac", "mac-arm64", "unit_tests"], "true" },
    unknown_master    = { &["close", "chromium.win", "win-rel", "compile"], "false" },
    excluded_failure  = { &["exclude", "chromium", "chromium.linux", "linux-rel", "lint"], "true" },
    included_failure  = { &["exclude", "chromium", "chromium.linux", "linux-rel", "compile"], "false" },
    outside_tree      = { &["exclude", "chromium", "chromium.linux", "linux-dbg"], "true" },
    allowed_builder   = { &["exclude", "chromium", "chromium.mac", "mac-arm64"], "false" },
    forgiven_step     = { &["forgiving", "chromium.linux", "linux-rel", "bot_update"], "true" },
    unforgiven_step   = { &["forgiving", "chromium.linux", "linux-rel", "compile"], "false" },
    category_sheriffs = { &["sheriffs", "chromium.mac", "mac-arm64"], "sheriff_chromium" },
    no_sheriffs       = { &["sheriffs", "chromium.linux", "linux-rel"], "" },
)]
fn rules_queries(query: &[&str], expected: &str) {
    let out = stdout(
        treewatch()
            .args(["rules", "--gatekeeper", &fixture("gatekeeper.json")])
            .args(["--trees", &fixture("trees.json")])
            .args(query),
    );
    assert_eq!(out.trim(), expected);
}

#[test]
fn rules_json_decision() {
    let out = stdout(treewatch().args([
        "rules",
        "--gatekeeper",
        &fixture("gatekeeper.json"),
        "close",
        "chromium.linux",
        "linux-rel",
        "compile",
        "-o",
        "json",
    ]));

    let decision: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        decision,
        serde_json::json!({
            "query": "close",
            "master": "chromium.linux",
            "builder": "linux-rel",
            "step": "compile",
            "result": true,
        })
    );
}

#[test]
fn rules_without_gatekeeper_is_usage_error() {
    let err = stderr(treewatch().args(["rules", "close", "chromium.linux", "linux-rel", "compile"]), 2);
    assert!(err.contains("at least one --gatekeeper file is required"), "{err}");
}

#[test]
fn rules_check_reports_warnings() {
    let clean = stdout(treewatch().args(["rules", "--gatekeeper", &fixture("gatekeeper.json"), "check"]));
    assert_eq!(clean.trim(), "No warnings");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gatekeeper.json");
    std::fs::write(
        &path,
        r#"{ "masters": { "m": [{ "builders": { "b": { "categories": ["nope"] } } }] } }"#,
    )
    .unwrap();

    let out = stdout(treewatch().args(["rules", "--gatekeeper", path.to_str().unwrap(), "check"]));
    assert_eq!(out.trim(), "warning: undefined category 'nope' referenced by builder m/b");
}

#[test]
fn missing_subcommand_is_usage_error() {
    treewatch().assert().code(2);
}
