// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    scheduled     = { Status::Scheduled,    "scheduled" },
    started       = { Status::Started,      "started" },
    success       = { Status::Success,      "success" },
    failure       = { Status::Failure,      "failure" },
    infra_failure = { Status::InfraFailure, "infra_failure" },
    canceled      = { Status::Canceled,     "canceled" },
)]
fn status_display_matches_serde(status: Status, expected: &str) {
    assert_eq!(status.to_string(), expected);
    assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{expected}\""));
}

#[test]
fn only_success_is_success() {
    assert!(Status::Success.is_success());
    assert!(!Status::Failure.is_success());
    assert!(!Status::InfraFailure.is_success());
    assert!(!Status::Canceled.is_success());
}

#[test]
fn build_deserializes_with_defaults() {
    let json = r#"{
        "builder_id": {"project": "chromium", "bucket": "ci", "builder": "linux-rel"},
        "number": 42,
        "status": "failure"
    }"#;
    let build: Build = serde_json::from_str(json).unwrap();
    assert_eq!(build.number, 42);
    assert!(build.steps.is_empty());
    assert!(build.input.gitiles_commit.is_none());
    assert!(build.output.properties.is_empty());
}

#[test]
fn gitiles_commit_uses_ref_key() {
    let json = r#"{"host": "h", "project": "p", "ref": "refs/heads/main", "id": "abc"}"#;
    let commit: GitilesCommit = serde_json::from_str(json).unwrap();
    assert_eq!(commit.git_ref, "refs/heads/main");
    assert_eq!(commit.position, None);
}

#[test]
fn property_lookups_only_return_strings() {
    let mut input = BuildInput::default();
    input.properties.insert("mastername".into(), "chromium.linux".into());
    input.properties.insert("count".into(), 3.into());
    let mut output = BuildOutput::default();
    output.properties.insert("got_revision".into(), "deadbeef".into());

    let build = Build::builder().input(input).output(output).build();
    assert_eq!(build.input_property("mastername"), Some("chromium.linux"));
    assert_eq!(build.input_property("count"), None);
    assert_eq!(build.input_property("missing"), None);
    assert_eq!(build.output_property("got_revision"), Some("deadbeef"));
}

#[test]
fn test_builder_defaults() {
    let build = Build::builder().number(9).steps(vec![Step::failure("compile")]).build();
    assert_eq!(build.builder_id, BuilderId::new("chromium", "ci", "linux-rel"));
    assert_eq!(build.number, 9);
    assert_eq!(build.status, Status::Failure);
    assert_eq!(build.steps, vec![Step::new("compile", Status::Failure)]);
}
