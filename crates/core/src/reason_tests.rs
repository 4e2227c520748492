// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::builder::BuilderId;

fn range(builder: &str, master: Option<&str>) -> StepFailureRange {
    let mut r = StepFailureRange::new(BuilderId::new("chromium", "ci", builder), "browser_tests", 1, 2);
    r.master = master.map(str::to_string);
    r
}

fn tests(names: &[&str]) -> Vec<TestWithResult> {
    names.iter().map(|n| TestWithResult::new(*n)).collect()
}

#[test]
fn build_step_reason_basics() {
    let reason = Reason::build_step("compile");
    assert_eq!(reason.step(), "compile");
    assert_eq!(reason.signature(), "compile");
    assert_eq!(reason.kind(), "basic");
    assert_eq!(reason.severity(), Severity::NoSeverity);
}

#[test]
fn test_failure_signature_is_sorted_and_deduplicated() {
    let reason = Reason::TestFailure {
        step: "webkit_layout_tests".into(),
        tests: tests(&["some/test.html", "some-other/test.html", "some/test.html"]),
    };
    assert_eq!(reason.signature(), "some-other/test.html,some/test.html");
    assert_eq!(reason.kind(), "test");
}

#[test]
fn bigquery_reason_carries_kind_and_severity() {
    let reason = Reason::BigQuery {
        step: "compile".into(),
        kind: "infra".into(),
        severity: Severity::InfraFailure,
        tests: Vec::new(),
        num_failing_tests: 0,
    };
    assert_eq!(reason.kind(), "infra");
    assert_eq!(reason.severity(), Severity::InfraFailure);
    assert_eq!(reason.signature(), "compile");
}

#[test]
fn title_for_single_range_names_master_and_builder() {
    let reason = Reason::build_step("browser_tests");
    let title = reason.title(&[range("linux-rel", Some("chromium.linux"))]);
    assert_eq!(title, "browser_tests failing on chromium.linux/linux-rel");
}

#[test]
fn title_falls_back_to_project_without_master() {
    let reason = Reason::build_step("browser_tests");
    let title = reason.title(&[range("linux-rel", None)]);
    assert_eq!(title, "browser_tests failing on chromium/linux-rel");
}

#[test]
fn title_for_multiple_ranges() {
    let reason = Reason::TestFailure { step: "browser_tests".into(), tests: tests(&["a", "b"]) };
    let title = reason.title(&[range("linux-rel", None), range("mac-rel", None)]);
    assert_eq!(title, "browser_tests failing (2 tests) on multiple builders");
}

#[test]
fn title_without_ranges_is_just_the_prefix() {
    let reason = Reason::BigQuery {
        step: "browser_tests".into(),
        kind: "test".into(),
        severity: Severity::NoSeverity,
        tests: Vec::new(),
        num_failing_tests: 12,
    };
    assert_eq!(reason.title(&[]), "browser_tests failing (12 tests)");
}

#[test]
fn reason_serde_is_tagged_by_source() {
    let reason = Reason::build_step("compile");
    let json = serde_json::to_string(&reason).unwrap();
    assert_eq!(json, r#"{"source":"build_step","step":"compile"}"#);
    let parsed: Reason = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, reason);
}
