// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use tw_analyzer::{SkipCause, SkippedBuilder};
use tw_core::{AlertKind, BuilderId, Culprit, Reason, RegressionRange, RevisionSummary, Severity};

fn rev(hash: &str, position: u64) -> RevisionSummary {
    RevisionSummary {
        git_hash: hash.into(),
        branch: "refs/heads/main".into(),
        position: Some(position),
        ..Default::default()
    }
}

fn alert() -> Alert {
    let mut range =
        StepFailureRange::new(BuilderId::new("chromium", "ci", "linux-rel"), "compile", 2, 3);
    range.last_passing = Some(1);
    Alert {
        key: "chromium.linux-rel.compile.compile".into(),
        title: "compile failing on chromium/linux-rel".into(),
        kind: AlertKind::BuildFailure,
        severity: Severity::NewFailure,
        step_name: "compile".into(),
        ranges: vec![range],
        regression_range: Some(RegressionRange::new(rev("good", 120), rev("bad", 125))),
        reason: Reason::build_step("compile"),
        tree_closer: false,
        culprits: vec![Culprit::new("bad")],
    }
}

fn render(report: &AnalysisReport) -> String {
    std::env::set_var("NO_COLOR", "1");
    let mut out = Vec::new();
    format_report(&mut out, report).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
#[serial]
fn text_report_lists_alert_details() {
    let report = AnalysisReport { alerts: vec![alert()], skipped: Vec::new() };

    similar_asserts::assert_eq!(
        render(&report),
        "[new_failure] compile failing on chromium/linux-rel\n\
         \x20 key: chromium.linux-rel.compile.compile\n\
         \x20 chromium/ci/linux-rel  builds 2..3, last passing 1\n\
         \x20 regression: refs/heads/main@{#120} .. refs/heads/main@{#125}\n\
         \x20 culprits: bad\n"
    );
}

#[test]
#[serial]
fn text_report_without_alerts_lists_skips() {
    let report = AnalysisReport {
        alerts: Vec::new(),
        skipped: vec![SkippedBuilder {
            builder: BuilderId::new("chromium", "ci", "win-rel"),
            cause: SkipCause::NoBuilds,
        }],
    };

    similar_asserts::assert_eq!(
        render(&report),
        "No alerts\n\nSkipped 1 builder(s)\n  chromium/ci/win-rel: no builds\n\
         \x20   https://ci.chromium.org/p/chromium/builders/ci/win-rel\n"
    );
}

#[yare::parameterized(
    single_build  = { 3, 3, None,    "chromium/ci/linux-rel  build 3, last passing unknown" },
    several       = { 2, 5, Some(1), "chromium/ci/linux-rel  builds 2..5, last passing 1" },
)]
fn range_line(first: u64, latest: u64, passing: Option<u64>, expected: &str) {
    let mut range =
        StepFailureRange::new(BuilderId::new("chromium", "ci", "linux-rel"), "compile", first, latest);
    range.last_passing = passing;
    assert_eq!(format_range(&range), expected);
}

#[test]
fn json_report_serializes() {
    let report = AnalysisReport { alerts: vec![alert()], skipped: Vec::new() };
    assert!(format_or_json(OutputFormat::Json, &report, || {}).is_ok());
}
