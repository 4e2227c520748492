// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn fake_metrics_accumulate() {
    let metrics = FakeMetrics::new();
    metrics.incr(Metric::AlertsEmitted);
    metrics.add(Metric::AlertsEmitted, 2);
    metrics.incr(Metric::BuildersSkipped);

    assert_eq!(metrics.get(Metric::AlertsEmitted), 3);
    assert_eq!(metrics.get(Metric::BuildersSkipped), 1);
    assert_eq!(metrics.get(Metric::StepFailures), 0);
    assert_eq!(metrics.snapshot().len(), 2);
}

#[test]
fn fake_metrics_clones_share_counters() {
    let metrics = FakeMetrics::new();
    let clone = metrics.clone();
    clone.incr(Metric::StepFailures);
    assert_eq!(metrics.get(Metric::StepFailures), 1);
}

#[test]
fn noop_metrics_accepts_everything() {
    let sink: &dyn MetricsSink = &NoopMetrics;
    sink.add(Metric::BuildersAnalyzed, 10);
}

#[test]
fn metric_names() {
    assert_eq!(Metric::RevisionLookupFailures.to_string(), "revision_lookup_failures");
    assert_eq!(
        serde_json::to_string(&Metric::AlertsExcluded).unwrap(),
        "\"alerts_excluded\""
    );
}
