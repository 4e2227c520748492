// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-builder failure range tracking.
//!
//! Walks one builder's history from the newest build backwards, following
//! every step that fails in the newest build until the build where it last
//! ran and passed. A build where the step did not run at all neither extends
//! nor ends its run.

use crate::revision::RevisionExtractor;
use crate::steps::{alertable_leaf_names, attempted_step_names};
use std::collections::{BTreeMap, BTreeSet};
use tw_core::{Build, MasterLocation, Metric, MetricsSink, RevisionSummary, StepFailureRange};

/// Consecutive failures of one step, by build number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRun {
    pub step: String,
    /// Oldest failing build of the run.
    pub first_failure: u64,
    /// Newest failing build of the run.
    pub latest_failure: u64,
    /// Newest build older than the run in which the step ran and passed.
    pub last_passing: Option<u64>,
}

/// Find the failure runs of every step failing in the newest build.
///
/// `history` is ordered most recent first. Runs are sorted by step name.
pub fn track_failures(history: &[Build]) -> Vec<FailureRun> {
    let Some(latest) = history.first() else {
        return Vec::new();
    };
    if latest.status.is_success() {
        return Vec::new();
    }

    let mut carry = alertable_leaf_names(latest);
    let mut runs: BTreeMap<String, FailureRun> = BTreeMap::new();

    for build in history {
        if carry.is_empty() {
            break;
        }
        let attempted = attempted_step_names(build);
        let failing = alertable_leaf_names(build);

        let terminating: BTreeSet<String> = carry
            .iter()
            .filter(|step| !failing.contains(*step) && attempted.contains(*step))
            .cloned()
            .collect();
        for step in &terminating {
            carry.remove(step);
            if let Some(run) = runs.get_mut(step) {
                run.last_passing.get_or_insert(build.number);
            }
        }

        for step in carry.intersection(&failing) {
            runs.entry(step.clone())
                .and_modify(|run| run.first_failure = build.number)
                .or_insert_with(|| FailureRun {
                    step: step.clone(),
                    first_failure: build.number,
                    latest_failure: build.number,
                    last_passing: None,
                });
        }
    }

    runs.into_values().collect()
}

/// Track failures and resolve them into ranges with revisions.
///
/// Revision lookups that fail are logged and counted; the range is kept
/// without the missing revision.
pub fn failure_ranges(
    history: &[Build],
    extractor: &dyn RevisionExtractor,
    metrics: &dyn MetricsSink,
) -> Vec<StepFailureRange> {
    track_failures(history)
        .into_iter()
        .filter_map(|run| to_range(run, history, extractor, metrics))
        .collect()
}

fn to_range(
    run: FailureRun,
    history: &[Build],
    extractor: &dyn RevisionExtractor,
    metrics: &dyn MetricsSink,
) -> Option<StepFailureRange> {
    let find = |number: u64| history.iter().find(|b| b.number == number);
    let latest = find(run.latest_failure)?;
    let first = find(run.first_failure)?;

    let mut range = StepFailureRange::new(
        latest.builder_id.clone(),
        run.step,
        run.first_failure,
        run.latest_failure,
    );
    range.start_time = first.start_time;
    range.master = MasterLocation::from_build(latest).map(MasterLocation::into_name);
    if range.master.is_none() {
        tracing::debug!(
            builder = %range.builder,
            build = latest.number,
            "build has no mastername property"
        );
    }

    let Some(passing) = run.last_passing.and_then(find) else {
        tracing::warn!(
            builder = %range.builder,
            step = %range.step_name,
            first_failure = range.first_failure,
            "could not determine last passing run"
        );
        return Some(range);
    };
    range.last_passing = Some(passing.number);
    range.first_failing_rev = lookup(extractor, metrics, first);
    range.last_passing_rev = lookup(extractor, metrics, passing);
    Some(range)
}

fn lookup(
    extractor: &dyn RevisionExtractor,
    metrics: &dyn MetricsSink,
    build: &Build,
) -> Option<RevisionSummary> {
    match extractor.revision(build) {
        Ok(rev) => Some(rev),
        Err(e) => {
            tracing::warn!(builder = %build.builder_id, build = build.number, error = %e, "revision lookup failed");
            metrics.incr(Metric::RevisionLookupFailures);
            None
        }
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
