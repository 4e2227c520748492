// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-builder merging of failure ranges.

use std::collections::BTreeMap;
use tw_core::{RegressionRange, StepFailureRange};

/// All ranges of one failing step, across builders.
#[derive(Debug, Clone, PartialEq)]
pub struct StepGroup {
    pub step_name: String,
    /// Sorted by builder.
    pub ranges: Vec<StepFailureRange>,
    pub regression_range: Option<RegressionRange>,
}

/// Group ranges by step name, in step name order.
pub fn merge_ranges(ranges: Vec<StepFailureRange>) -> Vec<StepGroup> {
    let mut by_step: BTreeMap<String, Vec<StepFailureRange>> = BTreeMap::new();
    for range in ranges {
        by_step.entry(range.step_name.clone()).or_default().push(range);
    }
    by_step
        .into_iter()
        .map(|(step_name, mut ranges)| {
            ranges.sort_by(|a, b| a.builder.cmp(&b.builder).then(a.first_failure.cmp(&b.first_failure)));
            let regression_range = regression_range(&ranges);
            StepGroup { step_name, ranges, regression_range }
        })
        .collect()
}

/// Narrowest commit interval consistent with every range.
///
/// The lower bound is the newest last-passing revision, the upper bound the
/// oldest first-failing one. Revisions without a commit position are ignored;
/// both bounds must resolve.
pub fn regression_range(ranges: &[StepFailureRange]) -> Option<RegressionRange> {
    let lower = ranges
        .iter()
        .filter_map(|r| r.last_passing_rev.as_ref())
        .filter_map(|rev| rev.position.map(|pos| (pos, rev)))
        .max_by_key(|(pos, _)| *pos)?;
    let upper = ranges
        .iter()
        .filter_map(|r| r.first_failing_rev.as_ref())
        .filter_map(|rev| rev.position.map(|pos| (pos, rev)))
        .min_by_key(|(pos, _)| *pos)?;
    Some(RegressionRange::new(lower.1.clone(), upper.1.clone()))
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
