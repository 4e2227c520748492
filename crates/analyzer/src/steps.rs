// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Leaf step filtering.
//!
//! Nested steps are flattened with `|` separators and listed directly after
//! their parent, so a step is a leaf unless the next one is its child.

use std::collections::BTreeSet;
use tw_core::{Build, Step};

/// Synthetic steps that never produce alerts.
const NON_ALERTABLE: [&str; 2] = ["Failure reason", "steps"];

/// Steps with no nested child step, in original order.
pub fn leaf_steps(steps: &[Step]) -> Vec<&Step> {
    steps
        .iter()
        .enumerate()
        .filter(|(i, step)| match steps.get(i + 1) {
            Some(next) => !is_child_of(&next.name, &step.name),
            None => true,
        })
        .map(|(_, step)| step)
        .collect()
}

fn is_child_of(name: &str, parent: &str) -> bool {
    name.strip_prefix(parent).is_some_and(|rest| rest.starts_with('|'))
}

/// A non-successful leaf that is not one of the synthetic wrapper steps.
///
/// Leaf-ness is decided by the caller via [`leaf_steps`].
pub fn is_alertable(step: &Step) -> bool {
    !step.status.is_success() && !NON_ALERTABLE.contains(&step.name.as_str())
}

/// Names of the alertable leaf steps of a build.
pub fn alertable_leaf_names(build: &Build) -> BTreeSet<String> {
    leaf_steps(&build.steps)
        .into_iter()
        .filter(|step| is_alertable(step))
        .map(|step| step.name.clone())
        .collect()
}

/// Names of every step that ran in a build, nested or not.
pub fn attempted_step_names(build: &Build) -> BTreeSet<String> {
    build.steps.iter().map(|step| step.name.clone()).collect()
}

#[cfg(test)]
#[path = "steps_tests.rs"]
mod tests;
