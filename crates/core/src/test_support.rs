// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Build, BuildInput, BuildOutput, BuilderId, GitilesCommit, Status, Step};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for build histories.
pub mod strategies {
    use crate::{Build, Status, Step};
    use proptest::prelude::*;

    pub fn arb_status() -> impl Strategy<Value = Status> {
        prop_oneof![
            4 => Just(Status::Success),
            3 => Just(Status::Failure),
            1 => Just(Status::InfraFailure),
        ]
    }

    /// Steps drawn from a small name pool so histories overlap.
    pub fn arb_steps() -> impl Strategy<Value = Vec<Step>> {
        let names = prop::sample::subsequence(
            vec!["compile", "browser_tests", "unit_tests", "Failure reason", "lint"],
            0..=5,
        );
        names.prop_flat_map(|names| {
            let len = names.len();
            (Just(names), prop::collection::vec(arb_status(), len))
        })
        .prop_map(|(names, statuses)| {
            names.into_iter().zip(statuses).map(|(n, s)| Step::new(n, s)).collect()
        })
    }

    /// A single builder's history, most recent first, numbered descending.
    pub fn arb_history() -> impl Strategy<Value = Vec<Build>> {
        prop::collection::vec((arb_status(), arb_steps()), 1..8).prop_map(|builds| {
            let top = builds.len() as u64 + 10;
            builds
                .into_iter()
                .enumerate()
                .map(|(i, (status, steps))| {
                    Build::builder().number(top - i as u64).status(status).steps(steps).build()
                })
                .collect()
        })
    }
}

// ── Build factory functions ─────────────────────────────────────────────

pub fn builder_id(name: &str) -> BuilderId {
    BuilderId::new("chromium", "ci", name)
}

/// Build whose status is derived from its steps: failure if any step failed.
pub fn build(builder: &str, number: u64, steps: Vec<Step>) -> Build {
    let status =
        if steps.iter().all(|s| s.status.is_success()) { Status::Success } else { Status::Failure };
    Build::builder().builder_id(builder_id(builder)).number(number).status(status).steps(steps).build()
}

/// Shorthand for a list of passing and failing steps.
pub fn steps(passing: &[&str], failing: &[&str]) -> Vec<Step> {
    passing
        .iter()
        .map(|n| Step::success(*n))
        .chain(failing.iter().map(|n| Step::failure(*n)))
        .collect()
}

/// Input properties carrying the legacy master and builder names.
pub fn master_input(master: &str, builder: &str) -> BuildInput {
    let mut input = BuildInput::default();
    input.properties.insert("mastername".into(), master.into());
    input.properties.insert("buildername".into(), builder.into());
    input
}

/// Output properties carrying a chromium revision and commit position.
pub fn revision_output(hash: &str, position: u64) -> BuildOutput {
    let mut output = BuildOutput::default();
    output.properties.insert("got_revision".into(), hash.into());
    output
        .properties
        .insert("got_revision_cp".into(), format!("refs/heads/main@{{#{}}}", position).into());
    output
}

pub fn gitiles_input(hash: &str, position: Option<u64>) -> BuildInput {
    BuildInput {
        properties: Default::default(),
        gitiles_commit: Some(GitilesCommit {
            host: "chromium.googlesource.com".into(),
            project: "chromiumos/manifest".into(),
            git_ref: "refs/heads/main".into(),
            id: hash.into(),
            position,
        }),
    }
}
