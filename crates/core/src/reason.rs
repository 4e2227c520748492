// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failure reasons attached to alerts.
//!
//! A reason says *why* a step failed. One failing step may have several
//! reasons (e.g. distinct sets of failing tests); each becomes its own alert.

use crate::alert::Severity;
use crate::range::StepFailureRange;
use serde::{Deserialize, Serialize};

/// A single test reported by a failing test step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestWithResult {
    pub test_name: String,
    #[serde(default)]
    pub is_flaky: bool,
}

impl TestWithResult {
    pub fn new(test_name: impl Into<String>) -> Self {
        Self { test_name: test_name.into(), is_flaky: false }
    }
}

/// Why a step failed, by alert source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Reason {
    /// Derived from build step status alone.
    BuildStep { step: String },
    /// Derived from test results of the failing step.
    TestFailure { step: String, tests: Vec<TestWithResult> },
    /// Pre-grouped failure coming from the warehouse-backed source.
    BigQuery {
        step: String,
        kind: String,
        severity: Severity,
        #[serde(default)]
        tests: Vec<TestWithResult>,
        #[serde(default)]
        num_failing_tests: u64,
    },
}

impl Reason {
    pub fn build_step(step: impl Into<String>) -> Self {
        Reason::BuildStep { step: step.into() }
    }

    pub fn step(&self) -> &str {
        match self {
            Reason::BuildStep { step }
            | Reason::TestFailure { step, .. }
            | Reason::BigQuery { step, .. } => step,
        }
    }

    /// Stable identity used to de-duplicate reasons across builders.
    pub fn signature(&self) -> String {
        match self {
            Reason::BuildStep { step } | Reason::BigQuery { step, .. } => step.clone(),
            Reason::TestFailure { tests, .. } => {
                let mut names: Vec<&str> = tests.iter().map(|t| t.test_name.as_str()).collect();
                names.sort_unstable();
                names.dedup();
                names.join(",")
            }
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Reason::BuildStep { .. } => "basic",
            Reason::TestFailure { .. } => "test",
            Reason::BigQuery { kind, .. } => kind,
        }
    }

    /// Severity the reason itself demands; [`Severity::NoSeverity`] defers
    /// to the alert's own classification.
    pub fn severity(&self) -> Severity {
        match self {
            Reason::BigQuery { severity, .. } => *severity,
            Reason::BuildStep { .. } | Reason::TestFailure { .. } => Severity::NoSeverity,
        }
    }

    fn failing_test_count(&self) -> u64 {
        match self {
            Reason::BuildStep { .. } => 0,
            Reason::TestFailure { tests, .. } => tests.len() as u64,
            Reason::BigQuery { num_failing_tests, .. } => *num_failing_tests,
        }
    }

    /// Human readable alert title for the given contributing ranges.
    pub fn title(&self, ranges: &[StepFailureRange]) -> String {
        let mut title = format!("{} failing", self.step());
        let tests = self.failing_test_count();
        if tests > 0 {
            title.push_str(&format!(" ({} tests)", tests));
        }
        match ranges {
            [] => title,
            [only] => format!("{} on {}/{}", title, only.group_name(), only.builder.builder),
            _ => format!("{} on multiple builders", title),
        }
    }
}

#[cfg(test)]
#[path = "reason_tests.rs"]
mod tests;
