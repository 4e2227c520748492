// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-builder runs of a failing step.

use crate::builder::BuilderId;
use crate::revision::RevisionSummary;
use serde::{Deserialize, Serialize};

/// Contiguous run of builds on one builder in which a step kept failing.
///
/// `first_failure <= latest_failure`. When `last_passing` is set it is older
/// than `first_failure` and the step actually ran (and passed) in that build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailureRange {
    pub builder: BuilderId,
    /// Legacy master the builder reports under, if the build said so.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<String>,
    pub step_name: String,
    pub first_failure: u64,
    pub latest_failure: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_passing: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_failing_rev: Option<RevisionSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_passing_rev: Option<RevisionSummary>,
    /// Start time of the first failing build, seconds since the Unix epoch.
    #[serde(default)]
    pub start_time: u64,
}

impl StepFailureRange {
    pub fn new(builder: BuilderId, step_name: impl Into<String>, first: u64, latest: u64) -> Self {
        Self {
            builder,
            master: None,
            step_name: step_name.into(),
            first_failure: first,
            latest_failure: latest,
            last_passing: None,
            first_failing_rev: None,
            last_passing_rev: None,
            start_time: 0,
        }
    }

    /// Master name when known, otherwise the builder's project.
    pub fn group_name(&self) -> &str {
        self.master.as_deref().unwrap_or(&self.builder.project)
    }
}
