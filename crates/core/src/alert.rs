// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alerts handed to the presentation layer.

use crate::range::StepFailureRange;
use crate::reason::Reason;
use crate::revision::RegressionRange;
use serde::{Deserialize, Serialize};

/// How urgently an alert needs attention. Variants sort most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    TreeCloser,
    InfraFailure,
    ReliableFailure,
    NewFailure,
    NoSeverity,
}

crate::simple_display! {
    Severity {
        TreeCloser => "tree_closer",
        InfraFailure => "infra_failure",
        ReliableFailure => "reliable_failure",
        NewFailure => "new_failure",
        NoSeverity => "no_severity",
    }
}

/// Kind of failure an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    BuildFailure,
    InfraFailure,
}

crate::simple_display! {
    AlertKind {
        BuildFailure => "build_failure",
        InfraFailure => "infra_failure",
    }
}

/// Suspected culprit change reported by an external analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Culprit {
    pub revision: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Culprit {
    pub fn new(revision: impl Into<String>) -> Self {
        Self { revision: revision.into(), repo: String::new(), commit_author: None, confidence: None }
    }
}

/// One step failing, for one reason, across one or more builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub key: String,
    pub title: String,
    pub kind: AlertKind,
    pub severity: Severity,
    pub step_name: String,
    pub ranges: Vec<StepFailureRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regression_range: Option<RegressionRange>,
    pub reason: Reason,
    #[serde(default)]
    pub tree_closer: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub culprits: Vec<Culprit>,
}

impl Alert {
    /// Dashboard key: `{master}.{builder}.{step}.{signature}` of the first range.
    pub fn key_for(range: &StepFailureRange, reason: &Reason) -> String {
        format!(
            "{}.{}.{}.{}",
            range.group_name(),
            range.builder.builder,
            range.step_name,
            reason.signature()
        )
    }
}

#[cfg(test)]
#[path = "alert_tests.rs"]
mod tests;
