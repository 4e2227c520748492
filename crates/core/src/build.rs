// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builds and steps as reported by the build-result service.

use crate::builder::BuilderId;
use serde::{Deserialize, Serialize};

/// Status of a build or a single step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Scheduled,
    Started,
    Success,
    Failure,
    InfraFailure,
    Canceled,
}

impl Status {
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}

crate::simple_display! {
    Status {
        Scheduled => "scheduled",
        Started => "started",
        Success => "success",
        Failure => "failure",
        InfraFailure => "infra_failure",
        Canceled => "canceled",
    }
}

/// One step of a build. Nested steps are flattened with `|` separators,
/// e.g. `compile|gn`, and follow their parent directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    pub status: Status,
}

impl Step {
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self { name: name.into(), status }
    }

    pub fn success(name: impl Into<String>) -> Self {
        Self::new(name, Status::Success)
    }

    pub fn failure(name: impl Into<String>) -> Self {
        Self::new(name, Status::Failure)
    }
}

/// Commit a build was requested against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitilesCommit {
    pub host: String,
    pub project: String,
    #[serde(default, rename = "ref")]
    pub git_ref: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
}

/// Requested (input) side of a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildInput {
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitiles_commit: Option<GitilesCommit>,
}

/// Committed (output) side of a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildOutput {
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// A finished or running build of one builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub builder_id: BuilderId,
    pub number: u64,
    pub status: Status,
    #[serde(default)]
    pub steps: Vec<Step>,
    /// Start time, seconds since the Unix epoch.
    #[serde(default)]
    pub start_time: u64,
    #[serde(default)]
    pub input: BuildInput,
    #[serde(default)]
    pub output: BuildOutput,
}

impl Build {
    /// String-valued input property, if present.
    pub fn input_property(&self, key: &str) -> Option<&str> {
        self.input.properties.get(key).and_then(|v| v.as_str())
    }

    /// String-valued output property, if present.
    pub fn output_property(&self, key: &str) -> Option<&str> {
        self.output.properties.get(key).and_then(|v| v.as_str())
    }
}

crate::builder! {
    pub struct BuildBuilder => Build {
        into {
            builder_id: BuilderId = BuilderId::new("chromium", "ci", "linux-rel"),
        }
        set {
            number: u64 = 1,
            status: Status = Status::Failure,
            steps: Vec<Step> = Vec::new(),
            start_time: u64 = 0,
            input: BuildInput = BuildInput::default(),
            output: BuildOutput = BuildOutput::default(),
        }
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
