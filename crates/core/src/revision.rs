// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Revisions, commit positions and regression ranges.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single commit a build ran against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionSummary {
    pub git_hash: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub branch: String,
    /// Commit position on `branch`, when the build reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u64>,
}

impl RevisionSummary {
    /// `branch@{#position}`, or `None` without a position.
    pub fn commit_position(&self) -> Option<String> {
        self.position.map(|pos| format!("{}@{{#{}}}", self.branch, pos))
    }
}

/// Errors from revision and commit position extraction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RevisionError {
    #[error("couldn't find {0} in build output properties")]
    MissingOutputProperty(&'static str),
    #[error("build input has no gitiles commit")]
    MissingGitilesCommit,
    #[error("couldn't parse commit position string: {0:?}")]
    MalformedCommitPosition(String),
    #[error("no revision for build {build}: {output}; {input}")]
    Unavailable { build: u64, output: Box<RevisionError>, input: Box<RevisionError> },
}

/// Split a commit position such as `refs/heads/main@{#1234}` into its
/// branch and position.
pub fn parse_commit_position(commit_pos: &str) -> Result<(String, u64), RevisionError> {
    let malformed = || RevisionError::MalformedCommitPosition(commit_pos.to_string());
    let mut parts = commit_pos.split('@');
    let (Some(branch), Some(rest), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let pos = rest
        .strip_prefix("{#")
        .and_then(|r| r.strip_suffix('}'))
        .and_then(|n| n.parse::<u64>().ok())
        .ok_or_else(malformed)?;
    Ok((branch.to_string(), pos))
}

/// Commit interval believed to contain the culprit change.
///
/// `lower` is the newest confirmed-good revision, `upper` the oldest
/// confirmed-bad one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegressionRange {
    pub repo: String,
    pub host: String,
    pub lower: RevisionSummary,
    pub upper: RevisionSummary,
}

impl RegressionRange {
    pub fn new(lower: RevisionSummary, upper: RevisionSummary) -> Self {
        Self { repo: lower.repo.clone(), host: lower.host.clone(), lower, upper }
    }

    /// Both bounds rendered as `branch@{#pos}`.
    pub fn positions(&self) -> Vec<String> {
        [&self.lower, &self.upper].into_iter().filter_map(|r| r.commit_position()).collect()
    }

    /// Both bounds as git hashes.
    pub fn revisions(&self) -> [&str; 2] {
        [&self.lower.git_hash, &self.upper.git_hash]
    }
}

#[cfg(test)]
#[path = "revision_tests.rs"]
mod tests;
