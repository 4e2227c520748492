// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Revision lookup for individual builds.

use tw_core::{parse_commit_position, Build, RevisionError, RevisionSummary};

/// Extracts the commit a build ran against.
pub trait RevisionExtractor: Send + Sync {
    fn revision(&self, build: &Build) -> Result<RevisionSummary, RevisionError>;
}

/// Reads the revision from build properties.
///
/// Prefers the committed revision in the output properties (`got_revision`,
/// `got_revision_cp`), falling back to the input gitiles commit.
#[derive(Debug, Clone)]
pub struct PropertyRevisionExtractor {
    host: String,
    repo: String,
}

impl Default for PropertyRevisionExtractor {
    fn default() -> Self {
        Self::new("https://chromium.googlesource.com", "chromium/src")
    }
}

impl PropertyRevisionExtractor {
    /// Host and repo reported for revisions read from output properties.
    pub fn new(host: impl Into<String>, repo: impl Into<String>) -> Self {
        Self { host: host.into(), repo: repo.into() }
    }

    fn read_output(&self, build: &Build) -> Result<RevisionSummary, RevisionError> {
        let hash = build
            .output_property("got_revision")
            .ok_or(RevisionError::MissingOutputProperty("got_revision"))?;
        let (branch, position) = match build.output_property("got_revision_cp") {
            Some(cp) => {
                let (branch, pos) = parse_commit_position(cp)?;
                (branch, Some(pos))
            }
            None => (String::new(), None),
        };
        Ok(RevisionSummary {
            git_hash: hash.to_string(),
            repo: self.repo.clone(),
            host: self.host.clone(),
            branch,
            position,
        })
    }

    fn read_input(build: &Build) -> Result<RevisionSummary, RevisionError> {
        let commit = build.input.gitiles_commit.as_ref().ok_or(RevisionError::MissingGitilesCommit)?;
        Ok(RevisionSummary {
            git_hash: commit.id.clone(),
            repo: commit.project.clone(),
            host: commit.host.clone(),
            branch: commit.git_ref.clone(),
            position: commit.position,
        })
    }
}

impl RevisionExtractor for PropertyRevisionExtractor {
    fn revision(&self, build: &Build) -> Result<RevisionSummary, RevisionError> {
        let output = match self.read_output(build) {
            Ok(rev) => return Ok(rev),
            Err(e) => e,
        };
        Self::read_input(build).map_err(|input| RevisionError::Unavailable {
            build: build.number,
            output: Box::new(output),
            input: Box::new(input),
        })
    }
}

#[cfg(test)]
#[path = "revision_tests.rs"]
mod tests;
