// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Analyzer settings and their environment overrides.

use serde::{Deserialize, Serialize};

/// Tunables for a batch analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Builders analyzed at once.
    pub max_concurrent_builders: usize,
    /// Builds of history scanned per builder, newest first.
    pub max_recent_builds: usize,
    /// Tree whose gatekeeper allow-lists and exclusions apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
}

impl AnalyzerConfig {
    pub const DEFAULT_MAX_CONCURRENT_BUILDERS: usize = 10;
    pub const DEFAULT_MAX_RECENT_BUILDS: usize = 100;

    /// Defaults overridden by `TREEWATCH_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            max_concurrent_builders: max_concurrent_builders(),
            max_recent_builds: max_recent_builds(),
            tree: tree(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_builders: Self::DEFAULT_MAX_CONCURRENT_BUILDERS,
            max_recent_builds: Self::DEFAULT_MAX_RECENT_BUILDS,
            tree: None,
        }
    }
}

/// Worker limit (default 10, `TREEWATCH_MAX_CONCURRENT_BUILDERS`). Zero is ignored.
fn max_concurrent_builders() -> usize {
    positive("TREEWATCH_MAX_CONCURRENT_BUILDERS")
        .unwrap_or(AnalyzerConfig::DEFAULT_MAX_CONCURRENT_BUILDERS)
}

/// History depth (default 100, `TREEWATCH_MAX_RECENT_BUILDS`). Zero is ignored.
fn max_recent_builds() -> usize {
    positive("TREEWATCH_MAX_RECENT_BUILDS").unwrap_or(AnalyzerConfig::DEFAULT_MAX_RECENT_BUILDS)
}

fn tree() -> Option<String> {
    std::env::var("TREEWATCH_TREE").ok().filter(|s| !s.is_empty())
}

fn positive(var: &str) -> Option<usize> {
    std::env::var(var).ok().and_then(|s| s.parse::<usize>().ok()).filter(|n| *n > 0)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
