// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only gatekeeper queries over aggregated configs.

use crate::aggregate::{aggregate, BuilderRules, ConfigWarning, MasterRules};
use crate::config::{parse_gatekeeper, parse_trees, GatekeeperConfig, TreeConfig};
use crate::error::GatekeeperError;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::path::Path;

/// Aggregated gatekeeper rules plus the tree allow-lists.
///
/// Immutable once built; share it behind an `Arc` for concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct GatekeeperRules {
    masters: IndexMap<String, MasterRules>,
    trees: TreeConfig,
    warnings: Vec<ConfigWarning>,
}

impl GatekeeperRules {
    /// Aggregate already-parsed configs. Earlier configs take precedence.
    pub fn from_configs(configs: &[GatekeeperConfig], trees: TreeConfig) -> Self {
        let (masters, warnings) = aggregate(configs);
        Self { masters, trees, warnings }
    }

    /// Read and aggregate gatekeeper files, plus an optional trees file.
    pub fn load<P: AsRef<Path>>(
        gatekeeper_paths: &[P],
        trees_path: Option<&Path>,
    ) -> Result<Self, GatekeeperError> {
        let configs = gatekeeper_paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                parse_gatekeeper(&read(path)?, &path.display().to_string())
            })
            .collect::<Result<Vec<_>, _>>()?;
        let trees = match trees_path {
            Some(path) => parse_trees(&read(path)?, &path.display().to_string())?,
            None => TreeConfig::default(),
        };

        let rules = Self::from_configs(&configs, trees);
        tracing::info!(
            configs = configs.len(),
            masters = rules.masters.len(),
            warnings = rules.warnings.len(),
            "loaded gatekeeper rules"
        );
        Ok(rules)
    }

    /// Problems found during aggregation.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    fn builder(&self, master: &str, builder: &str) -> Option<&BuilderRules> {
        self.masters.get(master)?.builder(builder)
    }

    /// Whether a failure of `step` on this builder closes the tree.
    ///
    /// Unknown masters and builders never close the tree. Exclusions are exact
    /// names here, not patterns.
    pub fn would_close_tree(&self, master: &str, builder: &str, step: &str) -> bool {
        let Some(rules) = self.builder(master, builder) else {
            return false;
        };
        if rules.excludes_exactly(step) {
            return false;
        }
        rules.closes_on(step)
    }

    /// Whether every failure of this builder is excluded from `tree`.
    ///
    /// Fails open: a master missing from the gatekeeper config is not excluded.
    pub fn exclude_builder(&self, tree: &str, master: &str, builder: &str) -> bool {
        if !self.tree_allows(tree, master, builder) {
            return true;
        }
        let Some(rules) = self.masters.get(master) else {
            tracing::warn!(master, builder, "master not in gatekeeper config, not excluding builder");
            return false;
        };
        rules.excluded_builders.contains_exact_or_wildcard(builder)
    }

    /// Whether a failure of `step` on this builder should be dropped.
    ///
    /// Fails closed: a builder with no rules (exact or `*`) is excluded.
    pub fn exclude_failure(&self, tree: &str, master: &str, builder: &str, step: &str) -> bool {
        if self.exclude_builder(tree, master, builder) {
            return true;
        }
        let Some(master_rules) = self.masters.get(master) else {
            tracing::warn!(master, builder, step, "master not in gatekeeper config, excluding failure");
            return true;
        };
        if master_rules.excluded_builders.matches(builder) || master_rules.excluded_steps.matches(step) {
            return true;
        }
        match master_rules.builder(builder) {
            Some(rules) => rules.excludes_matching(step),
            None => {
                tracing::warn!(master, builder, step, "builder not in gatekeeper config, excluding failure");
                true
            }
        }
    }

    /// Sheriff rotations notified for this builder. Empty if unknown.
    pub fn sheriff_classes(&self, master: &str, builder: &str) -> BTreeSet<String> {
        self.builder(master, builder)
            .map(|rules| rules.rules.sheriff_classes.clone())
            .unwrap_or_default()
    }

    pub fn is_forgiving(&self, master: &str, builder: &str, step: &str) -> bool {
        self.builder(master, builder).is_some_and(|rules| rules.forgives(step))
    }

    /// The tree's allow-list for `master` admits `builder`. Trees that do not
    /// declare the master impose no restriction.
    fn tree_allows(&self, tree: &str, master: &str, builder: &str) -> bool {
        match self.trees.masters(tree).iter().find(|m| m.master == master) {
            Some(allowed) => allowed.builders.iter().any(|b| b == builder || b == "*"),
            None => true,
        }
    }
}

fn read(path: &Path) -> Result<String, GatekeeperError> {
    std::fs::read_to_string(path)
        .map_err(|source| GatekeeperError::Io { path: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
