// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Category aggregation: fold referenced categories into effective rule sets.
//!
//! Conflict handling:
//! - Undefined category → ignored (warning)
//! - Master defined by several configs or entries → first wins (warning)
//! - Malformed glob → kept as a non-match (warning)

use crate::config::{GatekeeperConfig, MasterConfig, RuleSet};
use crate::pattern::GlobSet;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Effective rules of one builder after category aggregation.
#[derive(Debug, Clone)]
pub struct BuilderRules {
    pub rules: RuleSet,
    excluded_steps: GlobSet,
}

impl BuilderRules {
    fn new(rules: RuleSet, location: &str, warnings: &mut Vec<ConfigWarning>) -> Self {
        let excluded_steps = compile(rules.excluded_steps.iter().cloned(), location, warnings);
        Self { rules, excluded_steps }
    }

    /// Exact-name exclusion, as used by tree-closing decisions.
    pub fn excludes_exactly(&self, step: &str) -> bool {
        self.rules.excluded_steps.contains(step)
    }

    /// Glob exclusion, as used by failure filtering.
    pub fn excludes_matching(&self, step: &str) -> bool {
        self.excluded_steps.matches(step)
    }

    /// Whether a failure of `step` closes the tree, ignoring exclusions.
    pub fn closes_on(&self, step: &str) -> bool {
        lists_step(&self.rules.closing_steps, step) || lists_step(&self.rules.closing_optional, step)
    }

    pub fn forgives(&self, step: &str) -> bool {
        lists_step(&self.rules.forgiving_steps, step)
            || lists_step(&self.rules.forgiving_optional, step)
    }
}

fn lists_step(set: &std::collections::BTreeSet<String>, step: &str) -> bool {
    set.contains(step) || set.contains("*")
}

/// Effective rules of one master.
#[derive(Debug, Clone)]
pub struct MasterRules {
    pub rules: RuleSet,
    pub excluded_builders: GlobSet,
    pub excluded_steps: GlobSet,
    pub builders: IndexMap<String, BuilderRules>,
}

impl MasterRules {
    /// Builder rules by exact name, else the `*` entry.
    pub fn builder(&self, name: &str) -> Option<&BuilderRules> {
        self.builders.get(name).or_else(|| self.builders.get("*"))
    }
}

/// Problem found while aggregating configs. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A rule set references a category no config defines.
    UndefinedCategory { category: String, referenced_by: String },
    /// A master is defined more than once; only the first definition is used.
    DuplicateMaster { master: String, config_index: usize },
    /// A glob pattern failed to compile and will never match.
    MalformedPattern { pattern: String, location: String, error: String },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::UndefinedCategory { category, referenced_by } => {
                write!(f, "undefined category '{}' referenced by {}", category, referenced_by)
            }
            ConfigWarning::DuplicateMaster { master, config_index } => {
                write!(f, "master '{}' redefined in config #{}; using first definition", master, config_index)
            }
            ConfigWarning::MalformedPattern { pattern, location, error } => {
                write!(f, "malformed pattern '{}' in {}: {}", pattern, location, error)
            }
        }
    }
}

/// Master name from a config key, which may be a full master URL such as
/// `https://build.chromium.org/p/chromium.linux`.
pub fn master_name(key: &str) -> &str {
    key.trim_end_matches('/').rsplit('/').next().unwrap_or(key)
}

/// Aggregate configs in load order into one lookup table keyed by master name.
pub fn aggregate(configs: &[GatekeeperConfig]) -> (IndexMap<String, MasterRules>, Vec<ConfigWarning>) {
    let mut masters = IndexMap::new();
    let mut warnings = Vec::new();

    for (config_index, config) in configs.iter().enumerate() {
        for (key, entries) in &config.masters {
            let name = master_name(key).to_string();
            let Some(first) = entries.first() else {
                continue;
            };
            if entries.len() > 1 {
                push_warning(
                    &mut warnings,
                    ConfigWarning::DuplicateMaster { master: name.clone(), config_index },
                );
            }
            match masters.entry(name) {
                Entry::Occupied(e) => {
                    push_warning(
                        &mut warnings,
                        ConfigWarning::DuplicateMaster { master: e.key().clone(), config_index },
                    );
                }
                Entry::Vacant(e) => {
                    let rules = resolve_master(e.key(), first, &config.categories, &mut warnings);
                    e.insert(rules);
                }
            }
        }
    }

    (masters, warnings)
}

fn resolve_master(
    name: &str,
    master: &MasterConfig,
    categories: &IndexMap<String, RuleSet>,
    warnings: &mut Vec<ConfigWarning>,
) -> MasterRules {
    let location = format!("master {}", name);
    let rules = resolve_categories(&master.rules, categories, &location, warnings);

    let builders = master
        .builders
        .iter()
        .map(|(builder, own)| {
            let location = format!("builder {}/{}", name, builder);
            let mut effective = resolve_categories(own, categories, &location, warnings);
            effective.union_with(&rules);
            (builder.clone(), BuilderRules::new(effective, &location, warnings))
        })
        .collect();

    MasterRules {
        excluded_builders: compile(master.excluded_builders.iter().cloned(), &location, warnings),
        excluded_steps: compile(rules.excluded_steps.iter().cloned(), &location, warnings),
        rules,
        builders,
    }
}

/// `own` with every referenced category unioned in.
pub(crate) fn resolve_categories(
    own: &RuleSet,
    categories: &IndexMap<String, RuleSet>,
    referenced_by: &str,
    warnings: &mut Vec<ConfigWarning>,
) -> RuleSet {
    let mut effective = own.rules_only();
    for category in &own.categories {
        match categories.get(category) {
            Some(rules) => effective.union_with(rules),
            None => push_warning(
                warnings,
                ConfigWarning::UndefinedCategory {
                    category: category.clone(),
                    referenced_by: referenced_by.to_string(),
                },
            ),
        }
    }
    effective
}

fn compile(
    patterns: impl Iterator<Item = String>,
    location: &str,
    warnings: &mut Vec<ConfigWarning>,
) -> GlobSet {
    let (set, malformed) = GlobSet::compile(patterns);
    for (pattern, error) in malformed {
        warnings.push(ConfigWarning::MalformedPattern {
            pattern,
            location: location.to_string(),
            error,
        });
    }
    set
}

fn push_warning(warnings: &mut Vec<ConfigWarning>, warning: ConfigWarning) {
    tracing::warn!(%warning, "gatekeeper config inconsistency");
    warnings.push(warning);
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
