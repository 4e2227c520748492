// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw gatekeeper and tree config documents, as read from JSON.

use crate::error::GatekeeperError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Step and sheriff rules for a builder, a master, or a named category.
///
/// ```json
/// {
///   "categories": ["chromium_tree_closer"],
///   "closing_optional": ["*"],
///   "excluded_steps": ["update_scripts"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub excluded_steps: BTreeSet<String>,
    #[serde(default)]
    pub closing_steps: BTreeSet<String>,
    #[serde(default)]
    pub closing_optional: BTreeSet<String>,
    #[serde(default)]
    pub forgiving_steps: BTreeSet<String>,
    #[serde(default)]
    pub forgiving_optional: BTreeSet<String>,
    #[serde(default)]
    pub sheriff_classes: BTreeSet<String>,
    /// Names of categories whose rules are folded into this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl RuleSet {
    /// Set-union every rule list of `other` into `self`.
    ///
    /// Category references are not copied; they are resolved by the caller.
    pub fn union_with(&mut self, other: &RuleSet) {
        self.excluded_steps.extend(other.excluded_steps.iter().cloned());
        self.closing_steps.extend(other.closing_steps.iter().cloned());
        self.closing_optional.extend(other.closing_optional.iter().cloned());
        self.forgiving_steps.extend(other.forgiving_steps.iter().cloned());
        self.forgiving_optional.extend(other.forgiving_optional.iter().cloned());
        self.sheriff_classes.extend(other.sheriff_classes.iter().cloned());
    }

    /// Copy of the rule lists without category references.
    pub fn rules_only(&self) -> RuleSet {
        RuleSet { categories: Vec::new(), ..self.clone() }
    }
}

/// One entry of a master in `gatekeeper.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterConfig {
    #[serde(flatten)]
    pub rules: RuleSet,
    #[serde(default)]
    pub excluded_builders: Vec<String>,
    #[serde(default)]
    pub builders: IndexMap<String, RuleSet>,
}

/// A whole `gatekeeper.json` document.
///
/// Masters map to a list of entries; only the first entry is consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatekeeperConfig {
    #[serde(default)]
    pub categories: IndexMap<String, RuleSet>,
    #[serde(default)]
    pub masters: IndexMap<String, Vec<MasterConfig>>,
}

/// A master watched by a tree, with the builder names it allows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeMaster {
    pub master: String,
    pub builders: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawTree {
    #[serde(default)]
    masters: IndexMap<String, Vec<String>>,
}

/// Trees and the masters/builders each one watches (`gatekeeper_trees.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub trees: IndexMap<String, Vec<TreeMaster>>,
}

impl TreeConfig {
    pub fn masters(&self, tree: &str) -> &[TreeMaster] {
        self.trees.get(tree).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Parse a `gatekeeper.json` document.
pub fn parse_gatekeeper(content: &str, origin: &str) -> Result<GatekeeperConfig, GatekeeperError> {
    serde_json::from_str(content).map_err(|source| GatekeeperError::Parse {
        kind: "gatekeeper",
        origin: origin.to_string(),
        source,
    })
}

/// Parse a `gatekeeper_trees.json` document.
///
/// ```json
/// { "chromium": { "masters": { "chromium.linux": ["*"] } } }
/// ```
///
/// Keys other than `masters` (tree status URLs and the like) are ignored.
pub fn parse_trees(content: &str, origin: &str) -> Result<TreeConfig, GatekeeperError> {
    let raw: IndexMap<String, RawTree> =
        serde_json::from_str(content).map_err(|source| GatekeeperError::Parse {
            kind: "trees",
            origin: origin.to_string(),
            source,
        })?;
    let trees = raw
        .into_iter()
        .map(|(tree, raw)| {
            let masters = raw
                .masters
                .into_iter()
                .map(|(master, builders)| TreeMaster {
                    master: crate::aggregate::master_name(&master).to_string(),
                    builders,
                })
                .collect();
            (tree, masters)
        })
        .collect();
    Ok(TreeConfig { trees })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
