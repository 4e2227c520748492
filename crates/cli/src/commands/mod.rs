// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod analyze;
pub mod rules;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tw_gatekeeper::GatekeeperRules;

/// Gatekeeper config files shared by the commands that evaluate rules.
#[derive(Args, Debug, Default)]
pub struct GatekeeperFiles {
    /// gatekeeper.json file; repeat to add more, earlier files take precedence
    #[arg(long = "gatekeeper", value_name = "FILE")]
    pub gatekeeper: Vec<PathBuf>,
    /// gatekeeper_trees.json file with per-tree builder allow-lists
    #[arg(long, value_name = "FILE")]
    pub trees: Option<PathBuf>,
}

impl GatekeeperFiles {
    /// Load the rules, or `None` when no gatekeeper file was given.
    pub fn load(&self) -> Result<Option<GatekeeperRules>> {
        if self.gatekeeper.is_empty() {
            return Ok(None);
        }
        let rules = GatekeeperRules::load(&self.gatekeeper, self.trees.as_deref())?;
        Ok(Some(rules))
    }
}
