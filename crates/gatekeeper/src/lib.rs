// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-gatekeeper: tree-closing and exclusion policy for build failures
//!
//! Gatekeeper configs are loaded once, their categories are folded into each
//! builder's rule set, and the result is queried read-only from any number of
//! threads.

mod aggregate;
mod config;
mod error;
mod pattern;
mod rules;

pub use aggregate::{aggregate, master_name, BuilderRules, ConfigWarning, MasterRules};
pub use config::{
    parse_gatekeeper, parse_trees, GatekeeperConfig, MasterConfig, RuleSet, TreeConfig, TreeMaster,
};
pub use error::GatekeeperError;
pub use pattern::GlobSet;
pub use rules::GatekeeperRules;
