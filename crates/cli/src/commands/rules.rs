// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `treewatch rules`: query gatekeeper configs directly.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tw_gatekeeper::GatekeeperRules;

use super::GatekeeperFiles;
use crate::exit_error::ExitError;
use crate::output::{format_or_json, OutputFormat};

#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(flatten)]
    pub files: GatekeeperFiles,
    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// Whether a failure of STEP on this builder closes the tree
    Close { master: String, builder: String, step: String },
    /// Whether a builder, or one of its steps, is excluded from a tree
    Exclude {
        tree: String,
        master: String,
        builder: String,
        /// Check a single step failure instead of the whole builder
        step: Option<String>,
    },
    /// Whether a failure of STEP on this builder is forgiven
    Forgiving { master: String, builder: String, step: String },
    /// Sheriff rotations notified for a builder
    Sheriffs { master: String, builder: String },
    /// Report inconsistencies found while loading the configs
    Check,
}

#[derive(Debug, Serialize)]
struct Decision<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<&'a str>,
    master: &'a str,
    builder: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<&'a str>,
    result: bool,
}

pub fn handle(args: RulesArgs, format: OutputFormat) -> Result<()> {
    let Some(rules) = args.files.load()? else {
        return Err(ExitError::usage("at least one --gatekeeper file is required").into());
    };
    match &args.command {
        RulesCommand::Close { master, builder, step } => {
            let decision = Decision {
                query: "close",
                tree: None,
                master,
                builder,
                step: Some(step.as_str()),
                result: rules.would_close_tree(master, builder, step),
            };
            print_decision(format, &decision)
        }
        RulesCommand::Exclude { tree, master, builder, step } => {
            let result = match step {
                Some(step) => rules.exclude_failure(tree, master, builder, step),
                None => rules.exclude_builder(tree, master, builder),
            };
            let decision = Decision {
                query: "exclude",
                tree: Some(tree.as_str()),
                master,
                builder,
                step: step.as_deref(),
                result,
            };
            print_decision(format, &decision)
        }
        RulesCommand::Forgiving { master, builder, step } => {
            let decision = Decision {
                query: "forgiving",
                tree: None,
                master,
                builder,
                step: Some(step.as_str()),
                result: rules.is_forgiving(master, builder, step),
            };
            print_decision(format, &decision)
        }
        RulesCommand::Sheriffs { master, builder } => {
            let classes: Vec<String> = rules.sheriff_classes(master, builder).into_iter().collect();
            format_or_json(format, &classes, || {
                for class in &classes {
                    println!("{}", class);
                }
            })
        }
        RulesCommand::Check => check(&rules, format),
    }
}

fn print_decision(format: OutputFormat, decision: &Decision<'_>) -> Result<()> {
    format_or_json(format, decision, || println!("{}", decision.result))
}

fn check(rules: &GatekeeperRules, format: OutputFormat) -> Result<()> {
    let warnings: Vec<String> = rules.warnings().iter().map(ToString::to_string).collect();
    format_or_json(format, &warnings, || {
        if warnings.is_empty() {
            println!("No warnings");
        }
        for warning in &warnings {
            println!("warning: {}", warning);
        }
    })
}
