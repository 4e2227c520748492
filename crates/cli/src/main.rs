// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! treewatch: build-failure alerts and gatekeeper rule queries

mod color;
mod commands;
mod exit_error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{analyze, rules};
use exit_error::ExitError;
use output::OutputFormat;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "+", env!("TREEWATCH_BUILD_HASH"));

#[derive(Parser)]
#[command(name = "treewatch", version = VERSION, styles = color::styles())]
#[command(about = "Aggregate build failures into alerts and evaluate gatekeeper rules")]
struct Cli {
    /// Output format
    #[arg(short = 'o', long = "output", value_enum, default_value_t, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze build histories and print alerts
    Analyze(analyze::AnalyzeArgs),
    /// Evaluate gatekeeper rules
    Rules(rules::RulesArgs),
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze(args) => analyze::handle(args, cli.output).await,
        Commands::Rules(args) => rules::handle(args, cli.output),
    }
}

#[tokio::main]
async fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => exit.code,
            None => ExitError::FAILURE,
        };
        eprintln!("error: {:#}", e);
        std::process::exit(code);
    }
}
