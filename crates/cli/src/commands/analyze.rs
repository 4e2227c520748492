// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `treewatch analyze`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio_util::sync::CancellationToken;
use tw_analyzer::{Analyzer, AnalyzerConfig, StaticBuildSource};

use super::GatekeeperFiles;
use crate::output::{format_or_json, format_report, OutputFormat};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// JSON array of builds, newest first per builder
    #[arg(long, value_name = "FILE")]
    pub builds: PathBuf,
    #[command(flatten)]
    pub files: GatekeeperFiles,
    /// Tree whose gatekeeper exclusions apply
    #[arg(long, env = "TREEWATCH_TREE")]
    pub tree: Option<String>,
    /// Builders analyzed at once
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,
    /// Builds of history scanned per builder
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_builds: Option<u32>,
}

impl AnalyzeArgs {
    fn config(&self) -> AnalyzerConfig {
        let mut config = AnalyzerConfig::from_env();
        if let Some(n) = self.concurrency {
            config.max_concurrent_builders = usize::from(n);
        }
        if let Some(n) = self.max_builds {
            config.max_recent_builds = n as usize;
        }
        if self.tree.is_some() {
            config.tree = self.tree.clone();
        }
        config
    }
}

pub async fn handle(args: AnalyzeArgs, format: OutputFormat) -> Result<()> {
    let content = std::fs::read_to_string(&args.builds)
        .with_context(|| format!("failed to read {}", args.builds.display()))?;
    let source = StaticBuildSource::from_json(&content)
        .with_context(|| format!("failed to load {}", args.builds.display()))?;
    let builders = source.builders();

    let config = args.config();
    if config.tree.is_some() && args.files.gatekeeper.is_empty() {
        tracing::warn!("--tree has no effect without --gatekeeper");
    }
    let mut analyzer = Analyzer::new(config, Arc::new(source));
    if let Some(rules) = args.files.load()? {
        analyzer = analyzer.with_rules(Arc::new(rules));
    }

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, finishing builders already in progress");
            interrupt.cancel();
        }
    });
    let report = analyzer.analyze(&builders, &cancel).await;
    ctrl_c.abort();

    format_or_json(format, &report, || {
        if let Err(e) = format_report(&mut std::io::stdout(), &report) {
            tracing::error!(error = %e, "failed to write report");
        }
    })
}
