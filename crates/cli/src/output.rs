// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use tw_analyzer::AnalysisReport;
use tw_core::{Alert, StepFailureRange};

use crate::color;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `data` as pretty JSON, or run `text_fn` for text output.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => {
            text_fn();
        }
    }
    Ok(())
}

/// Human-readable report: one block per alert, then skipped builders.
pub fn format_report(out: &mut dyn Write, report: &AnalysisReport) -> std::io::Result<()> {
    if report.alerts.is_empty() {
        writeln!(out, "No alerts")?;
    }
    for alert in &report.alerts {
        format_alert(out, alert)?;
    }
    if !report.skipped.is_empty() {
        writeln!(out, "\n{}", color::header(&format!("Skipped {} builder(s)", report.skipped.len())))?;
        for skipped in &report.skipped {
            writeln!(out, "  {}: {}", skipped.builder, skipped.cause)?;
            writeln!(out, "    {}", color::context(&skipped.builder.url()))?;
        }
    }
    Ok(())
}

fn format_alert(out: &mut dyn Write, alert: &Alert) -> std::io::Result<()> {
    writeln!(
        out,
        "{} {}",
        color::severity(alert.severity, &format!("[{}]", alert.severity)),
        alert.title
    )?;
    writeln!(out, "  {}", color::context(&format!("key: {}", alert.key)))?;
    for range in &alert.ranges {
        writeln!(out, "  {}", format_range(range))?;
    }
    if let Some(regression) = &alert.regression_range {
        let bounds = match regression.positions().as_slice() {
            [lower, upper] => format!("{} .. {}", lower, upper),
            _ => {
                let [lower, upper] = regression.revisions();
                format!("{} .. {}", lower, upper)
            }
        };
        writeln!(out, "  regression: {}", bounds)?;
    }
    if !alert.culprits.is_empty() {
        let revisions: Vec<&str> = alert.culprits.iter().map(|c| c.revision.as_str()).collect();
        writeln!(out, "  culprits: {}", revisions.join(", "))?;
    }
    Ok(())
}

fn format_range(range: &StepFailureRange) -> String {
    let builds = if range.first_failure == range.latest_failure {
        format!("build {}", range.latest_failure)
    } else {
        format!("builds {}..{}", range.first_failure, range.latest_failure)
    };
    let passing = match range.last_passing {
        Some(n) => format!("last passing {}", n),
        None => "last passing unknown".to_string(),
    };
    format!("{}  {}, {}", range.builder, builds, passing)
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
