// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup. Logs go to stderr so stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Log line format, from `TREEWATCH_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// `json` selects JSON lines; anything else is human-readable text.
    pub fn from_env() -> Self {
        match std::env::var("TREEWATCH_LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Filter from `RUST_LOG`, defaulting to `info`.
fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init() {
    let builder = tracing_subscriber::fmt().with_env_filter(filter()).with_writer(std::io::stderr);
    let result = match LogFormat::from_env() {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing already initialized");
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
