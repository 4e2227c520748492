// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading gatekeeper and tree configs
#[derive(Debug, Error)]
pub enum GatekeeperError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid {kind} config ({origin}): {source}")]
    Parse {
        kind: &'static str,
        /// File path, or `<inline>` for configs parsed from strings.
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}
