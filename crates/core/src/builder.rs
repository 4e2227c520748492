// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builder identity and legacy master location.

use crate::build::Build;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a builder: the configuration that produces numbered builds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuilderId {
    pub project: String,
    pub bucket: String,
    pub builder: String,
}

impl BuilderId {
    pub fn new(
        project: impl Into<String>,
        bucket: impl Into<String>,
        builder: impl Into<String>,
    ) -> Self {
        Self { project: project.into(), bucket: bucket.into(), builder: builder.into() }
    }

    /// Builder page on the CI frontend.
    pub fn url(&self) -> String {
        format!(
            "https://ci.chromium.org/p/{}/builders/{}/{}",
            self.project, self.bucket, self.builder
        )
    }
}

impl fmt::Display for BuilderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.project, self.bucket, self.builder)
    }
}

/// Legacy waterfall master a builder reports under.
///
/// Gatekeeper rules are keyed by master name, which buildbucket builds only
/// carry in their input properties (`mastername`, `buildername`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MasterLocation {
    name: String,
}

impl MasterLocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Master named by the build's `mastername` input property.
    pub fn from_build(build: &Build) -> Option<Self> {
        build.input_property("mastername").map(Self::new)
    }

    /// Master name, e.g. `chromium.linux`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_name(self) -> String {
        self.name
    }
}

impl fmt::Display for MasterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
