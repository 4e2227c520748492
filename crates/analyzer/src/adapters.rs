// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborators the analyzer calls out to.
//!
//! Each may block on external services; callers own timeouts and retries.

use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;
use tw_core::{Build, BuilderId, Culprit, Reason};

/// Errors from fetching build history
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("build source unavailable: {0}")]
    Unavailable(String),
    #[error("invalid build history: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from reason classifiers and culprit finders
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdapterError {
    #[error("request failed: {0}")]
    Failed(String),
}

/// Supplies recent build history per builder.
#[async_trait]
pub trait BuildSource: Send + Sync + 'static {
    /// Builds of one builder, most recent first. Empty if none are known.
    async fn latest_builds(&self, builder: &BuilderId) -> Result<Vec<Build>, SourceError>;
}

/// Classifies why a step failed in a build.
#[async_trait]
pub trait ReasonClassifier: Send + Sync + 'static {
    async fn reasons(&self, step: &str, build: &Build) -> Result<Vec<Reason>, AdapterError>;
}

/// Finds suspected culprit changes for a failure.
#[async_trait]
pub trait CulpritFinder: Send + Sync + 'static {
    async fn culprits(
        &self,
        builder: &BuilderId,
        step: &str,
        build_number: u64,
    ) -> Result<Vec<Culprit>, AdapterError>;
}

/// Histories held in memory, e.g. loaded from a JSON dump.
#[derive(Debug, Clone, Default)]
pub struct StaticBuildSource {
    histories: BTreeMap<BuilderId, Vec<Build>>,
}

impl StaticBuildSource {
    /// Group builds by builder, keeping their relative order.
    pub fn from_builds(builds: impl IntoIterator<Item = Build>) -> Self {
        let mut histories: BTreeMap<BuilderId, Vec<Build>> = BTreeMap::new();
        for build in builds {
            histories.entry(build.builder_id.clone()).or_default().push(build);
        }
        Self { histories }
    }

    /// Parse a JSON array of builds.
    pub fn from_json(content: &str) -> Result<Self, SourceError> {
        let builds: Vec<Build> = serde_json::from_str(content)?;
        Ok(Self::from_builds(builds))
    }

    pub fn builders(&self) -> Vec<BuilderId> {
        self.histories.keys().cloned().collect()
    }
}

#[async_trait]
impl BuildSource for StaticBuildSource {
    async fn latest_builds(&self, builder: &BuilderId) -> Result<Vec<Build>, SourceError> {
        Ok(self.histories.get(builder).cloned().unwrap_or_default())
    }
}

/// One build-step reason per failing step.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepReasonClassifier;

#[async_trait]
impl ReasonClassifier for StepReasonClassifier {
    async fn reasons(&self, step: &str, _build: &Build) -> Result<Vec<Reason>, AdapterError> {
        Ok(vec![Reason::build_step(step)])
    }
}

/// Never reports culprits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCulprits;

#[async_trait]
impl CulpritFinder for NoCulprits {
    async fn culprits(
        &self,
        _builder: &BuilderId,
        _step: &str,
        _build_number: u64,
    ) -> Result<Vec<Culprit>, AdapterError> {
        Ok(Vec::new())
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{AdapterError, BuildSource, CulpritFinder, ReasonClassifier, SourceError};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use tw_core::{Build, BuilderId, Culprit, Reason};

    #[derive(Default)]
    struct FakeSourceState {
        histories: HashMap<BuilderId, Vec<Build>>,
        failing: HashMap<BuilderId, String>,
        calls: Vec<BuilderId>,
    }

    /// Fake build source for testing
    #[derive(Clone, Default)]
    pub struct FakeBuildSource {
        inner: Arc<Mutex<FakeSourceState>>,
    }

    impl FakeBuildSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_history(&self, builder: BuilderId, builds: Vec<Build>) {
            self.inner.lock().histories.insert(builder, builds);
        }

        /// Make every fetch for `builder` fail with `message`
        pub fn fail(&self, builder: BuilderId, message: &str) {
            self.inner.lock().failing.insert(builder, message.to_string());
        }

        /// Builders fetched so far, in call order
        pub fn calls(&self) -> Vec<BuilderId> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl BuildSource for FakeBuildSource {
        async fn latest_builds(&self, builder: &BuilderId) -> Result<Vec<Build>, SourceError> {
            let mut inner = self.inner.lock();
            inner.calls.push(builder.clone());
            if let Some(message) = inner.failing.get(builder) {
                return Err(SourceError::Unavailable(message.clone()));
            }
            Ok(inner.histories.get(builder).cloned().unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct FakeClassifierState {
        reasons: HashMap<String, Vec<Reason>>,
        builder_reasons: HashMap<(BuilderId, String), Vec<Reason>>,
        failing: HashSet<String>,
        calls: Vec<(String, u64)>,
    }

    /// Fake reason classifier for testing.
    ///
    /// Reasons set for a builder win over reasons set for the step alone.
    /// Steps without configured reasons classify to nothing.
    #[derive(Clone, Default)]
    pub struct FakeReasonClassifier {
        inner: Arc<Mutex<FakeClassifierState>>,
    }

    impl FakeReasonClassifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_reasons(&self, step: &str, reasons: Vec<Reason>) {
            self.inner.lock().reasons.insert(step.to_string(), reasons);
        }

        pub fn set_builder_reasons(&self, builder: BuilderId, step: &str, reasons: Vec<Reason>) {
            self.inner.lock().builder_reasons.insert((builder, step.to_string()), reasons);
        }

        pub fn fail(&self, step: &str) {
            self.inner.lock().failing.insert(step.to_string());
        }

        /// `(step, build number)` pairs classified so far
        pub fn calls(&self) -> Vec<(String, u64)> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl ReasonClassifier for FakeReasonClassifier {
        async fn reasons(&self, step: &str, build: &Build) -> Result<Vec<Reason>, AdapterError> {
            let mut inner = self.inner.lock();
            inner.calls.push((step.to_string(), build.number));
            if inner.failing.contains(step) {
                return Err(AdapterError::Failed(format!("classifier unavailable for {step}")));
            }
            let for_builder = inner.builder_reasons.get(&(build.builder_id.clone(), step.to_string()));
            Ok(for_builder.or_else(|| inner.reasons.get(step)).cloned().unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct FakeCulpritState {
        culprits: HashMap<String, Vec<Culprit>>,
        failing: HashSet<String>,
        calls: Vec<(BuilderId, String, u64)>,
    }

    /// Fake culprit finder for testing
    #[derive(Clone, Default)]
    pub struct FakeCulpritFinder {
        inner: Arc<Mutex<FakeCulpritState>>,
    }

    impl FakeCulpritFinder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_culprits(&self, step: &str, culprits: Vec<Culprit>) {
            self.inner.lock().culprits.insert(step.to_string(), culprits);
        }

        pub fn fail(&self, step: &str) {
            self.inner.lock().failing.insert(step.to_string());
        }

        pub fn calls(&self) -> Vec<(BuilderId, String, u64)> {
            self.inner.lock().calls.clone()
        }
    }

    #[async_trait]
    impl CulpritFinder for FakeCulpritFinder {
        async fn culprits(
            &self,
            builder: &BuilderId,
            step: &str,
            build_number: u64,
        ) -> Result<Vec<Culprit>, AdapterError> {
            let mut inner = self.inner.lock();
            inner.calls.push((builder.clone(), step.to_string(), build_number));
            if inner.failing.contains(step) {
                return Err(AdapterError::Failed(format!("culprit finder unavailable for {step}")));
            }
            Ok(inner.culprits.get(step).cloned().unwrap_or_default())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBuildSource, FakeCulpritFinder, FakeReasonClassifier};

#[cfg(test)]
#[path = "adapters_tests.rs"]
mod tests;
