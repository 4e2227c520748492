// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-analyzer: turns per-builder build histories into merged alerts
//!
//! Each builder is scanned independently for runs of failing steps, the runs
//! are merged across builders by step, filtered through gatekeeper rules,
//! and emitted as one alert per distinct failure reason.

pub mod adapters;
pub mod analyzer;
pub mod config;
pub mod merge;
pub mod revision;
pub mod steps;
pub mod tracker;

pub use adapters::{
    AdapterError, BuildSource, CulpritFinder, NoCulprits, ReasonClassifier, SourceError,
    StaticBuildSource, StepReasonClassifier,
};
#[cfg(any(test, feature = "test-support"))]
pub use adapters::{FakeBuildSource, FakeCulpritFinder, FakeReasonClassifier};
pub use analyzer::{AnalysisReport, Analyzer, SkipCause, SkippedBuilder};
pub use config::AnalyzerConfig;
pub use merge::{merge_ranges, regression_range, StepGroup};
pub use revision::{PropertyRevisionExtractor, RevisionExtractor};
pub use steps::{alertable_leaf_names, attempted_step_names, is_alertable, leaf_steps};
pub use tracker::{failure_ranges, track_failures, FailureRun};
