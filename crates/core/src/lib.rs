// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tw-core: data model shared by the treewatch gatekeeper and analyzer crates

pub mod macros;

pub mod alert;
pub mod build;
pub mod builder;
pub mod metrics;
pub mod range;
pub mod reason;
pub mod revision;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use alert::{Alert, AlertKind, Culprit, Severity};
pub use build::{Build, BuildInput, BuildOutput, GitilesCommit, Status, Step};
#[cfg(any(test, feature = "test-support"))]
pub use build::BuildBuilder;
pub use builder::{BuilderId, MasterLocation};
#[cfg(any(test, feature = "test-support"))]
pub use metrics::FakeMetrics;
pub use metrics::{Metric, MetricsSink, NoopMetrics};
pub use range::StepFailureRange;
pub use reason::{Reason, TestWithResult};
pub use revision::{parse_commit_position, RegressionRange, RevisionError, RevisionSummary};
