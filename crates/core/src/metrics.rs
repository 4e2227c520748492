// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metrics sink injected into the analyzer.

use serde::{Deserialize, Serialize};

/// Counters reported while analyzing a batch of builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    BuildersAnalyzed,
    BuildersSkipped,
    StepFailures,
    RevisionLookupFailures,
    AlertsExcluded,
    AlertsEmitted,
}

crate::simple_display! {
    Metric {
        BuildersAnalyzed => "builders_analyzed",
        BuildersSkipped => "builders_skipped",
        StepFailures => "step_failures",
        RevisionLookupFailures => "revision_lookup_failures",
        AlertsExcluded => "alerts_excluded",
        AlertsEmitted => "alerts_emitted",
    }
}

/// Destination for analyzer counters.
pub trait MetricsSink: Send + Sync {
    fn add(&self, metric: Metric, value: u64);

    fn incr(&self, metric: Metric) {
        self.add(metric, 1);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn add(&self, _metric: Metric, _value: u64) {}
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{Metric, MetricsSink};
    use parking_lot::Mutex;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    /// Recording metrics sink for tests
    #[derive(Clone, Default)]
    pub struct FakeMetrics {
        inner: Arc<Mutex<BTreeMap<Metric, u64>>>,
    }

    impl FakeMetrics {
        pub fn new() -> Self {
            Self::default()
        }

        /// Current value of a counter (0 if never touched)
        pub fn get(&self, metric: Metric) -> u64 {
            self.inner.lock().get(&metric).copied().unwrap_or(0)
        }

        pub fn snapshot(&self) -> BTreeMap<Metric, u64> {
            self.inner.lock().clone()
        }
    }

    impl MetricsSink for FakeMetrics {
        fn add(&self, metric: Metric, value: u64) {
            *self.inner.lock().entry(metric).or_insert(0) += value;
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeMetrics;

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
