// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch analysis: per-builder workers, then a single merge into alerts.
//!
//! Workers share nothing mutable. Each returns a local outcome; a failure in
//! one builder is recorded as a skip and never affects the others.

use crate::adapters::{BuildSource, CulpritFinder, NoCulprits, ReasonClassifier, StepReasonClassifier};
use crate::config::AnalyzerConfig;
use crate::merge::{merge_ranges, StepGroup};
use crate::revision::{PropertyRevisionExtractor, RevisionExtractor};
use crate::tracker::failure_ranges;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tw_core::{
    Alert, AlertKind, Build, BuilderId, Culprit, Metric, MetricsSink, NoopMetrics, Reason,
    Severity, Status, StepFailureRange,
};
use tw_gatekeeper::GatekeeperRules;

/// Why a builder produced no results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipCause {
    /// The batch was cancelled before the builder started.
    Cancelled,
    /// The source returned no builds.
    NoBuilds,
    /// Fetching history failed.
    Fetch { error: String },
    /// The worker task died.
    Panicked { error: String },
}

impl std::fmt::Display for SkipCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipCause::Cancelled => f.write_str("cancelled"),
            SkipCause::NoBuilds => f.write_str("no builds"),
            SkipCause::Fetch { error } => write!(f, "fetch failed: {}", error),
            SkipCause::Panicked { error } => write!(f, "worker failed: {}", error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedBuilder {
    pub builder: BuilderId,
    pub cause: SkipCause,
}

/// Result of one batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    /// Sorted by severity, then step name, then key.
    pub alerts: Vec<Alert>,
    pub skipped: Vec<SkippedBuilder>,
}

/// A failing range with what its worker learned about it.
#[derive(Debug, Clone)]
struct StepFailure {
    range: StepFailureRange,
    reasons: Vec<Reason>,
    infra: bool,
}

/// Per-builder half of the analysis, run inside a worker task.
#[derive(Clone)]
struct Worker {
    source: Arc<dyn BuildSource>,
    classifier: Arc<dyn ReasonClassifier>,
    extractor: Arc<dyn RevisionExtractor>,
    metrics: Arc<dyn MetricsSink>,
    max_recent_builds: usize,
}

impl Worker {
    async fn run(&self, builder: &BuilderId) -> Result<Vec<StepFailure>, SkipCause> {
        let mut history = self
            .source
            .latest_builds(builder)
            .await
            .map_err(|e| SkipCause::Fetch { error: e.to_string() })?;
        if history.is_empty() {
            return Err(SkipCause::NoBuilds);
        }
        history.truncate(self.max_recent_builds.max(1));

        let ranges = failure_ranges(&history, self.extractor.as_ref(), self.metrics.as_ref());
        self.metrics.add(Metric::StepFailures, ranges.len() as u64);

        let mut failures = Vec::with_capacity(ranges.len());
        for range in ranges {
            let Some(latest) = history.iter().find(|b| b.number == range.latest_failure) else {
                continue;
            };
            let reasons = self.classify(&range, latest).await;
            failures.push(StepFailure { infra: latest.status == Status::InfraFailure, reasons, range });
        }
        Ok(failures)
    }

    async fn classify(&self, range: &StepFailureRange, latest: &Build) -> Vec<Reason> {
        match self.classifier.reasons(&range.step_name, latest).await {
            Ok(reasons) => reasons,
            Err(e) => {
                tracing::warn!(
                    builder = %range.builder,
                    step = %range.step_name,
                    build = latest.number,
                    error = %e,
                    "reason classification failed"
                );
                Vec::new()
            }
        }
    }
}

/// Turns build histories of many builders into alerts.
pub struct Analyzer {
    config: AnalyzerConfig,
    worker: Worker,
    culprits: Arc<dyn CulpritFinder>,
    rules: Option<Arc<GatekeeperRules>>,
}

impl Analyzer {
    /// Analyzer with step-only reasons, no culprits, no gatekeeper rules and
    /// no metrics.
    pub fn new(config: AnalyzerConfig, source: Arc<dyn BuildSource>) -> Self {
        let max_recent_builds = config.max_recent_builds;
        Self {
            config,
            worker: Worker {
                source,
                classifier: Arc::new(StepReasonClassifier),
                extractor: Arc::new(PropertyRevisionExtractor::default()),
                metrics: Arc::new(NoopMetrics),
                max_recent_builds,
            },
            culprits: Arc::new(NoCulprits),
            rules: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn ReasonClassifier>) -> Self {
        self.worker.classifier = classifier;
        self
    }

    pub fn with_culprit_finder(mut self, culprits: Arc<dyn CulpritFinder>) -> Self {
        self.culprits = culprits;
        self
    }

    pub fn with_revision_extractor(mut self, extractor: Arc<dyn RevisionExtractor>) -> Self {
        self.worker.extractor = extractor;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.worker.metrics = metrics;
        self
    }

    pub fn with_rules(mut self, rules: Arc<GatekeeperRules>) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Analyze a batch of builders.
    ///
    /// Never fails as a whole: builders that cannot be analyzed are listed in
    /// [`AnalysisReport::skipped`]. Cancellation stops builders that have not
    /// started yet; running ones finish. A builder listed twice is analyzed
    /// once.
    pub async fn analyze(&self, builders: &[BuilderId], cancel: &CancellationToken) -> AnalysisReport {
        let mut seen = HashSet::new();
        let builders: Vec<&BuilderId> = builders.iter().filter(|b| seen.insert(*b)).collect();
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_builders.max(1)));

        let handles: Vec<_> = builders
            .iter()
            .map(|builder| {
                let worker = self.worker.clone();
                let semaphore = Arc::clone(&semaphore);
                let cancel = cancel.clone();
                let builder = (*builder).clone();
                let handle = tokio::spawn({
                    let builder = builder.clone();
                    async move {
                        let _permit = tokio::select! {
                            biased;
                            _ = cancel.cancelled() => return Err(SkipCause::Cancelled),
                            permit = semaphore.acquire_owned() => {
                                permit.map_err(|_| SkipCause::Cancelled)?
                            }
                        };
                        if cancel.is_cancelled() {
                            return Err(SkipCause::Cancelled);
                        }
                        worker.run(&builder).await
                    }
                });
                (builder, handle)
            })
            .collect();

        let mut failures = Vec::new();
        let mut skipped = Vec::new();
        for (builder, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => Err(SkipCause::Panicked { error: e.to_string() }),
            };
            match outcome {
                Ok(found) => {
                    self.worker.metrics.incr(Metric::BuildersAnalyzed);
                    failures.extend(found);
                }
                Err(cause) => {
                    tracing::warn!(builder = %builder, %cause, "skipping builder");
                    self.worker.metrics.incr(Metric::BuildersSkipped);
                    skipped.push(SkippedBuilder { builder, cause });
                }
            }
        }

        let alerts = self.reduce(failures).await;
        tracing::info!(
            builders = builders.len(),
            skipped = skipped.len(),
            alerts = alerts.len(),
            "analysis complete"
        );
        AnalysisReport { alerts, skipped }
    }

    /// Sequential fan-in: gatekeeper filtering, merging, reasons and culprits.
    async fn reduce(&self, failures: Vec<StepFailure>) -> Vec<Alert> {
        let mut details: HashMap<(BuilderId, String), (Vec<Reason>, bool)> = HashMap::new();
        let mut ranges = Vec::with_capacity(failures.len());
        for failure in failures {
            if self.excluded(&failure.range) {
                self.worker.metrics.incr(Metric::AlertsExcluded);
                continue;
            }
            details.insert(
                (failure.range.builder.clone(), failure.range.step_name.clone()),
                (failure.reasons, failure.infra),
            );
            ranges.push(failure.range);
        }

        let mut alerts = Vec::new();
        for group in merge_ranges(ranges) {
            let culprits = self.culprits(&group).await;
            for mut alert in self.group_alerts(&group, &details) {
                alert.culprits = culprits.clone();
                alerts.push(alert);
            }
        }

        alerts.sort_by(|a, b| {
            (a.severity, &a.step_name, &a.key).cmp(&(b.severity, &b.step_name, &b.key))
        });
        self.worker.metrics.add(Metric::AlertsEmitted, alerts.len() as u64);
        alerts
    }

    fn excluded(&self, range: &StepFailureRange) -> bool {
        let (Some(rules), Some(tree), Some(master)) =
            (&self.rules, &self.config.tree, &range.master)
        else {
            return false;
        };
        let excluded = rules.exclude_failure(tree, master, &range.builder.builder, &range.step_name);
        if excluded {
            tracing::debug!(
                tree = %tree,
                master = %master,
                builder = %range.builder,
                step = %range.step_name,
                "failure excluded by gatekeeper"
            );
        }
        excluded
    }

    fn closes_tree(&self, ranges: &[StepFailureRange]) -> bool {
        let Some(rules) = &self.rules else {
            return false;
        };
        ranges.iter().any(|range| {
            range.master.as_deref().is_some_and(|master| {
                rules.would_close_tree(master, &range.builder.builder, &range.step_name)
            })
        })
    }

    /// One alert per distinct reason signature in the group. Every alert of
    /// a group carries all of its ranges and its regression range.
    fn group_alerts(
        &self,
        group: &StepGroup,
        details: &HashMap<(BuilderId, String), (Vec<Reason>, bool)>,
    ) -> Vec<Alert> {
        let Some(first) = group.ranges.first() else {
            return Vec::new();
        };

        let mut reasons: Vec<Reason> = Vec::new();
        let mut infra = true;
        for range in &group.ranges {
            let (found, range_infra) =
                match details.get(&(range.builder.clone(), range.step_name.clone())) {
                    Some((found, range_infra)) => (found.as_slice(), *range_infra),
                    None => (&[][..], false),
                };
            infra &= range_infra;
            for reason in found {
                let signature = reason.signature();
                if !reasons.iter().any(|r| r.signature() == signature) {
                    reasons.push(reason.clone());
                }
            }
        }
        if reasons.is_empty() {
            reasons.push(Reason::build_step(&group.step_name));
        }

        let tree_closer = self.closes_tree(&group.ranges);
        let kind = if infra { AlertKind::InfraFailure } else { AlertKind::BuildFailure };
        reasons
            .into_iter()
            .map(|reason| Alert {
                key: Alert::key_for(first, &reason),
                title: reason.title(&group.ranges),
                kind,
                severity: severity(&reason, tree_closer, kind),
                step_name: group.step_name.clone(),
                ranges: group.ranges.clone(),
                regression_range: group.regression_range.clone(),
                reason,
                tree_closer,
                culprits: Vec::new(),
            })
            .collect()
    }

    async fn culprits(&self, group: &StepGroup) -> Vec<Culprit> {
        let Some(first) = group.ranges.first() else {
            return Vec::new();
        };
        match self.culprits.culprits(&first.builder, &group.step_name, first.latest_failure).await {
            Ok(culprits) => culprits,
            Err(e) => {
                tracing::warn!(
                    builder = %first.builder,
                    step = %group.step_name,
                    error = %e,
                    "culprit lookup failed"
                );
                Vec::new()
            }
        }
    }
}

/// Reason severity wins; otherwise closing beats infra beats new.
fn severity(reason: &Reason, tree_closer: bool, kind: AlertKind) -> Severity {
    match reason.severity() {
        Severity::NoSeverity if tree_closer => Severity::TreeCloser,
        Severity::NoSeverity if kind == AlertKind::InfraFailure => Severity::InfraFailure,
        Severity::NoSeverity => Severity::NewFailure,
        demanded => demanded,
    }
}

#[cfg(test)]
#[path = "analyzer_tests.rs"]
mod tests;
