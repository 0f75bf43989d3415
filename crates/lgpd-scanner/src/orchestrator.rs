//! Scan orchestrator.
//!
//! [`ComplianceAnalyzer`] fetches artifacts from an [`ArtifactSource`], runs
//! the rule registry and the pattern detector over them, scores the findings
//! and assembles the [`ScanResult`]. The fetch is the only await point and is
//! bounded by the configured timeout.

use crate::aggregate::{calculate_score, fold_detections, PAGE_CONTENT_LOCATION};
use crate::error::{Result, ScanError, ScrapeError};
use crate::progress::{Milestone, ProgressListener};
use crate::rules::RuleRegistry;
use crate::source::{ArtifactSource, ScanArtifacts};
use chrono::Utc;
use lgpd_core::{AppConfig, ScanResult};
use lgpd_detector::{classify_field, DetectionPolicy, PatternDetector};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

/// Default upper bound on the artifact fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs LGPD compliance scans against one artifact source.
#[derive(Debug)]
pub struct ComplianceAnalyzer<S> {
    /// Scraping collaborator
    source: S,
    /// Personal-data detector run over the page text
    detector: PatternDetector,
    /// Compliance rules
    rules: RuleRegistry,
    /// Upper bound on the artifact fetch
    fetch_timeout: Duration,
}

impl<S: ArtifactSource> ComplianceAnalyzer<S> {
    /// Create an analyzer with the built-in detector and rules.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            detector: PatternDetector::new(),
            rules: RuleRegistry::builtin(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Create an analyzer using the detection policy and fetch timeout from
    /// `config`.
    #[must_use]
    pub fn from_config(source: S, config: &AppConfig) -> Self {
        Self::new(source)
            .with_detector(PatternDetector::with_policy(DetectionPolicy::from(
                &config.detection,
            )))
            .with_fetch_timeout(Duration::from_secs(config.scanning.fetch_timeout_secs))
    }

    /// Replace the personal-data detector.
    #[must_use]
    pub fn with_detector(mut self, detector: PatternDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Replace the rule registry.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = rules;
        self
    }

    /// Set the upper bound on the artifact fetch.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// The artifact source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The personal-data detector.
    #[must_use]
    pub fn detector(&self) -> &PatternDetector {
        &self.detector
    }

    /// The rule registry.
    #[must_use]
    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// The fetch timeout.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Scan `url`.
    ///
    /// Fails with [`ScanError::AnalysisFailed`] when the source errors or the
    /// fetch exceeds the timeout. No partial result is produced in that case.
    pub async fn analyze(
        &self,
        url: &str,
        listener: Option<&dyn ProgressListener>,
    ) -> Result<ScanResult> {
        tracing::debug!(%url, "starting compliance scan");
        notify(listener, Milestone::Connecting);

        let fetched = tokio::time::timeout(self.fetch_timeout, self.source.fetch(url))
            .await
            .unwrap_or(Err(ScrapeError::Timeout(self.fetch_timeout)));

        let artifacts = match fetched {
            Ok(artifacts) => artifacts,
            Err(source) => {
                tracing::warn!(%url, error = %source, "artifact fetch failed");
                return Err(ScanError::AnalysisFailed {
                    url: url.to_string(),
                    source,
                });
            }
        };

        Ok(self.analyze_artifacts(url, artifacts, listener))
    }

    /// Run every analysis stage over already-fetched artifacts.
    ///
    /// Emits every milestone after [`Milestone::Connecting`]. Field classes in
    /// the returned forms are re-derived, whatever the scraper supplied.
    #[must_use]
    pub fn analyze_artifacts(
        &self,
        url: &str,
        artifacts: ScanArtifacts,
        listener: Option<&dyn ProgressListener>,
    ) -> ScanResult {
        let ScanArtifacts {
            html,
            mut forms,
            cookies,
            privacy_policy,
        } = artifacts;

        notify(listener, Milestone::AnalyzingForms);
        for field in forms.iter_mut().flat_map(|form| form.fields.iter_mut()) {
            field.data_type = classify_field(&field.name, &field.input_kind, &field.label);
        }
        let mut issues = self.rules.evaluate_forms(&forms);

        notify(listener, Milestone::DetectingPersonalData);
        let mut data_types = Vec::new();
        let detections = self.detector.detect(&html);
        fold_detections(&mut data_types, &detections, PAGE_CONTENT_LOCATION);

        notify(listener, Milestone::CheckingPrivacyPolicy);
        issues.extend(self.rules.evaluate_policy(&privacy_policy));

        notify(listener, Milestone::AnalyzingCookies);
        issues.extend(self.rules.evaluate_cookies(&cookies));

        notify(listener, Milestone::Finalizing);
        let overall_score = calculate_score(&issues, &data_types, &privacy_policy);

        tracing::info!(
            %url,
            score = overall_score,
            issues = issues.len(),
            data_types = data_types.len(),
            "compliance scan completed"
        );

        ScanResult {
            url: url.to_string(),
            scan_date: Utc::now(),
            overall_score,
            issues,
            data_types,
            forms,
            cookies,
            privacy_policy,
        }
    }
}

/// Deliver a milestone. A panicking listener is logged and otherwise ignored.
fn notify(listener: Option<&dyn ProgressListener>, milestone: Milestone) {
    let Some(listener) = listener else {
        return;
    };

    let percent = milestone.percent();
    let delivered = catch_unwind(AssertUnwindSafe(|| {
        listener.on_progress(percent, milestone.message());
    }));

    if delivered.is_err() {
        tracing::warn!(percent, "progress listener panicked");
    }
}
