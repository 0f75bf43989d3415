//! LGPD Scanner - Compliance analysis of a website against the LGPD.
//!
//! This crate turns the artifacts scraped from a site (page text, forms,
//! cookies and privacy policy findings) into a scored [`ScanResult`] with a
//! categorized issue list.
//!
//! # Features
//!
//! - Explicit, extensible registry of compliance rules
//! - Personal-data detection over the page text
//! - Deterministic scoring with a clamped `0..=100` result
//! - Optional progress reporting through closures or a tokio channel
//! - Bounded artifact fetch with a single failure mode
//!
//! # Example
//!
//! ```rust
//! use lgpd_scanner::{ComplianceAnalyzer, SampleScraper};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let analyzer = ComplianceAnalyzer::new(SampleScraper::new());
//! let result = analyzer.analyze("https://exemplo.com.br", None).await?;
//! assert!(result.overall_score <= 100);
//! # Ok::<(), lgpd_scanner::ScanError>(())
//! # }).unwrap();
//! ```
//!
//! [`ScanResult`]: lgpd_core::ScanResult

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod aggregate;
#[allow(missing_docs)]
pub mod error;
pub mod orchestrator;
pub mod progress;
pub mod rules;
pub mod source;

// Re-export commonly used types
pub use aggregate::{calculate_score, fold_detections, PAGE_CONTENT_LOCATION};
pub use error::{Result, ScanError, ScrapeError};
pub use orchestrator::{ComplianceAnalyzer, DEFAULT_FETCH_TIMEOUT};
pub use progress::{ChannelProgress, Milestone, ProgressEvent, ProgressListener};
pub use rules::{Rule, RuleCheck, RuleRegistry, RuleScope};
pub use source::{ArtifactSource, JsonArtifactSource, SampleScraper, ScanArtifacts};
