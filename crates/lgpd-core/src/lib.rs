//! LGPD Core - Foundation crate for the LGPD compliance scanner.
//!
//! This crate provides the shared data model, error handling and configuration
//! management that the detector and scanner crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Scan artifacts, issues and the final [`ScanResult`]
//!
//! # Example
//!
//! ```rust
//! use lgpd_core::{AppConfig, IssueSeverity};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.detection.max_matches_per_category, 5);
//! assert_eq!(IssueSeverity::Critical.penalty(), 25);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, DetectionConfig, ScanningConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::{
    CookieAnalysis, DataCategory, DataSeverity, DataTypeFound, FieldClass, FormAnalysis,
    FormField, Issue, IssueSeverity, IssueType, PrivacyPolicyAnalysis, ScanResult, ScanStatus,
    ScanSummary, ATTENTION_SCORE, PASSING_SCORE,
};
