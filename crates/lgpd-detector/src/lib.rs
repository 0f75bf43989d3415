//! LGPD Detector - Personal-data classification for scanned pages.
//!
//! Two classifiers live here:
//!
//! - [`PatternDetector`] runs a fixed registry of per-category regular
//!   expressions and keyword lists over free text (page markup).
//! - [`classify_field`] assigns a [`FieldClass`](lgpd_core::FieldClass) to a
//!   single form field by keyword priority.
//!
//! Both are high-recall: results are candidates, not confirmed PII.
//!
//! # Example
//!
//! ```rust
//! use lgpd_core::{DataCategory, FieldClass};
//! use lgpd_detector::{classify_field, PatternDetector};
//!
//! let detector = PatternDetector::new();
//! let detections = detector.detect("CPF: 123.456.789-00");
//! assert!(detections.iter().any(|d| d.category == DataCategory::Cpf));
//!
//! assert_eq!(classify_field("cpf_do_cliente", "text", "CPF"), FieldClass::Sensitive);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

/// Form field classification.
pub mod field;
/// Category registry and text detection.
pub mod patterns;

pub use field::{classify_field, PERSONAL_KEYWORDS, SENSITIVE_KEYWORDS};
pub use patterns::{default_categories, Detection, DetectionPolicy, PatternCategory, PatternDetector};
