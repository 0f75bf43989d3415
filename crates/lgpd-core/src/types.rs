//! Shared data model for compliance scans.
//!
//! Artifact descriptors (forms, cookies, privacy policy) arrive from a
//! scraping collaborator; issues and data-type summaries are produced by the
//! scanner. Field names serialize in camelCase to match the report consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum overall score considered compliant in reports.
pub const PASSING_SCORE: u8 = 80;

/// Minimum overall score reported as needing attention rather than high risk.
pub const ATTENTION_SCORE: u8 = 60;

/// Severity of a compliance issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    /// Direct violation that must be fixed
    Critical,
    /// Likely violation or missing safeguard
    Warning,
    /// Recommended improvement
    Info,
}

impl IssueSeverity {
    /// Points removed from the overall score for each issue of this severity.
    #[must_use]
    pub fn penalty(self) -> i32 {
        match self {
            Self::Critical => 25,
            Self::Warning => 15,
            Self::Info => 5,
        }
    }

    /// Get the string representation of the severity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compliance area an issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Collection of personal data
    DataCollection,
    /// Privacy policy presence or linkage
    PrivacyPolicy,
    /// Data retention disclosure
    DataRetention,
    /// Cookie usage and disclosure
    Cookies,
    /// Consent capture
    Consent,
    /// Transport or storage security
    Security,
}

impl IssueType {
    /// Get the string representation of the issue type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DataCollection => "data_collection",
            Self::PrivacyPolicy => "privacy_policy",
            Self::DataRetention => "data_retention",
            Self::Cookies => "cookies",
            Self::Consent => "consent",
            Self::Security => "security",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single compliance finding produced by a rule evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// How serious the finding is
    pub severity: IssueSeverity,
    /// Compliance area
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Short headline
    pub title: String,
    /// What was observed
    pub description: String,
    /// Where on the site it was observed
    pub location: String,
    /// Suggested remediation
    pub recommendation: String,
}

impl Issue {
    /// Create a new issue.
    #[must_use]
    pub fn new(
        severity: IssueSeverity,
        issue_type: IssueType,
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            issue_type,
            title: title.into(),
            description: description.into(),
            location: location.into(),
            recommendation: recommendation.into(),
        }
    }
}

/// Severity tier of a personal-data category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSeverity {
    /// Identity documents and similar
    High,
    /// Direct contact or identifying data
    Medium,
    /// Indirect or coarse data
    Low,
}

impl DataSeverity {
    /// Get the string representation of the severity tier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for DataSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Personal-data categories recognized by the pattern detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataCategory {
    /// Brazilian individual taxpayer number (CPF)
    Cpf,
    /// Email address
    Email,
    /// Phone number
    Phone,
    /// Full personal name
    FullName,
    /// Brazilian postal code (CEP)
    Cep,
    /// IPv4 address
    Ip,
}

impl DataCategory {
    /// Label used for this category in reports.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::FullName => "Full name",
            Self::Cep => "CEP",
            Self::Ip => "IP address",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Summary of one personal-data category found during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataTypeFound {
    /// Display name of the category
    #[serde(rename = "type")]
    pub data_type: String,
    /// Accumulated number of literal matches
    pub count: usize,
    /// One label per detection batch, in order
    pub locations: Vec<String>,
    /// Severity tier of the category
    pub severity: DataSeverity,
}

/// Classification of a form field by the kind of data it collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldClass {
    /// Identifying personal data (name, email, phone...)
    Personal,
    /// Documents, credentials or payment data
    Sensitive,
    /// Anything else
    #[default]
    Regular,
}

/// A single input of a scraped form.
///
/// `data_type` is derived by the scanner from the other fields; any value
/// supplied by a scraper is replaced during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Field `name` attribute
    pub name: String,
    /// Input kind (`text`, `email`, `tel`...)
    #[serde(alias = "type")]
    pub input_kind: String,
    /// Visible label or placeholder
    pub label: String,
    /// Whether the field is mandatory
    pub required: bool,
    /// Derived classification
    #[serde(default)]
    pub data_type: FieldClass,
}

impl FormField {
    /// Create a field with a not-yet-derived classification.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        input_kind: impl Into<String>,
        label: impl Into<String>,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            input_kind: input_kind.into(),
            label: label.into(),
            required,
            data_type: FieldClass::default(),
        }
    }
}

/// A form detected on the scanned page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnalysis {
    /// Form identifier
    #[serde(rename = "formId", alias = "id")]
    pub id: String,
    /// Submission endpoint path
    pub action: String,
    /// HTTP method
    pub method: String,
    /// Fields in document order
    pub fields: Vec<FormField>,
    /// Whether an explicit consent checkbox is present
    pub has_consent_checkbox: bool,
    /// Whether a privacy policy link is present near the form
    pub has_privacy_policy_link: bool,
    /// Free-text notes from the scraper
    #[serde(default)]
    pub issues: Vec<String>,
}

/// A cookie set by the scanned site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct CookieAnalysis {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Cookie domain
    pub domain: String,
    /// `Secure` flag
    pub secure: bool,
    /// `HttpOnly` flag
    pub http_only: bool,
    /// `SameSite` attribute
    pub same_site: String,
    /// Declared or inferred purpose
    pub purpose: String,
    /// Used for cross-session or behavioral tracking
    pub is_tracking: bool,
}

/// What the scraper learned about the site's privacy policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct PrivacyPolicyAnalysis {
    /// Whether a policy was found at all
    pub found: bool,
    /// Policy location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Last update date as published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    /// Policy states a data retention period
    pub has_data_retention: bool,
    /// Policy covers cookies
    pub has_cookie_policy: bool,
    /// Policy names a contact channel
    pub has_contact_info: bool,
    /// Scraper-assigned quality score
    pub score: u32,
}

impl PrivacyPolicyAnalysis {
    /// Analysis for a site with no reachable policy.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            found: false,
            url: None,
            last_updated: None,
            has_data_retention: false,
            has_cookie_policy: false,
            has_contact_info: false,
            score: 0,
        }
    }
}

/// Final report of a compliance scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    /// Scanned URL
    pub url: String,
    /// When the scan completed
    pub scan_date: DateTime<Utc>,
    /// Score in `0..=100`
    pub overall_score: u8,
    /// Issues in evaluation order
    pub issues: Vec<Issue>,
    /// At most one entry per category
    pub data_types: Vec<DataTypeFound>,
    /// Forms with derived field classes
    pub forms: Vec<FormAnalysis>,
    /// Cookies as scraped
    pub cookies: Vec<CookieAnalysis>,
    /// Privacy policy as scraped
    pub privacy_policy: PrivacyPolicyAnalysis,
}

impl ScanResult {
    /// Number of issues with the given severity.
    #[must_use]
    pub fn count_by_severity(&self, severity: IssueSeverity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }

    /// Condensed view of the report.
    #[must_use]
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            critical: self.count_by_severity(IssueSeverity::Critical),
            warning: self.count_by_severity(IssueSeverity::Warning),
            info: self.count_by_severity(IssueSeverity::Info),
            high_severity_data_types: self
                .data_types
                .iter()
                .filter(|d| d.severity == DataSeverity::High)
                .count(),
            passed: self.overall_score >= PASSING_SCORE,
            status: ScanStatus::from_score(self.overall_score),
        }
    }
}

/// Issue counts per severity and the pass/fail verdict of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanSummary {
    /// Critical issues
    pub critical: usize,
    /// Warnings
    pub warning: usize,
    /// Informational issues
    pub info: usize,
    /// Data categories with high severity
    pub high_severity_data_types: usize,
    /// Score reached [`PASSING_SCORE`]
    pub passed: bool,
    /// Compliance tier of the score
    pub status: ScanStatus,
}

/// Compliance tier shown next to the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    /// Score at or above [`PASSING_SCORE`]
    Good,
    /// Score at or above [`ATTENTION_SCORE`]
    Attention,
    /// Anything lower
    HighRisk,
}

impl ScanStatus {
    /// Tier for an overall score.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        if score >= PASSING_SCORE {
            Self::Good
        } else if score >= ATTENTION_SCORE {
            Self::Attention
        } else {
            Self::HighRisk
        }
    }

    /// Get the string representation of the tier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Attention => "attention",
            Self::HighRisk => "high_risk",
        }
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
