use super::{Rule, RuleCheck};
use lgpd_core::{Issue, IssueSeverity, IssueType, PrivacyPolicyAnalysis};

/// No privacy policy reachable. Halts the remaining policy rules.
pub const POLICY_MISSING: &str = "policy-missing";

/// Policy does not state a retention period.
pub const RETENTION_UNDISCLOSED: &str = "policy-retention-undisclosed";

/// Policy does not cover cookies.
pub const COOKIE_POLICY_INCOMPLETE: &str = "policy-cookies-incomplete";

/// Location reported when the scraper did not record the policy URL.
pub const DEFAULT_POLICY_LOCATION: &str = "/privacidade";

pub(super) fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: POLICY_MISSING,
            summary: "The site must publish a privacy policy",
            halts_scope: true,
            check: RuleCheck::Policy(policy_missing),
        },
        Rule {
            id: RETENTION_UNDISCLOSED,
            summary: "The privacy policy must state how long data is kept",
            halts_scope: false,
            check: RuleCheck::Policy(retention_undisclosed),
        },
        Rule {
            id: COOKIE_POLICY_INCOMPLETE,
            summary: "The privacy policy should cover cookies",
            halts_scope: false,
            check: RuleCheck::Policy(cookie_policy_incomplete),
        },
    ]
}

fn policy_location(policy: &PrivacyPolicyAnalysis) -> String {
    policy
        .url
        .clone()
        .unwrap_or_else(|| DEFAULT_POLICY_LOCATION.to_string())
}

/// Flag a site without a privacy policy.
#[must_use]
pub fn policy_missing(policy: &PrivacyPolicyAnalysis) -> Option<Issue> {
    if policy.found {
        return None;
    }

    Some(Issue::new(
        IssueSeverity::Critical,
        IssueType::PrivacyPolicy,
        "Privacy policy not found",
        "The site has no accessible privacy policy",
        "General",
        "Write and publish a privacy policy that follows the LGPD",
    ))
}

/// Flag a policy that does not disclose retention periods.
#[must_use]
pub fn retention_undisclosed(policy: &PrivacyPolicyAnalysis) -> Option<Issue> {
    if !policy.found || policy.has_data_retention {
        return None;
    }

    Some(Issue::new(
        IssueSeverity::Warning,
        IssueType::DataRetention,
        "Retention period not specified",
        "The privacy policy does not state how long personal data is kept",
        policy_location(policy),
        "Define and disclose a retention period for each type of data",
    ))
}

/// Flag a policy that does not cover cookies.
#[must_use]
pub fn cookie_policy_incomplete(policy: &PrivacyPolicyAnalysis) -> Option<Issue> {
    if !policy.found || policy.has_cookie_policy {
        return None;
    }

    Some(Issue::new(
        IssueSeverity::Info,
        IssueType::Cookies,
        "Incomplete cookie policy",
        "The policy does not describe cookies and tracking technologies",
        policy_location(policy),
        "Add a cookie section covering their purpose and how to disable them",
    ))
}
