use super::{Rule, RuleCheck};
use lgpd_core::{CookieAnalysis, Issue, IssueSeverity, IssueType};

/// Tracking cookies set without a consent mechanism.
pub const TRACKING_COOKIES: &str = "cookies-tracking";

/// Cookies missing the `Secure` flag.
pub const INSECURE_COOKIES: &str = "cookies-insecure";

pub(super) fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: TRACKING_COOKIES,
            summary: "Tracking cookies require consent",
            halts_scope: false,
            check: RuleCheck::Cookies(tracking_cookies),
        },
        Rule {
            id: INSECURE_COOKIES,
            summary: "Cookies should set the Secure flag",
            halts_scope: false,
            check: RuleCheck::Cookies(insecure_cookies),
        },
    ]
}

/// Flag tracking cookies, reporting how many were found.
#[must_use]
pub fn tracking_cookies(cookies: &[CookieAnalysis]) -> Option<Issue> {
    let count = cookies.iter().filter(|c| c.is_tracking).count();
    if count == 0 {
        return None;
    }

    Some(Issue::new(
        IssueSeverity::Warning,
        IssueType::Cookies,
        "Tracking cookies without consent",
        format!("Detected {count} tracking cookies that may require consent"),
        "Site cookies",
        "Add a cookie banner that lets visitors accept or reject non-essential cookies",
    ))
}

/// Flag cookies without the `Secure` flag, reporting how many were found.
#[must_use]
pub fn insecure_cookies(cookies: &[CookieAnalysis]) -> Option<Issue> {
    let count = cookies.iter().filter(|c| !c.secure).count();
    if count == 0 {
        return None;
    }

    Some(Issue::new(
        IssueSeverity::Info,
        IssueType::Security,
        "Cookies without Secure flag",
        format!("{count} cookies do not set the Secure flag"),
        "Cookie configuration",
        "Set the Secure flag on cookies served over HTTPS",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(name: &str, secure: bool, tracking: bool) -> CookieAnalysis {
        CookieAnalysis {
            name: name.to_string(),
            value: "v".to_string(),
            domain: "example.com".to_string(),
            secure,
            http_only: true,
            same_site: "lax".to_string(),
            purpose: String::new(),
            is_tracking: tracking,
        }
    }

    #[test]
    fn test_no_cookies_no_issues() {
        assert!(tracking_cookies(&[]).is_none());
        assert!(insecure_cookies(&[]).is_none());
    }

    #[test]
    fn test_tracking_count_reported() {
        let cookies = vec![
            cookie("_ga", true, true),
            cookie("_fbp", true, true),
            cookie("session", true, false),
        ];

        let issue = tracking_cookies(&cookies).expect("issue raised");
        assert_eq!(issue.severity, IssueSeverity::Warning);
        assert_eq!(issue.issue_type, IssueType::Cookies);
        assert!(issue.description.contains("Detected 2 tracking cookies"));
        assert!(insecure_cookies(&cookies).is_none());
    }

    #[test]
    fn test_insecure_count_reported() {
        let cookies = vec![cookie("a", false, false), cookie("b", false, false)];

        let issue = insecure_cookies(&cookies).expect("issue raised");
        assert_eq!(issue.severity, IssueSeverity::Info);
        assert_eq!(issue.issue_type, IssueType::Security);
        assert!(issue.description.starts_with("2 cookies"));
        assert!(tracking_cookies(&cookies).is_none());
    }

    #[test]
    fn test_checks_are_independent() {
        let cookies = vec![cookie("_ga", false, true)];
        assert!(tracking_cookies(&cookies).is_some());
        assert!(insecure_cookies(&cookies).is_some());
    }
}
