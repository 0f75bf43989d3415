//! Compliance rule registry.
//!
//! Every rule reads exactly one artifact collection (a single form, the
//! privacy policy, or the cookie jar) and yields at most one [`Issue`]. Rules
//! never see each other's output. The registry keeps them in evaluation order
//! so the issue list of a scan is deterministic.

use lgpd_core::{CookieAnalysis, FormAnalysis, Issue, PrivacyPolicyAnalysis};

/// Cookie rules.
pub mod cookie;
/// Per-form rules.
pub mod form;
/// Privacy policy rules.
pub mod policy;

/// Artifact collection a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// One form at a time
    Forms,
    /// The privacy policy
    PrivacyPolicy,
    /// All cookies together
    Cookies,
}

/// Check function of a rule, typed by the collection it reads.
#[derive(Clone, Copy)]
pub enum RuleCheck {
    /// Receives the zero-based form index and the form
    Form(fn(usize, &FormAnalysis) -> Option<Issue>),
    /// Receives the privacy policy analysis
    Policy(fn(&PrivacyPolicyAnalysis) -> Option<Issue>),
    /// Receives every cookie
    Cookies(fn(&[CookieAnalysis]) -> Option<Issue>),
}

impl std::fmt::Debug for RuleCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Form(_) => "Form",
            Self::Policy(_) => "Policy",
            Self::Cookies(_) => "Cookies",
        };
        f.write_str(kind)
    }
}

/// A registered compliance rule.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Stable identifier
    pub id: &'static str,
    /// One-line description of what the rule checks
    pub summary: &'static str,
    /// When this rule fires, later rules of the same scope are skipped for
    /// that artifact
    pub halts_scope: bool,
    /// The check itself
    pub check: RuleCheck,
}

impl Rule {
    /// Collection this rule reads.
    #[must_use]
    pub fn scope(&self) -> RuleScope {
        match self.check {
            RuleCheck::Form(_) => RuleScope::Forms,
            RuleCheck::Policy(_) => RuleScope::PrivacyPolicy,
            RuleCheck::Cookies(_) => RuleScope::Cookies,
        }
    }
}

/// Ordered set of compliance rules.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleRegistry {
    /// Create a registry with no rules.
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a registry holding the built-in LGPD rules.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for rule in form::rules()
            .into_iter()
            .chain(policy::rules())
            .chain(cookie::rules())
        {
            registry.register(rule);
        }
        registry
    }

    /// Append a rule. It runs after every rule already registered in its scope.
    pub fn register(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Builder form of [`RuleRegistry::register`].
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.register(rule);
        self
    }

    /// All rules, in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Evaluate form rules form by form, in rule order within each form.
    #[must_use]
    pub fn evaluate_forms(&self, forms: &[FormAnalysis]) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (index, form) in forms.iter().enumerate() {
            for rule in &self.rules {
                if let RuleCheck::Form(check) = rule.check {
                    if let Some(issue) = check(index, form) {
                        issues.push(issue);
                        if rule.halts_scope {
                            break;
                        }
                    }
                }
            }
        }

        tracing::debug!(forms = forms.len(), issues = issues.len(), "form rules evaluated");
        issues
    }

    /// Evaluate privacy policy rules.
    #[must_use]
    pub fn evaluate_policy(&self, policy: &PrivacyPolicyAnalysis) -> Vec<Issue> {
        let mut issues = Vec::new();

        for rule in &self.rules {
            if let RuleCheck::Policy(check) = rule.check {
                if let Some(issue) = check(policy) {
                    issues.push(issue);
                    if rule.halts_scope {
                        break;
                    }
                }
            }
        }

        tracing::debug!(found = policy.found, issues = issues.len(), "policy rules evaluated");
        issues
    }

    /// Evaluate cookie rules.
    #[must_use]
    pub fn evaluate_cookies(&self, cookies: &[CookieAnalysis]) -> Vec<Issue> {
        let mut issues = Vec::new();

        for rule in &self.rules {
            if let RuleCheck::Cookies(check) = rule.check {
                if let Some(issue) = check(cookies) {
                    issues.push(issue);
                    if rule.halts_scope {
                        break;
                    }
                }
            }
        }

        tracing::debug!(cookies = cookies.len(), issues = issues.len(), "cookie rules evaluated");
        issues
    }
}
