use super::{Rule, RuleCheck};
use lgpd_core::{FieldClass, FormAnalysis, FormField, Issue, IssueSeverity, IssueType};
use lgpd_detector::classify_field;

/// Sensitive fields collected without a consent checkbox.
pub const SENSITIVE_WITHOUT_CONSENT: &str = "form-sensitive-without-consent";

/// Personal fields collected without a privacy policy link.
pub const PERSONAL_WITHOUT_POLICY_LINK: &str = "form-personal-without-policy-link";

pub(super) fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: SENSITIVE_WITHOUT_CONSENT,
            summary: "Forms collecting sensitive data must carry a consent checkbox",
            halts_scope: false,
            check: RuleCheck::Form(sensitive_without_consent),
        },
        Rule {
            id: PERSONAL_WITHOUT_POLICY_LINK,
            summary: "Forms collecting personal data must link the privacy policy",
            halts_scope: false,
            check: RuleCheck::Form(personal_without_policy_link),
        },
    ]
}

fn fields_of_class(form: &FormAnalysis, class: FieldClass) -> Vec<&FormField> {
    form.fields
        .iter()
        .filter(|f| classify_field(&f.name, &f.input_kind, &f.label) == class)
        .collect()
}

fn form_location(index: usize, form: &FormAnalysis) -> String {
    format!("{} - form {}", form.action, index + 1)
}

/// Flag a form that collects sensitive fields with no consent checkbox.
#[must_use]
pub fn sensitive_without_consent(index: usize, form: &FormAnalysis) -> Option<Issue> {
    if form.has_consent_checkbox {
        return None;
    }

    let sensitive = fields_of_class(form, FieldClass::Sensitive);
    if sensitive.is_empty() {
        return None;
    }

    let labels = sensitive
        .iter()
        .map(|f| f.label.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Some(Issue::new(
        IssueSeverity::Critical,
        IssueType::Consent,
        "Sensitive data collected without consent",
        format!("Form collects {labels} without an LGPD consent checkbox"),
        form_location(index, form),
        "Add a consent checkbox specific to the collection of sensitive data",
    ))
}

/// Flag a form that collects personal fields with no privacy policy link.
#[must_use]
pub fn personal_without_policy_link(index: usize, form: &FormAnalysis) -> Option<Issue> {
    if form.has_privacy_policy_link || fields_of_class(form, FieldClass::Personal).is_empty() {
        return None;
    }

    Some(Issue::new(
        IssueSeverity::Warning,
        IssueType::PrivacyPolicy,
        "Missing privacy policy link",
        "Form collects personal data without a link to the privacy policy",
        form_location(index, form),
        "Add a visible privacy policy link next to the form",
    ))
}
