use lgpd_core::{
    CookieAnalysis, DataSeverity, FormAnalysis, FormField, IssueSeverity, IssueType,
    PrivacyPolicyAnalysis,
};
use lgpd_scanner::{ComplianceAnalyzer, JsonArtifactSource, SampleScraper, ScanArtifacts};
use std::io::Write;

fn cookie(name: &str, secure: bool, tracking: bool) -> CookieAnalysis {
    CookieAnalysis {
        name: name.to_string(),
        value: "x".to_string(),
        domain: "loja.example".to_string(),
        secure,
        http_only: !tracking,
        same_site: "lax".to_string(),
        purpose: String::new(),
        is_tracking: tracking,
    }
}

fn unprotected_signup() -> ScanArtifacts {
    ScanArtifacts {
        html: "<html><body><h1>Bem-vindo</h1></body></html>".to_string(),
        forms: vec![FormAnalysis {
            id: "form-signup".to_string(),
            action: "/signup".to_string(),
            method: "post".to_string(),
            fields: vec![
                FormField::new("cpf", "text", "CPF", true),
                FormField::new("nome", "text", "Nome completo", true),
            ],
            has_consent_checkbox: false,
            has_privacy_policy_link: false,
            issues: vec![],
        }],
        cookies: vec![cookie("_fbp", true, true), cookie("prefs", false, false)],
        privacy_policy: PrivacyPolicyAnalysis::not_found(),
    }
}

#[test]
fn test_unprotected_signup_scenario() {
    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());
    let result = analyzer.analyze_artifacts("https://loja.example", unprotected_signup(), None);

    let kinds: Vec<(IssueSeverity, IssueType)> = result
        .issues
        .iter()
        .map(|i| (i.severity, i.issue_type))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (IssueSeverity::Critical, IssueType::Consent),
            (IssueSeverity::Warning, IssueType::PrivacyPolicy),
            (IssueSeverity::Critical, IssueType::PrivacyPolicy),
            (IssueSeverity::Warning, IssueType::Cookies),
            (IssueSeverity::Info, IssueType::Security),
        ]
    );
    assert!(result.data_types.is_empty());
    assert_eq!(result.overall_score, 15);
    assert!(result.issues[3].description.contains('1'));
}

#[test]
fn test_score_matches_formula() {
    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());

    let mut variants = vec![unprotected_signup()];

    let mut with_cpf_text = unprotected_signup();
    with_cpf_text.html = "Titular 123.456.789-00, contato ana@loja.example".to_string();
    variants.push(with_cpf_text);

    let mut with_policy = unprotected_signup();
    with_policy.privacy_policy = PrivacyPolicyAnalysis {
        found: true,
        url: Some("/politica".to_string()),
        last_updated: None,
        has_data_retention: false,
        has_cookie_policy: true,
        has_contact_info: true,
        score: 80,
    };
    variants.push(with_policy);

    let mut compliant = unprotected_signup();
    compliant.forms[0].has_consent_checkbox = true;
    compliant.forms[0].has_privacy_policy_link = true;
    compliant.cookies.clear();
    variants.push(compliant);

    for artifacts in variants {
        let found = artifacts.privacy_policy.found;
        let result = analyzer.analyze_artifacts("https://loja.example", artifacts, None);
        let summary = result.summary();

        let expected = 100
            - 25 * summary.critical as i64
            - 15 * summary.warning as i64
            - 5 * summary.info as i64
            - 10 * summary.high_severity_data_types as i64
            + if found { 10 } else { 0 };

        assert_eq!(i64::from(result.overall_score), expected.clamp(0, 100));
    }
}

#[test]
fn test_cpf_numeral_in_page_text() {
    let mut artifacts = unprotected_signup();
    artifacts.html = "Titular: 123.456.789-00".to_string();

    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());
    let result = analyzer.analyze_artifacts("https://loja.example", artifacts, None);

    let cpf = result
        .data_types
        .iter()
        .find(|d| d.data_type == "CPF")
        .expect("CPF reported");
    assert_eq!(cpf.severity, DataSeverity::High);
    assert_eq!(cpf.count, 1);
    assert_eq!(result.overall_score, 5);
}

#[test]
fn test_cpf_after_ordinal_mark_is_penalized() {
    let mut artifacts = unprotected_signup();
    artifacts.html = "<p>Titular nº123.456.789-00</p>".to_string();

    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());
    let result = analyzer.analyze_artifacts("https://loja.example", artifacts, None);

    let cpf = result
        .data_types
        .iter()
        .find(|d| d.data_type == "CPF")
        .expect("CPF reported");
    assert_eq!(cpf.count, 1);
    assert_eq!(result.overall_score, 5);
}

#[tokio::test]
async fn test_scan_from_captured_json() {
    let json = serde_json::json!({
        "html": "<p>Bem-vindo</p>",
        "forms": [{
            "formId": "form-signup",
            "action": "/signup",
            "method": "post",
            "fields": [
                { "name": "cpf", "type": "text", "label": "CPF", "required": true },
                { "name": "nome", "type": "text", "label": "Nome completo", "required": true }
            ],
            "hasConsentCheckbox": false,
            "hasPrivacyPolicyLink": false
        }],
        "cookies": [],
        "privacyPolicy": {
            "found": false,
            "hasDataRetention": false,
            "hasCookiePolicy": false,
            "hasContactInfo": false,
            "score": 0
        }
    });

    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(json.to_string().as_bytes())
        .expect("write artifacts");

    let analyzer = ComplianceAnalyzer::new(JsonArtifactSource::new(file.path()));
    let result = analyzer
        .analyze("https://loja.example", None)
        .await
        .expect("scan succeeds");

    // 100 - 25 (consent) - 15 (link) - 25 (no policy)
    assert_eq!(result.overall_score, 35);
    assert_eq!(result.issues.len(), 3);

    let serialized = serde_json::to_value(&result).expect("serialize result");
    assert_eq!(serialized["overallScore"], 35);
    assert_eq!(serialized["forms"][0]["fields"][0]["dataType"], "sensitive");
    assert_eq!(serialized["forms"][0]["fields"][1]["dataType"], "personal");
    assert_eq!(serialized["issues"][0]["type"], "consent");
}
