use async_trait::async_trait;
use lgpd_core::{AppConfig, DataSeverity, IssueSeverity, IssueType, ScanStatus};
use lgpd_scanner::{
    ArtifactSource, ChannelProgress, ComplianceAnalyzer, ProgressListener, SampleScraper,
    ScanArtifacts, ScanError, ScrapeError,
};
use std::sync::Mutex;
use std::time::Duration;

struct UnreachableSource;

#[async_trait]
impl ArtifactSource for UnreachableSource {
    async fn fetch(&self, url: &str) -> Result<ScanArtifacts, ScrapeError> {
        Err(ScrapeError::Unreachable {
            url: url.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

struct StalledSource;

#[async_trait]
impl ArtifactSource for StalledSource {
    async fn fetch(&self, _url: &str) -> Result<ScanArtifacts, ScrapeError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        SampleScraper::new().fetch("https://lento.example").await
    }
}

#[tokio::test]
async fn test_sample_scan_report() {
    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());
    let result = analyzer
        .analyze("https://exemplo.com.br", None)
        .await
        .expect("scan succeeds");

    // 100 - (25 + 15 + 15 + 15 + 5 + 15) - 10 (CPF keyword) + 10 (policy found)
    assert_eq!(result.overall_score, 10);
    assert_eq!(result.url, "https://exemplo.com.br");

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
            (IssueSeverity::Warning, IssueType::PrivacyPolicy),
            (IssueSeverity::Warning, IssueType::DataRetention),
            (IssueSeverity::Info, IssueType::Cookies),
            (IssueSeverity::Warning, IssueType::Cookies),
        ]
    );
    assert_eq!(result.issues[0].location, "/cadastro - form 1");
    assert_eq!(result.issues[2].location, "/newsletter - form 2");

    let cpf = result
        .data_types
        .iter()
        .find(|d| d.data_type == "CPF")
        .expect("CPF keyword reported");
    assert_eq!(cpf.severity, DataSeverity::High);
    assert_eq!(cpf.count, 0);
    assert_eq!(cpf.locations, vec!["Page content"]);

    let email = result
        .data_types
        .iter()
        .find(|d| d.data_type == "Email")
        .expect("contact email reported");
    assert_eq!(email.count, 1);

    let summary = result.summary();
    assert_eq!(summary.critical, 1);
    assert_eq!(summary.warning, 4);
    assert_eq!(summary.info, 1);
    assert_eq!(summary.high_severity_data_types, 1);
    assert!(!summary.passed);
    assert_eq!(summary.status, ScanStatus::HighRisk);

    let names: Vec<&str> = result.data_types.iter().map(|d| d.data_type.as_str()).collect();
    assert!(names.contains(&"Phone"));
}

#[tokio::test]
async fn test_progress_milestones_in_order() {
    let seen = Mutex::new(Vec::new());
    let listener = |percent: u8, _: &str| seen.lock().expect("lock").push(percent);

    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());
    analyzer
        .analyze("exemplo.com.br", Some(&listener))
        .await
        .expect("scan succeeds");

    assert_eq!(
        seen.into_inner().expect("lock"),
        vec![20, 40, 60, 80, 90, 100]
    );
}

#[tokio::test]
async fn test_fetch_failure_aborts_scan() {
    let seen = Mutex::new(Vec::new());
    let listener = |percent: u8, _: &str| seen.lock().expect("lock").push(percent);

    let analyzer = ComplianceAnalyzer::new(UnreachableSource);
    let err = analyzer
        .analyze("https://fora.example", Some(&listener))
        .await
        .expect_err("scan fails");

    let ScanError::AnalysisFailed { url, source } = err;
    assert_eq!(url, "https://fora.example");
    assert!(matches!(source, ScrapeError::Unreachable { .. }));
    assert_eq!(seen.into_inner().expect("lock"), vec![20]);
}

#[tokio::test]
async fn test_invalid_url_aborts_scan() {
    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());
    let err = analyzer.analyze("", None).await.expect_err("scan fails");

    assert!(matches!(
        err,
        ScanError::AnalysisFailed {
            source: ScrapeError::InvalidUrl(_),
            ..
        }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_fetch_timeout() {
    let analyzer =
        ComplianceAnalyzer::new(StalledSource).with_fetch_timeout(Duration::from_secs(30));

    let err = analyzer
        .analyze("https://lento.example", None)
        .await
        .expect_err("scan times out");

    assert!(matches!(
        err,
        ScanError::AnalysisFailed {
            source: ScrapeError::Timeout(d),
            ..
        } if d == Duration::from_secs(30)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_from_config() {
    let mut config = AppConfig::default();
    config.scanning.fetch_timeout_secs = 2;

    let analyzer = ComplianceAnalyzer::from_config(StalledSource, &config);
    let err = analyzer
        .analyze("https://lento.example", None)
        .await
        .expect_err("scan times out");

    assert!(err.to_string().contains("timed out after 2s"));
}

#[tokio::test]
async fn test_identical_artifacts_identical_results() {
    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());

    let first = analyzer
        .analyze("https://exemplo.com.br", None)
        .await
        .expect("scan succeeds");
    let mut second = analyzer
        .analyze("https://exemplo.com.br", None)
        .await
        .expect("scan succeeds");

    second.scan_date = first.scan_date;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_scans_are_independent() {
    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());

    let (a, b) = tokio::join!(
        analyzer.analyze("https://a.example", None),
        analyzer.analyze("https://b.example", None),
    );

    let a = a.expect("scan a");
    let b = b.expect("scan b");
    assert_eq!(a.url, "https://a.example");
    assert_eq!(b.url, "https://b.example");
    assert_eq!(a.overall_score, b.overall_score);
    assert_eq!(a.cookies[1].domain, "a.example");
    assert_eq!(b.cookies[1].domain, "b.example");
}

#[tokio::test]
async fn test_channel_progress() {
    let (listener, mut rx) = ChannelProgress::channel();

    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());
    analyzer
        .analyze("https://exemplo.com.br", Some(&listener))
        .await
        .expect("scan succeeds");
    drop(listener);

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    let percents: Vec<u8> = events.iter().map(|e| e.percent).collect();
    assert_eq!(percents, vec![20, 40, 60, 80, 90, 100]);
    assert_eq!(events[5].message, "Finalizing analysis...");
}

#[tokio::test]
async fn test_channel_progress_with_dropped_receiver() {
    let (listener, rx) = ChannelProgress::channel();
    drop(rx);

    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());
    let result = analyzer
        .analyze("https://exemplo.com.br", Some(&listener))
        .await
        .expect("scan succeeds");

    assert_eq!(result.overall_score, 10);
}

struct PanickingListener;

impl ProgressListener for PanickingListener {
    fn on_progress(&self, percent: u8, _message: &str) {
        if percent == 60 {
            panic!("listener failure at {percent}");
        }
    }
}

#[tokio::test]
async fn test_panicking_listener_does_not_change_result() {
    let analyzer = ComplianceAnalyzer::new(SampleScraper::new());

    let baseline = analyzer
        .analyze("https://exemplo.com.br", None)
        .await
        .expect("scan succeeds");
    let mut observed = analyzer
        .analyze("https://exemplo.com.br", Some(&PanickingListener))
        .await
        .expect("scan succeeds");

    observed.scan_date = baseline.scan_date;
    assert_eq!(baseline, observed);
}
