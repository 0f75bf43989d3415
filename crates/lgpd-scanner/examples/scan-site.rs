//! Scan a site with the sample scraper and print the report as JSON.
//!
//! ```text
//! cargo run -p lgpd-scanner --example scan-site -- https://exemplo.com.br
//! cargo run -p lgpd-scanner --example scan-site -- https://exemplo.com.br captured.json
//! ```
//!
//! With a second argument, artifacts are read from that JSON file instead.

use anyhow::Context;
use lgpd_core::AppConfig;
use lgpd_scanner::{
    ArtifactSource, ComplianceAnalyzer, JsonArtifactSource, ProgressListener, SampleScraper,
};
use tracing::info;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,lgpd=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

async fn run<S: ArtifactSource>(source: S, config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let analyzer = ComplianceAnalyzer::from_config(source, config);
    let progress = |percent: u8, message: &str| info!("[{percent:>3}%] {message}");

    let result = analyzer
        .analyze(url, Some(&progress as &dyn ProgressListener))
        .await
        .with_context(|| format!("scanning {url}"))?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    let summary = result.summary();
    info!(
        score = result.overall_score,
        critical = summary.critical,
        warning = summary.warning,
        info = summary.info,
        passed = summary.passed,
        status = %summary.status,
        "scan summary"
    );

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let url = args.next().unwrap_or_else(|| "https://exemplo.com.br".to_string());
    let captured = args.next();

    let config = AppConfig::load_with_env().context("loading configuration")?;
    info!("Starting lgpd-scan v{}", env!("CARGO_PKG_VERSION"));

    match captured {
        Some(path) => run(JsonArtifactSource::new(path), &config, &url).await,
        None => run(SampleScraper::new(), &config, &url).await,
    }
}
