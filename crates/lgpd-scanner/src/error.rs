use std::time::Duration;
use thiserror::Error;

/// Failures of the scraping collaborator while producing artifacts.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("site unreachable: {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("artifact fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed artifacts: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failure of a whole scan. No partial result accompanies it.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("analysis failed for {url}: {source}")]
    AnalysisFailed {
        url: String,
        #[source]
        source: ScrapeError,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;
