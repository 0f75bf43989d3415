//! Scan progress reporting.
//!
//! Progress is advisory. Listeners are invoked synchronously at each
//! [`Milestone`], in order, and nothing they do can change a scan's result.

use serde::Serialize;
use tokio::sync::mpsc;

/// Fixed checkpoints of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    /// Fetching artifacts
    Connecting,
    /// Running form rules
    AnalyzingForms,
    /// Running the pattern detector
    DetectingPersonalData,
    /// Running privacy policy rules
    CheckingPrivacyPolicy,
    /// Running cookie rules
    AnalyzingCookies,
    /// Scoring and assembling the report
    Finalizing,
}

impl Milestone {
    /// Every milestone, in emission order.
    pub const ALL: [Self; 6] = [
        Self::Connecting,
        Self::AnalyzingForms,
        Self::DetectingPersonalData,
        Self::CheckingPrivacyPolicy,
        Self::AnalyzingCookies,
        Self::Finalizing,
    ];

    /// Completion percentage announced at this milestone.
    #[must_use]
    pub fn percent(self) -> u8 {
        match self {
            Self::Connecting => 20,
            Self::AnalyzingForms => 40,
            Self::DetectingPersonalData => 60,
            Self::CheckingPrivacyPolicy => 80,
            Self::AnalyzingCookies => 90,
            Self::Finalizing => 100,
        }
    }

    /// Human-readable message announced at this milestone.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Connecting => "Connecting to site...",
            Self::AnalyzingForms => "Analyzing forms...",
            Self::DetectingPersonalData => "Detecting personal-data fields...",
            Self::CheckingPrivacyPolicy => "Checking privacy policy...",
            Self::AnalyzingCookies => "Analyzing cookies...",
            Self::Finalizing => "Finalizing analysis...",
        }
    }
}

/// A progress notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    /// Completion percentage
    pub percent: u8,
    /// Human-readable message
    pub message: String,
}

impl From<Milestone> for ProgressEvent {
    fn from(milestone: Milestone) -> Self {
        Self {
            percent: milestone.percent(),
            message: milestone.message().to_string(),
        }
    }
}

/// Receives progress notifications during a scan.
pub trait ProgressListener: Send + Sync {
    /// Called once per milestone, in order.
    fn on_progress(&self, percent: u8, message: &str);
}

impl<F> ProgressListener for F
where
    F: Fn(u8, &str) + Send + Sync,
{
    fn on_progress(&self, percent: u8, message: &str) {
        self(percent, message);
    }
}

/// Forwards progress into an unbounded tokio channel.
///
/// A dropped receiver is ignored; the scan keeps going.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelProgress {
    /// Wrap an existing sender.
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<ProgressEvent>) -> Self {
        Self { tx }
    }

    /// Create a listener together with its receiving end.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl ProgressListener for ChannelProgress {
    fn on_progress(&self, percent: u8, message: &str) {
        let event = ProgressEvent {
            percent,
            message: message.to_string(),
        };
        if self.tx.send(event).is_err() {
            tracing::trace!(percent, "progress receiver dropped");
        }
    }
}
