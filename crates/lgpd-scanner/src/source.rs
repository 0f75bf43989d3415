//! Scraping collaborator boundary.
//!
//! The analyzer never touches the network itself. An [`ArtifactSource`]
//! turns a URL into [`ScanArtifacts`]; everything after that is pure
//! computation.

use crate::error::ScrapeError;
use async_trait::async_trait;
use lgpd_core::{CookieAnalysis, FormAnalysis, FormField, PrivacyPolicyAnalysis};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Everything the scraper extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanArtifacts {
    /// Page markup or text
    pub html: String,
    /// Forms found on the page
    pub forms: Vec<FormAnalysis>,
    /// Cookies set by the site
    pub cookies: Vec<CookieAnalysis>,
    /// Privacy policy findings
    pub privacy_policy: PrivacyPolicyAnalysis,
}

/// Produces scan artifacts for a URL.
///
/// This is the only suspension point of a scan; the analyzer bounds it with a
/// timeout. Implementations own their retry policy, if any.
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Fetch artifacts for `url`.
    async fn fetch(&self, url: &str) -> Result<ScanArtifacts, ScrapeError>;
}

/// Stand-in scraper that synthesizes a fixed sample page for any host.
///
/// The page carries a sign-up form collecting CPF without consent, a
/// newsletter form with a generic consent checkbox, an analytics tracking
/// cookie and a session cookie. Output depends only on the URL's host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleScraper;

impl SampleScraper {
    /// Create a new sample scraper.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extract the host from `url`, accepting bare domains without a scheme.
    pub fn host_of(url: &str) -> Result<String, ScrapeError> {
        let parsed = Url::parse(url).or_else(|_| Url::parse(&format!("https://{url}")));

        parsed
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .ok_or_else(|| ScrapeError::InvalidUrl(url.to_string()))
    }

    fn sample_html(domain: &str) -> String {
        format!(
            r#"<html>
  <head><title>{domain}</title></head>
  <body>
    <form action="/cadastro" method="post">
      <input type="text" name="nome_completo" placeholder="Nome completo" required>
      <input type="email" name="email" placeholder="Email" required>
      <input type="text" name="cpf" placeholder="CPF" required>
      <input type="tel" name="telefone" placeholder="Telefone">
      <input type="text" name="endereco" placeholder="Endereço">
      <input type="submit" value="Cadastrar">
    </form>

    <form action="/newsletter" method="post">
      <input type="email" name="email_newsletter" placeholder="Seu email">
      <input type="checkbox" name="aceito_termos"> Aceito os termos
      <input type="submit" value="Inscrever">
    </form>

    <p>Entre em contato: contato@{domain}</p>
    <p>WhatsApp: (11) 99999-9999</p>
  </body>
</html>"#
        )
    }

    fn sample_forms() -> Vec<FormAnalysis> {
        vec![
            FormAnalysis {
                id: "form-cadastro".to_string(),
                action: "/cadastro".to_string(),
                method: "post".to_string(),
                fields: vec![
                    FormField::new("nome_completo", "text", "Nome completo", true),
                    FormField::new("email", "email", "Email", true),
                    FormField::new("cpf", "text", "CPF", true),
                    FormField::new("telefone", "tel", "Telefone", false),
                    FormField::new("endereco", "text", "Endereço", false),
                ],
                has_consent_checkbox: false,
                has_privacy_policy_link: false,
                issues: vec![
                    "Collects CPF without explicit consent".to_string(),
                    "No privacy policy link".to_string(),
                ],
            },
            FormAnalysis {
                id: "form-newsletter".to_string(),
                action: "/newsletter".to_string(),
                method: "post".to_string(),
                fields: vec![FormField::new("email_newsletter", "email", "Seu email", true)],
                has_consent_checkbox: true,
                has_privacy_policy_link: false,
                issues: vec!["Generic terms checkbox does not mention the LGPD".to_string()],
            },
        ]
    }

    fn sample_cookies(domain: &str) -> Vec<CookieAnalysis> {
        vec![
            CookieAnalysis {
                name: "_ga".to_string(),
                value: "GA1.2.123456789.1234567890".to_string(),
                domain: format!(".{domain}"),
                secure: true,
                http_only: false,
                same_site: "lax".to_string(),
                purpose: "Google Analytics - tracking".to_string(),
                is_tracking: true,
            },
            CookieAnalysis {
                name: "session_id".to_string(),
                value: "abc123def456".to_string(),
                domain: domain.to_string(),
                secure: true,
                http_only: true,
                same_site: "strict".to_string(),
                purpose: "User session".to_string(),
                is_tracking: false,
            },
        ]
    }

    fn sample_policy() -> PrivacyPolicyAnalysis {
        PrivacyPolicyAnalysis {
            found: true,
            url: Some("/privacidade".to_string()),
            last_updated: Some("2023-06-15".to_string()),
            has_data_retention: false,
            has_cookie_policy: false,
            has_contact_info: true,
            score: 60,
        }
    }
}

#[async_trait]
impl ArtifactSource for SampleScraper {
    async fn fetch(&self, url: &str) -> Result<ScanArtifacts, ScrapeError> {
        let domain = Self::host_of(url)?;
        tracing::debug!(%domain, "synthesizing sample artifacts");

        Ok(ScanArtifacts {
            html: Self::sample_html(&domain),
            forms: Self::sample_forms(),
            cookies: Self::sample_cookies(&domain),
            privacy_policy: Self::sample_policy(),
        })
    }
}

/// Reads artifacts captured by an external scraper from a JSON document.
///
/// The document must deserialize into [`ScanArtifacts`]; missing or mistyped
/// fields fail the fetch instead of being defaulted.
#[derive(Debug, Clone)]
pub struct JsonArtifactSource {
    path: PathBuf,
}

impl JsonArtifactSource {
    /// Create a source backed by the JSON file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ArtifactSource for JsonArtifactSource {
    async fn fetch(&self, url: &str) -> Result<ScanArtifacts, ScrapeError> {
        tracing::debug!(%url, path = %self.path.display(), "loading captured artifacts");
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let artifacts = serde_json::from_str(&contents)?;
        Ok(artifacts)
    }
}
