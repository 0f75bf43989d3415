use lgpd_core::{DataCategory, DataSeverity, DetectionConfig};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default cap on literal matches kept per category.
pub const DEFAULT_MAX_MATCHES: usize = 5;

/// Personal-data detector over free text.
///
/// The detector walks an ordered registry of [`PatternCategory`] descriptors.
/// A category is reported when its pattern matches, or (subject to
/// [`DetectionPolicy::keyword_hits`]) when one of its keywords appears anywhere
/// in the text.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    categories: Vec<PatternCategory>,
    policy: DetectionPolicy,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector {
    /// Create a detector with the built-in categories and default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(DetectionPolicy::default())
    }

    /// Create a detector with the built-in categories and a specific policy.
    #[must_use]
    pub fn with_policy(policy: DetectionPolicy) -> Self {
        Self {
            categories: default_categories(),
            policy,
        }
    }

    /// Create a detector over a caller-supplied registry.
    #[must_use]
    pub fn with_categories(categories: Vec<PatternCategory>, policy: DetectionPolicy) -> Self {
        Self { categories, policy }
    }

    /// Registered categories, in evaluation order.
    #[must_use]
    pub fn categories(&self) -> &[PatternCategory] {
        &self.categories
    }

    /// Active detection policy.
    #[must_use]
    pub fn policy(&self) -> DetectionPolicy {
        self.policy
    }

    /// Scan text and report every category that fired, in registry order.
    #[must_use]
    pub fn detect(&self, text: &str) -> Vec<Detection> {
        let lowered = text.to_lowercase();
        let mut detections = Vec::new();

        for category in &self.categories {
            let matches: Vec<String> = category
                .regex
                .find_iter(text)
                .take(self.policy.max_matches)
                .map(|m| m.as_str().to_string())
                .collect();

            // The cap bounds what is kept, not whether the category fired
            let fired = !matches.is_empty()
                || category.regex.is_match(text)
                || (self.policy.keyword_hits && category.keyword_hit(&lowered));

            if fired {
                detections.push(Detection {
                    category: category.category,
                    matches,
                    severity: category.severity,
                });
            }
        }

        tracing::debug!(
            categories = detections.len(),
            text_len = text.len(),
            "personal-data detection finished"
        );

        detections
    }
}

/// Tunables for [`PatternDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionPolicy {
    /// Maximum literal matches kept per category
    pub max_matches: usize,
    /// Report a category on keyword hit alone, with an empty match list
    pub keyword_hits: bool,
}

impl Default for DetectionPolicy {
    fn default() -> Self {
        Self {
            max_matches: DEFAULT_MAX_MATCHES,
            keyword_hits: true,
        }
    }
}

impl From<&DetectionConfig> for DetectionPolicy {
    fn from(config: &DetectionConfig) -> Self {
        Self {
            max_matches: config.max_matches_per_category,
            keyword_hits: config.flag_keyword_hits,
        }
    }
}

/// One category reported by [`PatternDetector::detect`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Category that fired
    pub category: DataCategory,
    /// Literal matches in text order, capped by the policy
    pub matches: Vec<String>,
    /// Severity tier of the category
    pub severity: DataSeverity,
}

impl Detection {
    /// True when the category fired on a keyword only.
    #[must_use]
    pub fn is_keyword_only(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Registry entry describing how to recognize one data category.
#[derive(Clone)]
pub struct PatternCategory {
    /// Category reported on a hit
    pub category: DataCategory,
    /// Severity tier
    pub severity: DataSeverity,
    /// Pattern run against the raw text
    pub regex: Regex,
    /// Lowercase keywords matched as substrings of the lowercased text
    pub keywords: &'static [&'static str],
}

impl PatternCategory {
    fn keyword_hit(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

impl std::fmt::Debug for PatternCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCategory")
            .field("category", &self.category)
            .field("severity", &self.severity)
            .field("regex", &self.regex.as_str())
            .field("keywords", &self.keywords)
            .finish()
    }
}

/// Built-in category registry.
#[must_use]
pub fn default_categories() -> Vec<PatternCategory> {
    vec![
        PatternCategory {
            category: DataCategory::Cpf,
            severity: DataSeverity::High,
            regex: CPF_REGEX.clone(),
            keywords: &["cpf", "documento", "rg", "identidade"],
        },
        PatternCategory {
            category: DataCategory::Email,
            severity: DataSeverity::Medium,
            regex: EMAIL_REGEX.clone(),
            keywords: &["email", "e-mail", "correio"],
        },
        PatternCategory {
            category: DataCategory::Phone,
            severity: DataSeverity::Medium,
            regex: PHONE_REGEX.clone(),
            keywords: &["telefone", "celular", "fone", "whatsapp"],
        },
        PatternCategory {
            category: DataCategory::FullName,
            severity: DataSeverity::Medium,
            regex: FULL_NAME_REGEX.clone(),
            keywords: &["nome", "nome completo", "razão social"],
        },
        PatternCategory {
            category: DataCategory::Cep,
            severity: DataSeverity::Low,
            regex: CEP_REGEX.clone(),
            keywords: &["cep", "código postal", "endereço"],
        },
        PatternCategory {
            category: DataCategory::Ip,
            severity: DataSeverity::Medium,
            regex: IPV4_REGEX.clone(),
            keywords: &["ip", "endereço ip"],
        },
    ]
}

// Compiled regex patterns. Word boundaries and digit classes are ASCII-only so
// accented letters and ordinal marks next to a value still delimit it.
static CPF_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}(?-u:\b)")
        .expect("valid CPF regex")
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}(?-u:\b)")
        .expect("valid email regex")
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)(?:\+55\s?)?(?:\([0-9]{2}\)\s?)?(?:9?[0-9]{4}-?[0-9]{4})(?-u:\b)")
        .expect("valid phone regex")
});

static FULL_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[A-Z][a-z]+\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*(?-u:\b)")
        .expect("valid full name regex")
});

static CEP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)[0-9]{5}-?[0-9]{3}(?-u:\b)").expect("valid CEP regex"));

static IPV4_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)(?:[0-9]{1,3}\.){3}[0-9]{1,3}(?-u:\b)").expect("valid IPv4 regex")
});
