//! Configuration management for the LGPD scanner.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding [`ScanningConfig::fetch_timeout_secs`].
pub const ENV_FETCH_TIMEOUT_SECS: &str = "LGPD_FETCH_TIMEOUT_SECS";

/// Environment variable overriding [`DetectionConfig::flag_keyword_hits`].
pub const ENV_FLAG_KEYWORD_HITS: &str = "LGPD_FLAG_KEYWORD_HITS";

/// Main application configuration.
///
/// This is loaded from `~/.config/lgpd-scan/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Artifact retrieval settings
    pub scanning: ScanningConfig,
    /// Personal-data detection settings
    pub detection: DetectionConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML or fail validation
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file path.
    ///
    /// Unlike [`AppConfig::load`], a missing file is an error here.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `LGPD_FETCH_TIMEOUT_SECS`: Override the artifact fetch timeout
    /// - `LGPD_FLAG_KEYWORD_HITS`: Override keyword-only findings (true/false)
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_FETCH_TIMEOUT_SECS) {
            if let Ok(secs) = val.parse() {
                self.scanning.fetch_timeout_secs = secs;
                tracing::debug!("Override scanning.fetch_timeout_secs from env: {}", secs);
            }
        }

        if let Some(val) = lookup(ENV_FLAG_KEYWORD_HITS) {
            if let Ok(flag) = val.parse() {
                self.detection.flag_keyword_hits = flag;
                tracing::debug!("Override detection.flag_keyword_hits from env: {}", flag);
            }
        }
    }

    /// Check value constraints that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scanning.fetch_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.fetch_timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.detection.max_matches_per_category == 0 {
            return Err(ConfigError::InvalidValue {
                field: "detection.max_matches_per_category".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file path.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/lgpd-scan/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("br", "lgpd-scan", "lgpd-scan")
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Artifact retrieval settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Upper bound on the artifact fetch, in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 30,
        }
    }
}

/// Personal-data detection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Maximum literal matches kept per category in one detection pass
    pub max_matches_per_category: usize,
    /// Report a category on a keyword hit even when its pattern found nothing
    pub flag_keyword_hits: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_matches_per_category: 5,
            flag_keyword_hits: true,
        }
    }
}
