//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Gemini connection settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Token budgets and sampling for article generation
    #[serde(default)]
    pub generation: GenerationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// API key (falls back to GEMINI_API_KEY)
    #[serde(default)]
    pub api_key: String,

    /// Base API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model used for the primary generation call
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Model used for the REST fallback call
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Output token budget of the first primary call
    #[serde(default = "default_first_max_tokens")]
    pub first_max_tokens: u32,

    /// Output token budget of the primary retry
    #[serde(default = "default_retry_max_tokens")]
    pub retry_max_tokens: u32,

    /// Sampling temperature of the primary calls
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Output token budget sent with the fallback payload
    #[serde(default = "default_fallback_max_tokens")]
    pub fallback_max_tokens: u32,
}

// Default value functions

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_primary_model() -> String {
    "models/gemini-2.5-pro".to_string()
}

fn default_fallback_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_first_max_tokens() -> u32 {
    1200
}

fn default_retry_max_tokens() -> u32 {
    2400
}

fn default_temperature() -> f64 {
    0.2
}

fn default_fallback_max_tokens() -> u32 {
    1600
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            first_max_tokens: default_first_max_tokens(),
            retry_max_tokens: default_retry_max_tokens(),
            temperature: default_temperature(),
            fallback_max_tokens: default_fallback_max_tokens(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let mut settings = Self::load_from(&config_path)?;
        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from an explicit file, without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if self.llm.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                if !key.trim().is_empty() {
                    self.llm.api_key = key;
                }
            }
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "blogsmith", "blogsmith")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Settings as TOML with the API key masked.
    pub fn to_redacted_toml(&self) -> Result<String> {
        let mut redacted = self.clone();
        if !redacted.llm.api_key.trim().is_empty() {
            redacted.llm.api_key = "********".to_string();
        }
        Ok(toml::to_string_pretty(&redacted)?)
    }
}
