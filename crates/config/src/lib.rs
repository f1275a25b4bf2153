//! Configuration loading and validation for Concierge.
//!
//! Loads `concierge.toml` with environment variable overrides for
//! secrets. Validates all settings at startup so misconfiguration fails
//! fast instead of mid-turn.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `concierge.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Reasoning-model settings
    #[serde(default)]
    pub model: ModelConfig,

    /// Per-million-token pricing for the configured model
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Agent loop settings
    #[serde(default)]
    pub agent: AgentConfig,

    /// Calendar collaborator settings
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name sent on every request
    #[serde(default = "default_model_name")]
    pub name: String,

    /// API base URL
    #[serde(default = "default_model_base_url")]
    pub base_url: String,

    /// API key. Usually left out of the file and provided via
    /// `CONCIERGE_API_KEY` / `OPENAI_API_KEY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Cap on generated tokens per call
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_input_rate")]
    pub input_per_million: f64,

    #[serde(default = "default_output_rate")]
    pub output_per_million: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum model round-trips per turn
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Optional system prompt template override. `{{current_datetime}}`
    /// is substituted at each iteration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_calendar_base_url")]
    pub base_url: String,

    /// OAuth token endpoint used for refresh grants
    #[serde(default = "default_calendar_token_url")]
    pub token_url: String,

    /// Client credentials. Usually provided via `CONCIERGE_CALENDAR_ID`
    /// and `CONCIERGE_CALENDAR_SECRET`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

fn default_model_name() -> String {
    "gpt-5".into()
}
fn default_model_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_max_output_tokens() -> u32 {
    4096
}
fn default_input_rate() -> f64 {
    1.25
}
fn default_output_rate() -> f64 {
    10.0
}
fn default_max_iterations() -> u32 {
    3
}
fn default_calendar_base_url() -> String {
    "https://calendar.example.com/api/v1".into()
}
fn default_calendar_token_url() -> String {
    "https://calendar.example.com/oauth/token".into()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            base_url: default_model_base_url(),
            api_key: None,
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            input_per_million: default_input_rate(),
            output_per_million: default_output_rate(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            system_prompt: None,
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            base_url: default_calendar_base_url(),
            token_url: default_calendar_token_url(),
            client_id: None,
            client_secret: None,
            refresh_token: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            pricing: PricingConfig::default(),
            agent: AgentConfig::default(),
            calendar: CalendarConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `concierge.toml` in the working directory
    /// (or the path in `CONCIERGE_CONFIG`), then apply env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("CONCIERGE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("concierge.toml"));

        let mut config = Self::load_from(&path)?;

        // Secrets come from the environment when not in the file
        if config.model.api_key.is_none() {
            config.model.api_key = std::env::var("CONCIERGE_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }
        if config.calendar.client_id.is_none() {
            config.calendar.client_id = std::env::var("CONCIERGE_CALENDAR_ID").ok();
        }
        if config.calendar.client_secret.is_none() {
            config.calendar.client_secret = std::env::var("CONCIERGE_CALENDAR_SECRET").ok();
        }
        if config.calendar.refresh_token.is_none() {
            config.calendar.refresh_token = std::env::var("CONCIERGE_CALENDAR_REFRESH").ok();
        }

        // Allow env var to override the model
        if let Ok(model) = std::env::var("CONCIERGE_MODEL") {
            config.model.name = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "model.name must not be empty".into(),
            ));
        }

        if self.agent.max_iterations == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be at least 1".into(),
            ));
        }

        if self.pricing.input_per_million < 0.0 || self.pricing.output_per_million < 0.0 {
            return Err(ConfigError::ValidationError(
                "pricing rates must not be negative".into(),
            ));
        }

        Ok(())
    }

    /// Check if a model API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.model.api_key.is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.agent.max_iterations, 3);
        assert!((config.pricing.input_per_million - 1.25).abs() < f64::EPSILON);
        assert!((config.pricing.output_per_million - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.model.name, config.model.name);
        assert_eq!(back.agent.max_iterations, config.agent.max_iterations);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/concierge.toml")).unwrap();
        assert_eq!(config.model.name, "gpt-5");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[agent]\nmax_iterations = 5").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.model.name, "gpt-5");
    }

    #[test]
    fn zero_iterations_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[agent]\nmax_iterations = 0").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn negative_rate_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pricing]\ninput_per_million = -1.0").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this is not toml {{{{").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
