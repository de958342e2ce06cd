//! services/forge/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// Gemini's OpenAI-compatible endpoint, used when only a Gemini key is configured.
pub const GEMINI_OPENAI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub contact_address: SocketAddr,
    /// The URL generated pages post their contact form to.
    pub contact_endpoint: String,
    pub preview_address: SocketAddr,
    pub database_url: String,
    pub log_level: Level,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub llm_api_base: Option<String>,
    pub page_model: String,
    pub output_dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Listener Settings ---
        let contact_address = parse_address(&lookup, "CONTACT_ADDRESS", "127.0.0.1:8000")?;
        let contact_endpoint = lookup("CONTACT_ENDPOINT").unwrap_or_else(|| {
            format!("http://localhost:{}/api/contact", contact_address.port())
        });
        let preview_address = parse_address(&lookup, "PREVIEW_ADDRESS", "127.0.0.1:9000")?;

        // --- Storage and Logging ---
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://submissions.db".to_string());

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Text Generation (keys are optional; calls fail later without one) ---
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty());
        let gemini_api_key = lookup("GEMINI_API_KEY").filter(|k| !k.is_empty());
        let gemini_only = openai_api_key.is_none() && gemini_api_key.is_some();

        let llm_api_base = lookup("LLM_API_BASE")
            .or_else(|| gemini_only.then(|| GEMINI_OPENAI_BASE.to_string()));
        let page_model = lookup("PAGE_MODEL").unwrap_or_else(|| {
            if gemini_only {
                "gemini-1.5-flash".to_string()
            } else {
                "gpt-4o-mini".to_string()
            }
        });

        let output_dir = lookup("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            contact_address,
            contact_endpoint,
            preview_address,
            database_url,
            log_level,
            openai_api_key,
            gemini_api_key,
            llm_api_base,
            page_model,
            output_dir,
        })
    }

    /// The key used for text generation; an OpenAI key wins over a Gemini key.
    pub fn llm_api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .or(self.gemini_api_key.as_deref())
    }

    pub fn preview_url(&self) -> String {
        format!("http://localhost:{}/", self.preview_address.port())
    }
}

fn parse_address<F>(lookup: &F, key: &str, default: &str) -> Result<SocketAddr, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_the_fixed_local_addresses() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.contact_address, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(config.contact_endpoint, "http://localhost:8000/api/contact");
        assert_eq!(config.preview_address, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.database_url, "sqlite://submissions.db");
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.page_model, "gpt-4o-mini");
        assert!(config.llm_api_key().is_none());
        assert!(config.llm_api_base.is_none());
        assert_eq!(config.preview_url(), "http://localhost:9000/");
    }

    #[test]
    fn endpoint_follows_the_contact_port() {
        let config = config_from(&[("CONTACT_ADDRESS", "0.0.0.0:8123")]).unwrap();
        assert_eq!(config.contact_endpoint, "http://localhost:8123/api/contact");
    }

    #[test]
    fn gemini_key_alone_selects_gemini_endpoint_and_model() {
        let config = config_from(&[("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.llm_api_key(), Some("g-key"));
        assert_eq!(config.llm_api_base.as_deref(), Some(GEMINI_OPENAI_BASE));
        assert_eq!(config.page_model, "gemini-1.5-flash");
    }

    #[test]
    fn openai_key_takes_precedence() {
        let config =
            config_from(&[("OPENAI_API_KEY", "o-key"), ("GEMINI_API_KEY", "g-key")]).unwrap();
        assert_eq!(config.llm_api_key(), Some("o-key"));
        assert!(config.llm_api_base.is_none());
        assert_eq!(config.page_model, "gpt-4o-mini");
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = config_from(&[("CONTACT_ADDRESS", "not-an-address")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key, _) if key == "CONTACT_ADDRESS"));

        let err = config_from(&[("RUST_LOG", "chatty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref key, _) if key == "RUST_LOG"));
    }
}
