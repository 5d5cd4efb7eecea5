//! Application configuration loaded from environment variables.
//!
//! The generative language API key is read once at startup and kept in
//! memory for the lifetime of the process.

use std::env;

/// Default Gemini model (the one the itinerary prompt was tuned against).
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Default base URL of the generative language REST API.
pub const DEFAULT_GENERATION_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Model name passed to the generation endpoint
    pub generation_model: String,
    /// Base URL of the generation API (overridable for local fakes)
    pub generation_base_url: String,
    /// Per-request timeout for the generation call
    pub generation_timeout_secs: u64,

    // --- Secrets ---
    /// Generative language API key
    pub gemini_api_key: String,
}

impl Config {
    /// Config for tests only. Never talks to a real endpoint.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            generation_model: DEFAULT_MODEL.to_string(),
            generation_base_url: "http://127.0.0.1:9".to_string(),
            generation_timeout_secs: 5,
            gemini_api_key: "test_api_key".to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?;
        if gemini_api_key.is_empty() {
            return Err(ConfigError::Missing("GEMINI_API_KEY"));
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            generation_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            generation_base_url: env::var("GEMINI_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_GENERATION_BASE_URL.to_string()),
            generation_timeout_secs: match env::var("GENERATION_TIMEOUT_SECS") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::Invalid("GENERATION_TIMEOUT_SECS", raw))?,
                Err(_) => DEFAULT_TIMEOUT_SECS,
            },
            gemini_api_key,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases share process env, so they run in one test.
    #[test]
    fn test_config_from_env() {
        env::set_var("GEMINI_API_KEY", "  test_key \n");
        env::remove_var("GEMINI_MODEL");
        env::remove_var("GENERATION_TIMEOUT_SECS");
        env::set_var("GEMINI_BASE_URL", "http://localhost:9999/v1beta/");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.gemini_api_key, "test_key");
        assert_eq!(config.generation_model, DEFAULT_MODEL);
        assert_eq!(config.generation_base_url, "http://localhost:9999/v1beta");
        assert_eq!(config.generation_timeout_secs, 30);

        env::set_var("GENERATION_TIMEOUT_SECS", "soon");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("GENERATION_TIMEOUT_SECS", _)));

        env::remove_var("GENERATION_TIMEOUT_SECS");
        env::remove_var("GEMINI_BASE_URL");
    }
}
