use thiserror::Error;

const DEFAULT_LINKEDIN_API_URL: &str = "https://ligo.ertiqah.com/api/mcp";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<String>),

    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: String, reason: String },
}

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to every component constructor.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub telegram_bot_token: String,
    pub linkedin_api_key: String,
    pub linkedin_api_url: String,
    pub host: String,
    pub port: u16,
    pub llm_timeout_secs: u64,
    pub enable_telegram: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    /// Every missing credential is reported at once rather than one per restart.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut require = |key: &str| {
            get(key).unwrap_or_else(|| {
                missing.push(key.to_string());
                String::new()
            })
        };

        let anthropic_api_key = require("ANTHROPIC_API_KEY");
        let telegram_bot_token = require("TELEGRAM_BOT_TOKEN");
        let linkedin_api_key = require("LINKEDIN_API_KEY");

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        Ok(Config {
            anthropic_api_key,
            telegram_bot_token,
            linkedin_api_key,
            linkedin_api_url: get("LINKEDIN_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_LINKEDIN_API_URL.to_string()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 5000)?,
            llm_timeout_secs: parse_or("LLM_TIMEOUT_SECS", get("LLM_TIMEOUT_SECS"), 60)?,
            enable_telegram: parse_bool("ENABLE_TELEGRAM", get("ENABLE_TELEGRAM"), true)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => Err(ConfigError::Invalid {
            key: key.to_string(),
            reason: format!("expected a boolean, got '{v}'"),
        }),
    }
}
