use anyhow::{Context, Result};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Application configuration loaded from environment variables.
///
/// Threaded explicitly into the LLM client and app state at startup —
/// nothing reads the environment after `from_env` returns.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenRouter API key. Optional so the service can boot without one;
    /// every provider call checks it and fails fast when it is missing.
    pub openrouter_api_key: Option<String>,
    pub openrouter_base_url: String,
    /// Default model identifier, namespaced the way OpenRouter expects
    /// (e.g. "openai/gpt-4o-mini").
    pub openrouter_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openrouter_api_key: std::env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openrouter_base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            openrouter_model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
