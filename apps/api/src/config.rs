use anyhow::{ensure, Context, Result};

use crate::ui::Theme;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub session_ttl_secs: u32,
    pub ui_theme: Theme,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            gemini_model: optional_env("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_api_base: optional_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG", "info"),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            session_ttl_secs: parse_session_ttl("SESSION_TTL_SECS")?,
            ui_theme: optional_env("UI_THEME", "aurora")
                .parse()
                .context("UI_THEME must be one of: aurora, classic, teal")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Whole seconds, at least 1.
fn parse_session_ttl(key: &str) -> Result<u32> {
    let ttl: u32 = parse_env(key, 3600)?;
    ensure!(ttl > 0, "{key} must be at least 1, got 0");
    Ok(ttl)
}

#[cfg(test)]
impl Config {
    /// Config for unit tests: no environment access, points at an unroutable API base.
    pub fn for_tests() -> Self {
        Config {
            google_api_key: "test-key".to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: "http://127.0.0.1:9".to_string(),
            llm_timeout_secs: 5,
            port: 0,
            rust_log: "debug".to_string(),
            max_upload_bytes: 1024 * 1024,
            session_ttl_secs: 3600,
            ui_theme: Theme::Aurora,
        }
    }
}
