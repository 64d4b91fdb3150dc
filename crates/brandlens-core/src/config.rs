//! Application configuration from environment variables.
//!
//! All keys have defaults so `brandlens` runs with an empty environment.
//! The timing constants mirror the documented harvest policy and exist as
//! env vars only so operators can slow a run down further; they are not
//! meant to be tuned for speed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the WebDriver endpoint (chromedriver or a remote grid).
    pub webdriver_url: String,
    /// When false, skip live automation entirely and synthesize the batch.
    pub live: bool,
    /// Advisory country selector; logged but not wired into geo-targeting.
    pub country: String,
    pub log_level: String,
    pub nav_timeout_secs: u64,
    pub quiet_ms: u64,
    pub hard_timeout_secs: u64,
    pub poll_ms: u64,
    pub pacing_min_secs: f64,
    pub pacing_max_secs: f64,
}

/// Load configuration, reading `.env` files first via `dotenvy`.
///
/// # Errors
///
/// Returns [`ConfigError`] if a set variable fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load configuration from the process environment only (no `.env` files).
///
/// # Errors
///
/// Returns [`ConfigError`] if a set variable fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Core parsing logic, decoupled from the real environment so tests can
/// drive it with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => match raw.to_lowercase().as_str() {
                "1" | "true" | "yes" => Ok(true),
                "0" | "false" | "no" => Ok(false),
                other => Err(ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: format!("expected a boolean, got \"{other}\""),
                }),
            },
        }
    };

    Ok(AppConfig {
        webdriver_url: or_default("BRANDLENS_WEBDRIVER_URL", "http://localhost:9515"),
        live: parse_bool("BRANDLENS_LIVE", true)?,
        country: or_default("BRANDLENS_COUNTRY", "US"),
        log_level: or_default("BRANDLENS_LOG_LEVEL", "info"),
        nav_timeout_secs: parse_u64("BRANDLENS_NAV_TIMEOUT_SECS", "30")?,
        quiet_ms: parse_u64("BRANDLENS_QUIET_MS", "3000")?,
        hard_timeout_secs: parse_u64("BRANDLENS_HARD_TIMEOUT_SECS", "50")?,
        poll_ms: parse_u64("BRANDLENS_POLL_MS", "700")?,
        pacing_min_secs: parse_f64("BRANDLENS_PACING_MIN_SECS", "6")?,
        pacing_max_secs: parse_f64("BRANDLENS_PACING_MAX_SECS", "12")?,
    })
}
