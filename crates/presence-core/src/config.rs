use crate::app_config::{AppConfig, Environment, InsightSettings, StoreSettings};
use crate::error::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_SESSION_TABLE: &str = "founder_analyses";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parsing and validation over an arbitrary env-var lookup, so tests can use
/// a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset; `.env` templates often carry `KEY=`.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PRESENCE_ENV", "development"));
    let bind_addr = parse_addr("PRESENCE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("PRESENCE_LOG_LEVEL", "info");

    let insight = InsightSettings {
        api_key: optional("GEMINI_API_KEY"),
        model: or_default("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
        base_url: or_default("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL),
        timeout_secs: parse_u64("PRESENCE_INSIGHT_TIMEOUT_SECS", "60")?,
    };

    let store = StoreSettings {
        url: optional("SUPABASE_URL"),
        anon_key: optional("SUPABASE_ANON_KEY"),
        table: or_default("SUPABASE_TABLE", DEFAULT_SESSION_TABLE),
        timeout_secs: parse_u64("PRESENCE_STORE_TIMEOUT_SECS", "30")?,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        insight,
        store,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
