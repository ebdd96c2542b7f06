use crate::app_config::{AppConfig, Environment};
use crate::site::Locale;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let dataforseo_auth_token = require("DATAFORSEO_AUTH_TOKEN")?;

    let env = parse_environment(&or_default("DEVSEO_ENV", "development"))?;
    let bind_addr = parse_addr("DEVSEO_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("DEVSEO_LOG_LEVEL", "info");
    let site_url = or_default("DEVSEO_SITE_URL", "http://localhost:3000")
        .trim_end_matches('/')
        .to_string();
    let default_locale = parse_locale(&or_default("DEVSEO_DEFAULT_LOCALE", "en"))?;

    let dataforseo_base_url = or_default("DATAFORSEO_BASE_URL", "https://api.dataforseo.com/");
    let dataforseo_timeout_secs = parse_u64("DATAFORSEO_TIMEOUT_SECS", "60")?;
    let user_agent = or_default("DEVSEO_USER_AGENT", "devseo/0.1 (keyword-research)");
    let rate_limit_per_minute = parse_usize("DEVSEO_RATE_LIMIT_PER_MINUTE", "120")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        site_url,
        default_locale,
        dataforseo_auth_token,
        dataforseo_base_url,
        dataforseo_timeout_secs,
        user_agent,
        rate_limit_per_minute,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DEVSEO_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

fn parse_locale(s: &str) -> Result<Locale, ConfigError> {
    s.parse::<Locale>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "DEVSEO_DEFAULT_LOCALE".to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
