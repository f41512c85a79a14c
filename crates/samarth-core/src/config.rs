use crate::app_config::{AppConfig, DefaultsSource, Environment};
use crate::ConfigError;

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

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development configuration.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

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

    let env = parse_environment(&or_default("SAMARTH_ENV", "development"))?;

    let bind_addr = parse_addr("SAMARTH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SAMARTH_LOG_LEVEL", "info");
    let defaults_source =
        DefaultsSource::parse(&or_default("SAMARTH_DEFAULTS_SOURCE", "./data/products.json"));
    let state_dir = PathBuf::from(or_default("SAMARTH_STATE_DIR", "./.samarth"));

    let storage_key = or_default("SAMARTH_STORAGE_KEY", "samarth-overseas-products");
    if storage_key.is_empty() || storage_key.contains(['/', '\\']) {
        return Err(ConfigError::InvalidEnvVar {
            var: "SAMARTH_STORAGE_KEY".to_string(),
            reason: "must be a non-empty name without path separators".to_string(),
        });
    }

    let contact_endpoint = optional("SAMARTH_CONTACT_ENDPOINT");
    let contact_email = or_default("SAMARTH_CONTACT_EMAIL", "info@samarthoverseasindia.com");

    let http_timeout_secs = parse_u64("SAMARTH_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SAMARTH_USER_AGENT", "samarth/0.1 (export-catalog)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        defaults_source,
        state_dir,
        storage_key,
        contact_endpoint,
        contact_email,
        http_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SAMARTH_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
