//! Configuration loading from disk and environment.
//!
//! The gateway starts from defaults, optionally merges a TOML file, and
//! finally applies environment overrides. The environment contract matches
//! what deployments already set:
//!
//! - `ALLOWED_REMOTE_DOMAINS` — comma-separated allowlist patterns
//! - `IMGPROXY_URL` — transformation backend base URL
//! - `GATEWAY_ENV=development` — local backend default when no explicit
//!   `IMGPROXY_URL` is set

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Backend base URL used when running in development mode.
const DEV_BACKEND_URL: &str = "http://localhost:8888";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: GatewayConfig = toml::from_str(&content)?;

    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build configuration from defaults plus environment overrides.
pub fn load_from_env() -> Result<GatewayConfig, ConfigError> {
    let mut config = GatewayConfig::default();
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(domains) = std::env::var("ALLOWED_REMOTE_DOMAINS") {
        let parsed: Vec<String> = domains
            .split(',')
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect();
        if !parsed.is_empty() {
            config.allowlist.domains = parsed;
        }
    }

    match std::env::var("IMGPROXY_URL") {
        Ok(url) if !url.trim().is_empty() => {
            config.upstream.base_url = url.trim().to_string();
        }
        _ => {
            // Development mode only provides a fallback; an explicit
            // IMGPROXY_URL always wins.
            if std::env::var("GATEWAY_ENV").as_deref() == Ok("development") {
                config.upstream.base_url = DEV_BACKEND_URL.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_validation() {
        let config = GatewayConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn allowlist_env_is_split_and_trimmed() {
        let mut config = GatewayConfig::default();
        std::env::set_var("ALLOWED_REMOTE_DOMAINS", " example.com, *.cdn.io ");
        apply_env_overrides(&mut config);
        std::env::remove_var("ALLOWED_REMOTE_DOMAINS");

        assert_eq!(config.allowlist.domains, vec!["example.com", "*.cdn.io"]);
    }
}
