//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check rewrite rules are internally consistent (unique aliases,
//!   absolute prefixes)
//! - Check the backend base URL is usable before accepting traffic
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::collections::HashSet;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("upstream base_url `{0}` is not an absolute URL")]
    InvalidBackendUrl(String),

    #[error("rewrite rule {0}: alias must be a single non-empty path segment")]
    InvalidAlias(usize),

    #[error("rewrite rule {0}: duplicate alias `{1}`")]
    DuplicateAlias(usize, String),

    #[error("rewrite rule {0}: `{1}` must be an absolute URL ending in `/`")]
    InvalidPrefix(usize, String),

    #[error("allowlist must contain at least one pattern")]
    EmptyAllowlist,
}

/// Validate a configuration, collecting every failure.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if Url::parse(&config.upstream.base_url).is_err() {
        errors.push(ValidationError::InvalidBackendUrl(
            config.upstream.base_url.clone(),
        ));
    }

    if config.allowlist.domains.is_empty() {
        errors.push(ValidationError::EmptyAllowlist);
    }

    let mut seen = HashSet::new();
    for (i, rule) in config.rewrite_rules().iter().enumerate() {
        if rule.alias.is_empty() || rule.alias.contains('/') {
            errors.push(ValidationError::InvalidAlias(i));
        }
        if !seen.insert(rule.alias.clone()) {
            errors.push(ValidationError::DuplicateAlias(i, rule.alias.clone()));
        }
        for prefix in [&rule.origin_prefix, &rule.public_prefix] {
            if !prefix.ends_with('/') || Url::parse(prefix).is_err() {
                errors.push(ValidationError::InvalidPrefix(i, prefix.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
