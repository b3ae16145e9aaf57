//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the image gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Transformation backend settings.
    pub upstream: UpstreamConfig,

    /// Hostname patterns permitted as image source origins.
    pub allowlist: AllowlistConfig,

    /// Ordered URL rewrite rules, first match wins. Empty means the
    /// built-in rule set.
    pub rewrite: Vec<RewriteRuleConfig>,

    /// Canonical site used by the landing page and the redirect fallback.
    pub site: SiteConfig,
}

impl GatewayConfig {
    /// Rewrite rules to apply, falling back to the built-in set when the
    /// config supplies none.
    pub fn rewrite_rules(&self) -> Vec<RewriteRuleConfig> {
        if self.rewrite.is_empty() {
            RewriteRuleConfig::builtin()
        } else {
            self.rewrite.clone()
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Transformation backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the imgproxy-compatible backend.
    pub base_url: String,

    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total outbound request timeout in seconds.
    pub request_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://imgproxy:8080".to_string(),
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Allowlist configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AllowlistConfig {
    /// Patterns: `*`, an exact hostname, or `*.suffix`.
    pub domains: Vec<String>,
}

impl Default for AllowlistConfig {
    fn default() -> Self {
        Self {
            domains: vec!["*".to_string()],
        }
    }
}

/// One rewrite rule mapping an upstream origin prefix to its public
/// CDN-facing prefix. The alias is the first path segment under the public
/// prefix and doubles as the reverse-CDN route key.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RewriteRuleConfig {
    /// Reverse-CDN path segment (e.g., "blog").
    pub alias: String,

    /// True origin prefix (e.g., "https://ik.imagekit.io/sysport/").
    pub origin_prefix: String,

    /// Public-facing prefix (e.g., "https://cdn.sysports.de/blog/").
    pub public_prefix: String,
}

impl RewriteRuleConfig {
    /// The rule set the service shipped with.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self {
                alias: "blog".to_string(),
                origin_prefix: "https://ik.imagekit.io/sysport/".to_string(),
                public_prefix: "https://cdn.sysports.de/blog/".to_string(),
            },
            Self {
                alias: "sy".to_string(),
                origin_prefix: "https://ny-1s.enzonix.com/bucket-1286-1793/".to_string(),
                public_prefix: "https://cdn.sysports.de/sy/".to_string(),
            },
        ]
    }
}

/// Canonical site configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// URL the landing page and unmatched paths redirect to.
    pub canonical_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            canonical_url: "https://ssangyongsports.eu.org".to_string(),
        }
    }
}
