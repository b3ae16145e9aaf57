//! URL rewrite engine.
//!
//! # Data Flow
//! ```text
//! Forward (legacy /image/ route):
//!     source URL
//!     → first rule whose origin_prefix matches
//!     → public_prefix + remainder (verbatim)
//!     → identity when no rule matches
//!
//! Inverse (reverse-CDN route):
//!     /{alias}/{rest}
//!     → rule keyed by alias
//!     → origin_prefix + rest
//!     → None for unknown aliases (mapped to 400 at the boundary)
//! ```
//!
//! # Design Decisions
//! - Rules compiled at startup from config, immutable at runtime
//! - Ordered list, first match wins
//! - Literal prefix matching only, no regex
//! - Identity fallback is intentional: unrecognized upstreams still
//!   resolve, subject to the allowlist check downstream

use std::borrow::Cow;

use crate::config::RewriteRuleConfig;

/// A compiled rewrite rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    /// Reverse-CDN path segment standing in for the origin.
    pub alias: String,

    /// True origin prefix.
    pub origin_prefix: String,

    /// Public-facing prefix the origin is rewritten to.
    pub public_prefix: String,
}

/// Ordered rewrite rule set, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: Vec<RewriteRule>,
}

impl Rewriter {
    /// Compile a rewriter from configuration rules, preserving order.
    pub fn from_config(rules: &[RewriteRuleConfig]) -> Self {
        Self {
            rules: rules
                .iter()
                .map(|r| RewriteRule {
                    alias: r.alias.clone(),
                    origin_prefix: r.origin_prefix.clone(),
                    public_prefix: r.public_prefix.clone(),
                })
                .collect(),
        }
    }

    /// Rewrite a source URL through the first matching rule.
    ///
    /// Returns the input unchanged when no rule matches.
    pub fn rewrite<'a>(&self, source: &'a str) -> Cow<'a, str> {
        for rule in &self.rules {
            if let Some(rest) = source.strip_prefix(&rule.origin_prefix) {
                return Cow::Owned(format!("{}{}", rule.public_prefix, rest));
            }
        }
        Cow::Borrowed(source)
    }

    /// Reconstruct the true origin URL for a reverse-CDN alias.
    ///
    /// Returns `None` when the alias matches no known rule.
    pub fn invert(&self, alias: &str, rest: &str) -> Option<String> {
        self.rules
            .iter()
            .find(|r| r.alias == alias)
            .map(|r| format!("{}{}", r.origin_prefix, rest))
    }

    /// Whether a path segment is a configured reverse-CDN alias.
    pub fn has_alias(&self, segment: &str) -> bool {
        self.rules.iter().any(|r| r.alias == segment)
    }
}
