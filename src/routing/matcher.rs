//! Route matching logic.
//!
//! # Responsibilities
//! - Match exact paths (landing page, health)
//! - Match the legacy `/image/` prefix, capturing the source URL
//! - Match reverse-CDN aliases, capturing alias and remainder
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Prefix capture preserves the remainder verbatim, including repeated
//!   slashes, so `/image/https://host/x` captures `https://host/x`
//! - Matchers return the classified route, not just a boolean, so capture
//!   groups stay next to the match decision

use std::collections::HashSet;

/// Classified request route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteKind {
    /// Exact `/`: static informational page.
    Landing,
    /// Exact `/health`: liveness probe.
    Health,
    /// `/image/{source}`: legacy transform route.
    LegacyImage { source: String },
    /// `/{alias}/{rest}`: reverse-CDN route.
    ReverseCdn { alias: String, rest: String },
    /// Anything else: redirect to the canonical site.
    Fallback,
}

/// A single route matcher evaluated against the request path.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the classified route if the path matches this condition.
    fn match_path(&self, path: &str) -> Option<RouteKind>;
}

/// Matches an exact path.
#[derive(Debug)]
pub struct ExactMatcher {
    path: &'static str,
    route: RouteKind,
}

impl ExactMatcher {
    pub fn new(path: &'static str, route: RouteKind) -> Self {
        Self { path, route }
    }
}

impl Matcher for ExactMatcher {
    fn match_path(&self, path: &str) -> Option<RouteKind> {
        (path == self.path).then(|| self.route.clone())
    }
}

/// Matches the legacy `/image/` prefix and captures the source URL.
#[derive(Debug)]
pub struct LegacyImageMatcher;

impl Matcher for LegacyImageMatcher {
    fn match_path(&self, path: &str) -> Option<RouteKind> {
        path.strip_prefix("/image/").map(|source| RouteKind::LegacyImage {
            source: source.to_string(),
        })
    }
}

/// Matches `/{alias}/{rest}` for configured reverse-CDN aliases.
#[derive(Debug)]
pub struct AliasMatcher {
    aliases: HashSet<String>,
}

impl AliasMatcher {
    pub fn new(aliases: impl IntoIterator<Item = String>) -> Self {
        Self {
            aliases: aliases.into_iter().collect(),
        }
    }
}

impl Matcher for AliasMatcher {
    fn match_path(&self, path: &str) -> Option<RouteKind> {
        let trimmed = path.strip_prefix('/')?;
        let (alias, rest) = trimmed.split_once('/')?;
        if !self.aliases.contains(alias) {
            return None;
        }
        Some(RouteKind::ReverseCdn {
            alias: alias.to_string(),
            rest: rest.to_string(),
        })
    }
}
