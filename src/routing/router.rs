//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the compiled, ordered matcher list
//! - Classify an incoming path into a RouteKind
//! - Fall back to the canonical-site redirect explicitly
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) matcher scan over a handful of matchers
//! - First match wins; order encodes priority

use crate::routing::matcher::{
    AliasMatcher, ExactMatcher, LegacyImageMatcher, Matcher, RouteKind,
};

/// Compiled route table, built once at startup.
#[derive(Debug)]
pub struct RouteTable {
    matchers: Vec<Box<dyn Matcher>>,
}

impl RouteTable {
    /// Build the route table in priority order: landing, health, legacy
    /// image prefix, reverse-CDN aliases.
    pub fn new(aliases: impl IntoIterator<Item = String>) -> Self {
        let matchers: Vec<Box<dyn Matcher>> = vec![
            Box::new(ExactMatcher::new("/", RouteKind::Landing)),
            Box::new(ExactMatcher::new("/health", RouteKind::Health)),
            Box::new(LegacyImageMatcher),
            Box::new(AliasMatcher::new(aliases)),
        ];
        Self { matchers }
    }

    /// Classify a request path. Unmatched paths classify as Fallback.
    pub fn classify(&self, path: &str) -> RouteKind {
        self.matchers
            .iter()
            .find_map(|m| m.match_path(path))
            .unwrap_or(RouteKind::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(["blog".to_string(), "sy".to_string()])
    }

    #[test]
    fn classifies_fixed_routes() {
        let t = table();
        assert_eq!(t.classify("/"), RouteKind::Landing);
        assert_eq!(t.classify("/health"), RouteKind::Health);
    }

    #[test]
    fn classifies_legacy_image_route() {
        let t = table();
        assert_eq!(
            t.classify("/image/example.com/pic.jpg"),
            RouteKind::LegacyImage {
                source: "example.com/pic.jpg".into()
            }
        );
    }

    #[test]
    fn classifies_reverse_cdn_route() {
        let t = table();
        assert_eq!(
            t.classify("/blog/foo/bar.png"),
            RouteKind::ReverseCdn {
                alias: "blog".into(),
                rest: "foo/bar.png".into()
            }
        );
    }

    #[test]
    fn legacy_prefix_outranks_aliases() {
        // An alias named "image" must not shadow the legacy route.
        let t = RouteTable::new(["image".to_string()]);
        assert_eq!(
            t.classify("/image/x.png"),
            RouteKind::LegacyImage { source: "x.png".into() }
        );
    }

    #[test]
    fn unknown_paths_fall_back() {
        let t = table();
        assert_eq!(t.classify("/foo/bar"), RouteKind::Fallback);
        assert_eq!(t.classify("/blog"), RouteKind::Fallback);
        assert_eq!(t.classify("/favicon.ico"), RouteKind::Fallback);
    }
}
