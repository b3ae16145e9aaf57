//! Domain allowlist for image source origins.

/// A single allowlist pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DomainPattern {
    /// `*` — any hostname.
    Any,
    /// Exact hostname match.
    Exact(String),
    /// `*.suffix` — plain string-suffix match on `suffix`.
    ///
    /// Not label-boundary aware: `*.example.com` also matches
    /// `evilexample.com`. Kept for compatibility with existing deployments;
    /// tighten to a dot-boundary check before exposing this to untrusted
    /// pattern sources.
    Suffix(String),
}

impl DomainPattern {
    fn parse(pattern: &str) -> Self {
        if pattern == "*" {
            Self::Any
        } else if let Some(suffix) = pattern.strip_prefix("*.") {
            Self::Suffix(suffix.to_string())
        } else {
            Self::Exact(pattern.to_string())
        }
    }

    fn matches(&self, hostname: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(host) => hostname == host,
            Self::Suffix(suffix) => hostname.ends_with(suffix.as_str()),
        }
    }
}

/// Set of hostname patterns permitted as image source origins.
#[derive(Debug, Clone, Default)]
pub struct Allowlist {
    patterns: Vec<DomainPattern>,
}

impl Allowlist {
    /// Parse an allowlist from pattern strings.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| DomainPattern::parse(p.as_ref()))
                .collect(),
        }
    }

    /// True if any pattern matches the hostname.
    pub fn is_allowed(&self, hostname: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(hostname))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_allows_everything() {
        let list = Allowlist::new(["*"]);
        for host in ["example.com", "a.b.c", "localhost"] {
            assert!(list.is_allowed(host));
        }
    }

    #[test]
    fn exact_match_only() {
        let list = Allowlist::new(["example.com"]);
        assert!(list.is_allowed("example.com"));
        assert!(!list.is_allowed("cdn.example.com"));
        assert!(!list.is_allowed("other.com"));
    }

    #[test]
    fn wildcard_suffix() {
        let list = Allowlist::new(["*.example.com"]);
        assert!(list.is_allowed("cdn.example.com"));
        assert!(!list.is_allowed("other.com"));
    }

    #[test]
    fn wildcard_suffix_is_not_label_aware() {
        // Documents the compatibility looseness: no dot boundary enforced.
        let list = Allowlist::new(["*.example.com"]);
        assert!(list.is_allowed("evilexample.com"));
    }

    #[test]
    fn empty_list_rejects() {
        let list = Allowlist::new(Vec::<String>::new());
        assert!(!list.is_allowed("example.com"));
    }

    #[test]
    fn mixed_patterns() {
        let list = Allowlist::new(["example.com", "*.cdn.io"]);
        assert!(list.is_allowed("example.com"));
        assert!(list.is_allowed("img.cdn.io"));
        assert!(!list.is_allowed("example.org"));
    }
}
