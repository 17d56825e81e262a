//! Request path exclusion.
//!
//! # Responsibilities
//! - Decide which requests reach the router at all
//! - Skip API, build-asset and static-file paths
//!
//! # Design Decisions
//! - Prefix matching is segment-aware (`/api` matches `/api/x`, not `/apis`)
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching

use crate::config::schema::RoutingConfig;

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a path prefix on segment boundaries.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
    prefix: String,
}

impl PrefixMatcher {
    /// Create a new prefix matcher. A trailing slash is ignored.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix: String = prefix.into();
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }
}

impl Matcher for PrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(&self.prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

/// Matches paths whose last segment looks like a file (`favicon.ico`).
#[derive(Debug, Clone, Default)]
pub struct FileExtensionMatcher;

impl Matcher for FileExtensionMatcher {
    fn matches(&self, path: &str) -> bool {
        path.rsplit('/').next().is_some_and(|segment| segment.contains('.'))
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug, Default)]
pub struct ExclusionList {
    matchers: Vec<Box<dyn Matcher>>,
}

impl ExclusionList {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }

    /// Build from the routing configuration.
    pub fn from_config(config: &RoutingConfig) -> Self {
        let mut matchers: Vec<Box<dyn Matcher>> = config
            .exclude_prefixes
            .iter()
            .map(|p| Box::new(PrefixMatcher::new(p.as_str())) as Box<dyn Matcher>)
            .collect();

        if config.exclude_files {
            matchers.push(Box::new(FileExtensionMatcher));
        }

        Self::new(matchers)
    }

    /// True if the router should not see this path.
    pub fn is_excluded(&self, path: &str) -> bool {
        // Any matcher may exclude (OR)
        self.matchers.iter().any(|m| m.matches(path))
    }
}
