//! Host header parsing with memoization.
//!
//! # Responsibilities
//! - Strip the port from a raw host header
//! - Extract the left-most label as the subdomain
//! - Cache parsed results per raw host string
//!
//! # Design Decisions
//! - Parsing is total: empty or odd hosts yield empty/whole-label results
//! - Hostnames are case-insensitive and come out lowercased
//! - The cache is shared across requests (DashMap, no global lock)
//! - The cache has a soft entry limit; exceeding it clears the whole map

use std::sync::Arc;

use dashmap::DashMap;

use crate::observability::metrics;

/// Default maximum number of cached host strings.
pub const DEFAULT_CACHE_LIMIT: usize = 1024;

/// A host header split into its routing-relevant parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHostname {
    /// Host without the `:port` suffix.
    pub clean_hostname: String,
    /// First dot-separated label of `clean_hostname`.
    pub subdomain: String,
}

/// Parse a raw host header.
///
/// `admin.example.com:3000` → `{ clean_hostname: "admin.example.com", subdomain: "admin" }`.
/// Bracketed IPv6 literals keep the brackets and are never split on dots.
/// The result is ASCII-lowercased.
pub fn parse_hostname(raw: &str) -> ParsedHostname {
    let raw = raw.trim().to_ascii_lowercase();
    let raw = raw.as_str();

    if raw.starts_with('[') {
        let clean = match raw.find(']') {
            Some(end) => &raw[..=end],
            None => raw,
        };
        return ParsedHostname {
            clean_hostname: clean.to_string(),
            subdomain: clean.to_string(),
        };
    }

    let clean = raw.split(':').next().unwrap_or_default();
    let subdomain = clean.split('.').next().unwrap_or_default();

    ParsedHostname {
        clean_hostname: clean.to_string(),
        subdomain: subdomain.to_string(),
    }
}

/// Thread-safe memo of parsed host headers.
///
/// Cloning shares the underlying map.
#[derive(Debug, Clone)]
pub struct HostnameCache {
    inner: Arc<DashMap<String, ParsedHostname>>,
    limit: usize,
}

impl HostnameCache {
    /// Create an empty cache holding at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            limit: limit.max(1),
        }
    }

    /// Parse `raw`, serving from the cache when possible.
    pub fn parse(&self, raw: &str) -> ParsedHostname {
        if let Some(hit) = self.inner.get(raw) {
            metrics::record_hostname_cache(true);
            return hit.value().clone();
        }
        metrics::record_hostname_cache(false);

        let parsed = parse_hostname(raw);
        if self.inner.len() >= self.limit {
            tracing::debug!(entries = self.inner.len(), "Hostname cache full, clearing");
            self.inner.clear();
        }
        self.inner.insert(raw.to_string(), parsed.clone());
        parsed
    }

    /// Number of cached hosts.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.clear();
    }
}

impl Default for HostnameCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_LIMIT)
    }
}
