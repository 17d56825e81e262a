//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::i18n::detector::{LocalePrefix, DEFAULT_COOKIE_NAME};
use crate::routing::hostname::DEFAULT_CACHE_LIMIT;
use crate::routing::resolver::BaseDomainPolicy;
use crate::routing::table::Route;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SubrouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Router behaviour shared by all routes.
    pub routing: RoutingConfig,

    /// Subdomain → path prefix routes, in priority order.
    pub routes: Vec<RouteConfig>,

    /// Locale handling.
    pub i18n: I18nConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds for the demo server.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Router-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Which unmatched subdomains count as the base domain.
    pub base_domain_policy: BaseDomainPolicy,

    /// Maximum number of cached host headers.
    pub hostname_cache_limit: usize,

    /// Path prefixes that bypass the router entirely.
    pub exclude_prefixes: Vec<String>,

    /// Bypass paths whose last segment contains a dot (static files).
    pub exclude_files: bool,

    /// Base domain for cross-subdomain links; derived from the request when unset.
    pub base_domain: Option<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_domain_policy: BaseDomainPolicy::default(),
            hostname_cache_limit: DEFAULT_CACHE_LIMIT,
            exclude_prefixes: ["/api", "/trpc", "/_next", "/_vercel"]
                .into_iter()
                .map(String::from)
                .collect(),
            exclude_files: true,
            base_domain: None,
        }
    }
}

/// A single route.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Internal path prefix (e.g., "/dashboard").
    pub path_prefix: String,

    /// Subdomain that selects this route. Omit for the default route.
    #[serde(default)]
    pub subdomain: Option<String>,
}

impl From<&RouteConfig> for Route {
    fn from(config: &RouteConfig) -> Self {
        Route {
            path_prefix: config.path_prefix.clone(),
            subdomain: config.subdomain.clone(),
        }
    }
}

/// Locale handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Enable locale prefixes and detection.
    pub enabled: bool,

    /// Supported locale codes.
    pub locales: Vec<String>,

    /// Fallback when nothing else matches.
    pub default_locale: String,

    /// When the locale is written into the URL.
    pub locale_prefix: LocalePrefix,

    /// Cookie holding the user's chosen locale.
    pub cookie_name: String,

    /// Header carrying the resolved locale to downstream handlers.
    pub locale_header: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            locales: vec!["en".to_string()],
            default_locale: "en".to_string(),
            locale_prefix: LocalePrefix::default(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            locale_header: "x-locale".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log every routing decision point (recommended for development).
    pub debug: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            debug: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
