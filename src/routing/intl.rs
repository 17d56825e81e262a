//! Composite router: locale prefix + subdomain.
//!
//! # Responsibilities
//! - Detect a locale prefix in the path, or delegate detection
//! - Run the subdomain stage on the locale-free path
//! - Re-attach the locale as the outermost segment of any rewrite
//! - Produce exactly one [`RewriteDecision`] per request
//!
//! # Design Decisions
//! - Detector redirects win outright; subdomain routing is skipped
//! - Locale and subdomain stages exchange values, not headers
//! - Built once from configuration; immutable afterwards

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use url::Url;

use crate::config::schema::SubrouterConfig;
use crate::i18n::detector::{Detection, LocaleDetector, NegotiatingDetector};
use crate::i18n::locale::{LocaleError, LocaleSet};
use crate::observability::metrics;
use crate::routing::decision::RewriteDecision;
use crate::routing::hostname::{HostnameCache, DEFAULT_CACHE_LIMIT};
use crate::routing::request::RouteRequest;
use crate::routing::resolver::{BaseDomainPolicy, SubdomainResolver};
use crate::routing::subrouter::{SubdomainOutcome, SubdomainRouter};
use crate::routing::table::{Route, RouteTable, RouteTableError};

/// Base used to read the path out of relative rewrite targets.
const INTERNAL_BASE: &str = "http://internal.invalid/";

/// Errors raised while building an [`IntlSubrouter`].
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid routes: {0}")]
    Routes(#[from] RouteTableError),

    #[error("Invalid locales: {0}")]
    Locales(#[from] LocaleError),

    #[error("Invalid header name: {0:?}")]
    HeaderName(String),

    #[error("Route prefix {prefix} starts with locale {locale}")]
    PrefixIsLocale { prefix: String, locale: String },
}

/// Construction options.
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    /// Emit a debug event at each decision point.
    pub debug: bool,
    pub policy: BaseDomainPolicy,
    pub hostname_cache_limit: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            debug: false,
            policy: BaseDomainPolicy::default(),
            hostname_cache_limit: DEFAULT_CACHE_LIMIT,
        }
    }
}

/// Locale-aware subdomain router.
pub struct IntlSubrouter {
    subrouter: SubdomainRouter,
    /// `None` disables locale handling entirely.
    locales: Option<LocaleSet>,
    detector: Arc<dyn LocaleDetector>,
    debug: bool,
}

impl std::fmt::Debug for IntlSubrouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntlSubrouter")
            .field("subrouter", &self.subrouter)
            .field("locales", &self.locales)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl IntlSubrouter {
    /// Build a locale-aware router. Fails on duplicate routes, and on a
    /// route prefix whose first segment is a locale: its rewrites would be
    /// read back as locale-prefixed paths and rewritten again.
    pub fn new(
        routes: Vec<Route>,
        locales: LocaleSet,
        detector: Arc<dyn LocaleDetector>,
        options: RouterOptions,
    ) -> Result<Self, BuildError> {
        for route in &routes {
            if let Some(locale) = locales.split_path(&route.path_prefix).locale {
                return Err(BuildError::PrefixIsLocale {
                    prefix: route.path_prefix.clone(),
                    locale,
                });
            }
        }

        Ok(Self {
            subrouter: Self::build_subrouter(routes, options)?,
            locales: Some(locales),
            detector,
            debug: options.debug,
        })
    }

    /// Build a router that only looks at the subdomain.
    pub fn subdomain_only(routes: Vec<Route>, options: RouterOptions) -> Result<Self, BuildError> {
        Ok(Self {
            subrouter: Self::build_subrouter(routes, options)?,
            locales: None,
            detector: Arc::new(crate::i18n::detector::NoopDetector),
            debug: options.debug,
        })
    }

    /// Build from configuration, using the negotiating detector when i18n is
    /// enabled.
    pub fn from_config(config: &SubrouterConfig) -> Result<Self, BuildError> {
        let options = RouterOptions {
            debug: config.observability.debug,
            policy: config.routing.base_domain_policy,
            hostname_cache_limit: config.routing.hostname_cache_limit,
        };
        let routes = config.routes.iter().map(Route::from).collect();

        if !config.i18n.enabled {
            return Self::subdomain_only(routes, options);
        }

        let locales = LocaleSet::new(config.i18n.locales.clone(), config.i18n.default_locale.clone())?;
        let detector = NegotiatingDetector::new(locales.clone(), config.i18n.locale_prefix)
            .with_cookie_name(config.i18n.cookie_name.clone());

        Self::new(routes, locales, Arc::new(detector), options)
    }

    fn build_subrouter(routes: Vec<Route>, options: RouterOptions) -> Result<SubdomainRouter, BuildError> {
        let table = RouteTable::new(routes)?;
        Ok(SubdomainRouter::new(
            SubdomainResolver::new(table, options.policy),
            HostnameCache::new(options.hostname_cache_limit),
            options.debug,
        ))
    }

    pub fn table(&self) -> &RouteTable {
        self.subrouter.resolver().table()
    }

    pub fn locales(&self) -> Option<&LocaleSet> {
        self.locales.as_ref()
    }

    pub fn hostname_cache(&self) -> &HostnameCache {
        self.subrouter.cache()
    }

    /// Decide what to do with `request`.
    pub async fn handle(&self, request: &RouteRequest) -> RewriteDecision {
        let start = Instant::now();
        let decision = self.decide(request).await;

        metrics::record_decision(decision.action(), start);
        if self.debug {
            tracing::debug!(
                host = request.host(),
                path = %request.path,
                decision = ?decision,
                "Routing decision"
            );
        }
        decision
    }

    async fn decide(&self, request: &RouteRequest) -> RewriteDecision {
        let host = request.host();
        let Some(locales) = &self.locales else {
            return self.route_without_locale(host, &request.path);
        };

        let split = locales.split_path(&request.path);
        if let Some(locale) = split.locale {
            if self.debug {
                tracing::debug!(locale = %locale, remainder = %split.remainder, "Path has locale");
            }
            return self.route_with_locale(host, &split.remainder, locale, None);
        }

        if self.debug {
            tracing::debug!(path = %request.path, "No locale in path, delegating to detector");
        }

        match self.detector.detect(request).await {
            Detection::Redirect(location) => {
                if self.debug {
                    tracing::debug!(location = %location, "Detector redirected");
                }
                RewriteDecision::Redirect { location }
            }
            Detection::Rewrite(target) => {
                let target_path = target_path(&target);
                let detected = locales.split_path(&target_path);
                match detected.locale {
                    Some(locale) => {
                        if self.debug {
                            tracing::debug!(locale = %locale, clean_path = %detected.remainder, "Detector chose locale");
                        }
                        self.route_with_locale(host, &detected.remainder, locale, Some(target_path))
                    }
                    None => self.route_without_locale(host, &request.path),
                }
            }
            Detection::Next => {
                if self.debug {
                    tracing::debug!("No detector rewrite, continuing with subdomain routing");
                }
                self.route_without_locale(host, &request.path)
            }
        }
    }

    /// Subdomain stage on a locale-free path; a rewrite is re-prefixed with
    /// `locale`. When the stage passes, `fallback` (the detector's own
    /// rewrite) is served if there is one.
    fn route_with_locale(
        &self,
        host: &str,
        path: &str,
        locale: String,
        fallback: Option<String>,
    ) -> RewriteDecision {
        match self.subrouter.route(host, path) {
            SubdomainOutcome::Rewrite(rewritten) => {
                let path = format!("/{locale}{rewritten}");
                if self.debug {
                    tracing::debug!(target = %path, "Final rewrite with locale");
                }
                RewriteDecision::Rewrite {
                    path,
                    locale: Some(locale),
                }
            }
            SubdomainOutcome::PassThrough(_) => match fallback {
                Some(path) => RewriteDecision::Rewrite {
                    path,
                    locale: Some(locale),
                },
                None => RewriteDecision::PassThrough,
            },
        }
    }

    fn route_without_locale(&self, host: &str, path: &str) -> RewriteDecision {
        match self.subrouter.route(host, path) {
            SubdomainOutcome::Rewrite(path) => RewriteDecision::Rewrite { path, locale: None },
            SubdomainOutcome::PassThrough(_) => RewriteDecision::PassThrough,
        }
    }
}

/// Path component of a rewrite target, which may be a path or absolute URL.
fn target_path(target: &str) -> String {
    Url::parse(INTERNAL_BASE)
        .and_then(|base| base.join(target))
        .map(|url| url.path().to_string())
        .unwrap_or_else(|_| target.split(['?', '#']).next().unwrap_or(target).to_string())
}
