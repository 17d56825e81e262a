//! Subdomain-only rewrite stage.
//!
//! # Responsibilities
//! - Parse the host (through the shared cache)
//! - Resolve the subdomain to a route
//! - Apply the direct-access and loop guards
//! - Produce the rewritten path, or the reason for passing through
//!
//! # Design Decisions
//! - Knows nothing about locales; the composite router strips and re-adds them
//! - Returns a value, never mutates the request

use crate::observability::metrics;
use crate::routing::guards::{blocks_direct_access, is_already_rewritten};
use crate::routing::hostname::HostnameCache;
use crate::routing::resolver::SubdomainResolver;

/// Why the subdomain stage left a path alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    NoRoute,
    DirectAccess,
    AlreadyRewritten,
}

impl PassReason {
    pub fn as_str(self) -> &'static str {
        match self {
            PassReason::NoRoute => "no_route",
            PassReason::DirectAccess => "direct_access",
            PassReason::AlreadyRewritten => "already_rewritten",
        }
    }
}

/// Output of the subdomain stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubdomainOutcome {
    PassThrough(PassReason),
    Rewrite(String),
}

/// Subdomain routing without locale awareness.
#[derive(Debug, Clone)]
pub struct SubdomainRouter {
    resolver: SubdomainResolver,
    cache: HostnameCache,
    debug: bool,
}

impl SubdomainRouter {
    pub fn new(resolver: SubdomainResolver, cache: HostnameCache, debug: bool) -> Self {
        Self {
            resolver,
            cache,
            debug,
        }
    }

    pub fn resolver(&self) -> &SubdomainResolver {
        &self.resolver
    }

    pub fn cache(&self) -> &HostnameCache {
        &self.cache
    }

    /// Route `path` for a request carrying `host`.
    pub fn route(&self, host: &str, path: &str) -> SubdomainOutcome {
        let parsed = self.cache.parse(host);
        let subdomain = parsed.subdomain.as_str();

        let Some(resolution) = self.resolver.resolve(subdomain) else {
            return self.pass(PassReason::NoRoute, subdomain, path);
        };
        let route = resolution.route;

        if self.debug {
            tracing::debug!(
                subdomain,
                path,
                route_prefix = %route.path_prefix,
                route_subdomain = route.label(),
                is_default = resolution.is_default,
                "Subdomain resolved"
            );
        }

        if blocks_direct_access(path, route, resolution.is_default) {
            return self.pass(PassReason::DirectAccess, subdomain, path);
        }

        if is_already_rewritten(path, route) {
            return self.pass(PassReason::AlreadyRewritten, subdomain, path);
        }

        let target = format!("{}{}", route.path_prefix, path);
        if self.debug {
            tracing::debug!(path, target = %target, "Subdomain rewrite");
        }
        SubdomainOutcome::Rewrite(target)
    }

    fn pass(&self, reason: PassReason, subdomain: &str, path: &str) -> SubdomainOutcome {
        metrics::record_guard_hit(reason.as_str());
        if self.debug {
            tracing::debug!(subdomain, path, reason = reason.as_str(), "Passing through");
        }
        SubdomainOutcome::PassThrough(reason)
    }
}
