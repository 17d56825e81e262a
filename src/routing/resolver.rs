//! Subdomain → route resolution.
//!
//! # Responsibilities
//! - Match a subdomain against configured routes
//! - Decide when a subdomain counts as the base domain
//! - Fall back to the default route for the base domain
//!
//! # Design Decisions
//! - Exact subdomain match always beats the default route
//! - Base-domain detection is a policy, chosen at construction
//! - Resolution is pure: same input, same answer

use serde::{Deserialize, Serialize};

use crate::routing::table::{Route, RouteTable};

/// How to decide whether an unmatched subdomain is the base domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDomainPolicy {
    /// Only `localhost` and IP literals are the base domain.
    LoopbackOrIp,
    /// Any label that is not a configured subdomain is the base domain.
    /// `app.example.com` reaches the default route even though `app` is not
    /// configured.
    #[default]
    Unconfigured,
}

/// Result of a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'a> {
    pub route: &'a Route,
    pub is_default: bool,
}

/// Resolves subdomains against an immutable [`RouteTable`].
#[derive(Debug, Clone)]
pub struct SubdomainResolver {
    table: RouteTable,
    policy: BaseDomainPolicy,
}

impl SubdomainResolver {
    pub fn new(table: RouteTable, policy: BaseDomainPolicy) -> Self {
        Self { table, policy }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn policy(&self) -> BaseDomainPolicy {
        self.policy
    }

    /// Find the route for `subdomain`, if any.
    pub fn resolve(&self, subdomain: &str) -> Option<Resolution<'_>> {
        if let Some(route) = self.table.get(subdomain) {
            return Some(Resolution {
                route,
                is_default: false,
            });
        }

        let default = self.table.default_route()?;
        if self.is_base_domain(subdomain) {
            return Some(Resolution {
                route: default,
                is_default: true,
            });
        }

        None
    }

    /// True if `subdomain` should be served by the default route.
    pub fn is_base_domain(&self, subdomain: &str) -> bool {
        match self.policy {
            BaseDomainPolicy::LoopbackOrIp => is_loopback_or_ip(subdomain),
            BaseDomainPolicy::Unconfigured => {
                is_loopback_or_ip(subdomain) || !self.table.has_subdomain(subdomain)
            }
        }
    }
}

/// `localhost`, a dotted-numeric label, or a bracketed IPv6 literal.
pub fn is_loopback_or_ip(label: &str) -> bool {
    label == "localhost"
        || (label.starts_with('[') && label.ends_with(']'))
        || (!label.is_empty() && label.bytes().all(|b| b.is_ascii_digit() || b == b'.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(policy: BaseDomainPolicy) -> SubdomainResolver {
        let table = RouteTable::new(vec![
            Route::new("/fuga", "fuga"),
            Route::default_route("/hoge"),
            Route::new("/piyo", "piyo"),
        ])
        .unwrap();
        SubdomainResolver::new(table, policy)
    }

    #[test]
    fn test_configured_subdomain_wins() {
        let fuga = Route::new("/fuga", "fuga");
        let hoge = Route::default_route("/hoge");
        let piyo = Route::new("/piyo", "piyo");
        let orders = [
            vec![fuga.clone(), hoge.clone(), piyo.clone()],
            vec![hoge.clone(), fuga.clone(), piyo.clone()],
            vec![piyo.clone(), fuga.clone(), hoge.clone()],
            vec![hoge.clone(), piyo.clone(), fuga.clone()],
        ];

        for routes in orders {
            for policy in [BaseDomainPolicy::LoopbackOrIp, BaseDomainPolicy::Unconfigured] {
                let r = SubdomainResolver::new(RouteTable::new(routes.clone()).unwrap(), policy);
                let res = r.resolve("fuga").unwrap();
                assert_eq!(res.route.path_prefix, "/fuga");
                assert!(!res.is_default);

                let res = r.resolve("piyo").unwrap();
                assert_eq!(res.route.path_prefix, "/piyo");
                assert!(!res.is_default);
            }
        }
    }

    #[test]
    fn test_loopback_and_ip_use_default() {
        for policy in [BaseDomainPolicy::LoopbackOrIp, BaseDomainPolicy::Unconfigured] {
            let r = resolver(policy);
            for label in ["localhost", "127.0.0.1", "127", "[::1]"] {
                let res = r.resolve(label).unwrap();
                assert_eq!(res.route.path_prefix, "/hoge");
                assert!(res.is_default);
            }
        }
    }

    #[test]
    fn test_unconfigured_policy_routes_unknown_labels_to_default() {
        let r = resolver(BaseDomainPolicy::Unconfigured);
        let res = r.resolve("randomapp").unwrap();
        assert_eq!(res.route.path_prefix, "/hoge");
        assert!(res.is_default);

        assert!(r.resolve("").unwrap().is_default);
    }

    #[test]
    fn test_loopback_policy_passes_unknown_labels() {
        let r = resolver(BaseDomainPolicy::LoopbackOrIp);
        assert!(r.resolve("randomapp").is_none());
        assert!(r.resolve("").is_none());
    }

    #[test]
    fn test_no_default_route() {
        let table = RouteTable::new(vec![Route::new("/fuga", "fuga")]).unwrap();
        let r = SubdomainResolver::new(table, BaseDomainPolicy::Unconfigured);
        assert!(r.resolve("localhost").is_none());
        assert!(r.resolve("other").is_none());
        assert!(r.resolve("fuga").is_some());
    }

    #[test]
    fn test_is_loopback_or_ip() {
        assert!(is_loopback_or_ip("localhost"));
        assert!(is_loopback_or_ip("192.168.0.1"));
        assert!(is_loopback_or_ip("[::1]"));
        assert!(!is_loopback_or_ip(""));
        assert!(!is_loopback_or_ip("app"));
        assert!(!is_loopback_or_ip("1a"));
    }
}
