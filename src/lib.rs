//! Locale- and subdomain-aware request rewriting.
//!
//! Given a request's host and path, [`IntlSubrouter`] decides whether to pass
//! it through, rewrite it to an internal path (`fuga.example.com/ja/x` →
//! `/ja/fuga/x`), or redirect it to a locale-prefixed URL.

pub mod config;
pub mod http;
pub mod i18n;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::SubrouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{IntlSubrouter, RewriteDecision, Route, RouteRequest, RouteTable};
