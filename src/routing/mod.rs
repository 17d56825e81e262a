//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (host, path, headers)
//!     → matcher.rs (excluded paths never reach the router)
//!     → intl.rs (locale prefix, or delegate to the locale detector)
//!     → subrouter.rs
//!         → hostname.rs (host → subdomain, cached)
//!         → resolver.rs (subdomain → route via table.rs)
//!         → guards.rs (direct access, already rewritten)
//!     → Return: RewriteDecision
//!
//! Route compilation (at startup):
//!     RouteConfig[]
//!     → table.rs (duplicate checks, subdomain map)
//!     → Freeze as immutable IntlSubrouter
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (segment and prefix checks only)
//! - Deterministic: same input always yields the same decision
//! - Loop-free: a rewrite output fed back in always passes through

pub mod decision;
pub mod guards;
pub mod hostname;
pub mod intl;
pub mod link;
pub mod matcher;
pub mod request;
pub mod resolver;
pub mod subrouter;
pub mod table;

pub use decision::RewriteDecision;
pub use intl::{BuildError, IntlSubrouter, RouterOptions};
pub use request::RouteRequest;
pub use resolver::BaseDomainPolicy;
pub use table::{Route, RouteTable, RouteTableError};
