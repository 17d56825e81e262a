//! HTTP adapter subsystem.
//!
//! # Data Flow
//! ```text
//! Axum request
//!     → request.rs (extract host, path, query, headers → RouteRequest)
//!     → middleware.rs (exclusions, IntlSubrouter::handle, apply decision)
//!         → Rewrite: URI path replaced, locale header + extension set
//!         → Redirect: 307 with Location
//!         → PassThrough: unchanged
//!     → server.rs (echo handler standing in for the application)
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use middleware::{subrouter_middleware, RoutingSnapshot, SubrouterState};
pub use request::{route_request, ResolvedLocale};
pub use server::{EchoResponse, HttpServer};
