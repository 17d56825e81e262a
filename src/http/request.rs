//! Request extraction.
//!
//! # Responsibilities
//! - Extract routing-relevant information (host, path, query, headers)
//! - Carry the resolved locale to downstream handlers
//!
//! # Design Decisions
//! - Host comes from the `Host` header, falling back to the URI authority
//!   (HTTP/2 requests may only carry `:authority`)
//! - The original request is left untouched; the router sees a copy

use axum::http::{header, Request};

use crate::routing::request::RouteRequest;

/// Locale chosen by the router, inserted into request extensions on rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale(pub String);

/// Build the router's view of `req`.
pub fn route_request<B>(req: &Request<B>) -> RouteRequest {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri().authority().map(|a| a.as_str().to_string()));

    RouteRequest {
        host,
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        headers: req.headers().clone(),
    }
}
