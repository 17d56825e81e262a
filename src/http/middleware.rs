//! Subrouter middleware.
//!
//! Applies a [`RewriteDecision`] to a live request: rewrites the URI in
//! place, answers with a redirect, or lets the request through.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{uri::PathAndQuery, HeaderName, HeaderValue, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::config::schema::SubrouterConfig;
use crate::http::request::{route_request, ResolvedLocale};
use crate::routing::intl::{BuildError, IntlSubrouter};
use crate::routing::matcher::ExclusionList;
use crate::routing::RewriteDecision;

/// Everything the middleware needs, built from one configuration.
#[derive(Debug)]
pub struct RoutingSnapshot {
    pub router: IntlSubrouter,
    pub exclusions: ExclusionList,
    pub locale_header: HeaderName,
}

impl RoutingSnapshot {
    pub fn from_config(config: &SubrouterConfig) -> Result<Self, BuildError> {
        let locale_header = HeaderName::from_bytes(config.i18n.locale_header.as_bytes())
            .map_err(|_| BuildError::HeaderName(config.i18n.locale_header.clone()))?;

        Ok(Self {
            router: IntlSubrouter::from_config(config)?,
            exclusions: ExclusionList::from_config(&config.routing),
            locale_header,
        })
    }
}

/// Shared, hot-swappable middleware state.
#[derive(Clone)]
pub struct SubrouterState {
    snapshot: Arc<ArcSwap<RoutingSnapshot>>,
}

impl SubrouterState {
    pub fn new(snapshot: RoutingSnapshot) -> Self {
        Self {
            snapshot: Arc::new(ArcSwap::from_pointee(snapshot)),
        }
    }

    pub fn from_config(config: &SubrouterConfig) -> Result<Self, BuildError> {
        Ok(Self::new(RoutingSnapshot::from_config(config)?))
    }

    /// Current snapshot. In-flight requests keep the one they loaded.
    pub fn load(&self) -> Arc<RoutingSnapshot> {
        self.snapshot.load_full()
    }

    /// Build a snapshot from `config` and swap it in. On error the current
    /// snapshot stays active.
    pub fn reload(&self, config: &SubrouterConfig) -> Result<(), BuildError> {
        let snapshot = RoutingSnapshot::from_config(config)?;
        self.snapshot.store(Arc::new(snapshot));
        Ok(())
    }
}

/// Middleware function for locale and subdomain rewriting.
pub async fn subrouter_middleware(
    State(state): State<SubrouterState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let snapshot = state.load();

    if snapshot.exclusions.is_excluded(req.uri().path()) {
        return next.run(req).await;
    }

    let route_req = route_request(&req);
    match snapshot.router.handle(&route_req).await {
        RewriteDecision::PassThrough => next.run(req).await,
        RewriteDecision::Redirect { location } => Redirect::temporary(&location).into_response(),
        RewriteDecision::Rewrite { path, locale } => {
            match rewrite_uri(req.uri(), &path) {
                Ok(uri) => *req.uri_mut() = uri,
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Rewrite target is not a valid URI, passing through");
                    return next.run(req).await;
                }
            }

            let header_value = locale.as_deref().and_then(|l| HeaderValue::from_str(l).ok());
            if let Some(locale) = locale {
                req.extensions_mut().insert(ResolvedLocale(locale));
            }
            if let Some(value) = &header_value {
                req.headers_mut().insert(snapshot.locale_header.clone(), value.clone());
            }

            let mut response = next.run(req).await;
            if let Some(value) = header_value {
                response.headers_mut().insert(snapshot.locale_header.clone(), value);
            }
            response
        }
    }
}

/// Replace the path of `uri`, keeping its query.
fn rewrite_uri(uri: &Uri, path: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_uri_keeps_query() {
        let uri: Uri = "/fugara?x=1".parse().unwrap();
        assert_eq!(rewrite_uri(&uri, "/fuga/fugara").unwrap(), "/fuga/fugara?x=1");

        let uri: Uri = "http://fuga.example.com/".parse().unwrap();
        assert_eq!(
            rewrite_uri(&uri, "/fuga/").unwrap().to_string(),
            "http://fuga.example.com/fuga/"
        );
    }

    #[test]
    fn test_reload_swaps_snapshot() {
        let state = SubrouterState::from_config(&SubrouterConfig::default()).unwrap();
        assert!(state.load().router.table().is_empty());

        let mut config = SubrouterConfig::default();
        config.routes.push(crate::config::RouteConfig {
            path_prefix: "/fuga".into(),
            subdomain: Some("fuga".into()),
        });
        state.reload(&config).unwrap();
        assert_eq!(state.load().router.table().len(), 1);

        config.routes.push(config.routes[0].clone());
        assert!(state.reload(&config).is_err());
        assert_eq!(state.load().router.table().len(), 1);
    }
}
