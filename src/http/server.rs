//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the echo handler
//! - Wire up middleware (subrouter, tracing, request ID)
//! - Bind server to listener
//! - Apply configuration updates by swapping the routing snapshot
//! - Stop on the shutdown signal
//!
//! The echo handler stands in for the application: it reports what the
//! router did to each request.

use std::time::Duration;

use axum::{
    body::Body,
    extract::OriginalUri,
    http::Request,
    middleware,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SubrouterConfig;
use crate::http::middleware::{subrouter_middleware, SubrouterState};
use crate::http::request::ResolvedLocale;
use crate::observability::metrics;
use crate::routing::intl::BuildError;

/// Body returned by the echo handler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EchoResponse {
    /// Path as the client sent it.
    pub original_path: String,
    /// Path after rewriting.
    pub path: String,
    pub query: Option<String>,
    pub locale: Option<String>,
}

/// HTTP server fronted by the subrouter middleware.
pub struct HttpServer {
    router: Router,
    state: SubrouterState,
    config: SubrouterConfig,
}

impl HttpServer {
    /// Create a new HTTP server. Fails if the routes or locales are invalid.
    pub fn new(config: SubrouterConfig) -> Result<Self, BuildError> {
        let state = SubrouterState::from_config(&config)?;
        let router = Self::build_router(&config, state.clone());

        Ok(Self {
            router,
            state,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SubrouterConfig, state: SubrouterState) -> Router {
        Router::new()
            .fallback(echo_handler)
            .layer(middleware::from_fn_with_state(state, subrouter_middleware))
            .layer(TimeoutLayer::new(Duration::from_secs(config.listener.request_timeout_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered application, for serving or in-process testing.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Shared routing state (hot-swappable).
    pub fn state(&self) -> SubrouterState {
        self.state.clone()
    }

    /// Get a reference to the config the server was built with.
    pub fn config(&self) -> &SubrouterConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires, applying configuration updates
    /// as they arrive.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<SubrouterConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, routes = self.config.routes.len(), "HTTP server starting");

        let state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                match state.reload(&new_config) {
                    Ok(()) => {
                        metrics::record_config_reload(true);
                        tracing::info!(routes = new_config.routes.len(), "Routing configuration reloaded");
                    }
                    Err(e) => {
                        metrics::record_config_reload(false);
                        tracing::error!(error = %e, "Rejected configuration update. Keeping current routes.");
                    }
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Report the original and rewritten request.
async fn echo_handler(req: Request<Body>) -> Json<EchoResponse> {
    let original_path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    Json(EchoResponse {
        original_path,
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        locale: req
            .extensions()
            .get::<ResolvedLocale>()
            .map(|ResolvedLocale(locale)| locale.clone()),
    })
}
