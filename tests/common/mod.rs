//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response, StatusCode},
    Router,
};
use subrouter::config::{RouteConfig, SubrouterConfig};
use subrouter::http::EchoResponse;
use tower::ServiceExt;

/// Routes used throughout the tests: `/hoge` as the default, `fuga` and
/// `piyo` as tenants.
pub fn tenant_config() -> SubrouterConfig {
    let mut config = SubrouterConfig::default();
    config.routes = vec![
        route("/hoge", None),
        route("/fuga", Some("fuga")),
        route("/piyo", Some("piyo")),
    ];
    config
}

/// [`tenant_config`] with `en` and `ja` enabled, `en` as the default.
pub fn i18n_config() -> SubrouterConfig {
    let mut config = tenant_config();
    config.i18n.enabled = true;
    config.i18n.locales = vec!["en".into(), "ja".into()];
    config.i18n.default_locale = "en".into();
    config
}

pub fn route(path_prefix: &str, subdomain: Option<&str>) -> RouteConfig {
    RouteConfig {
        path_prefix: path_prefix.into(),
        subdomain: subdomain.map(Into::into),
    }
}

pub fn get(host: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("host", host)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

/// Send `req` and decode the echo handler's body.
pub async fn echo(app: &Router, req: Request<Body>) -> EchoResponse {
    let response = send(app, req).await;
    assert_eq!(response.status(), StatusCode::OK);
    read_json(response).await
}

pub async fn read_json(response: Response<Body>) -> EchoResponse {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
