//! Locale detection for paths without a locale prefix.
//!
//! # Responsibilities
//! - Define the detector interface the composite router delegates to
//! - Negotiate a locale from cookie, `Accept-Language`, or default
//! - Express the outcome as redirect, rewrite, or nothing
//!
//! # Design Decisions
//! - Detectors are total: they always return a [`Detection`]
//! - The outcome is a plain value, never a response header
//! - Negotiation order: cookie, then `Accept-Language`, then default

use async_trait::async_trait;
use axum::http::header::ACCEPT_LANGUAGE;
use serde::{Deserialize, Serialize};

use crate::i18n::locale::LocaleSet;
use crate::routing::request::RouteRequest;

/// Cookie consulted first during negotiation.
pub const DEFAULT_COOKIE_NAME: &str = "NEXT_LOCALE";

/// Outcome of locale detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// No locale decision; continue with the original path.
    Next,
    /// Serve the request under this target (path or absolute URL) whose
    /// first segment is the detected locale.
    Rewrite(String),
    /// Send the client elsewhere. Returned to the client verbatim.
    Redirect(String),
}

/// Locale-detection collaborator.
#[async_trait]
pub trait LocaleDetector: Send + Sync {
    async fn detect(&self, request: &RouteRequest) -> Detection;
}

/// Never detects anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDetector;

#[async_trait]
impl LocaleDetector for NoopDetector {
    async fn detect(&self, _request: &RouteRequest) -> Detection {
        Detection::Next
    }
}

#[async_trait]
impl<F> LocaleDetector for F
where
    F: Fn(&RouteRequest) -> Detection + Send + Sync,
{
    async fn detect(&self, request: &RouteRequest) -> Detection {
        self(request)
    }
}

/// When a locale prefix is written into the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalePrefix {
    /// Every locale is visible in the URL; unprefixed paths redirect.
    Always,
    /// The default locale is served unprefixed (internal rewrite); others redirect.
    #[default]
    AsNeeded,
    /// The locale never appears in the URL; always an internal rewrite.
    Never,
}

/// Cookie / `Accept-Language` negotiating detector.
#[derive(Debug, Clone)]
pub struct NegotiatingDetector {
    locales: LocaleSet,
    prefix: LocalePrefix,
    cookie_name: String,
}

impl NegotiatingDetector {
    pub fn new(locales: LocaleSet, prefix: LocalePrefix) -> Self {
        Self {
            locales,
            prefix,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        }
    }

    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = cookie_name.into();
        self
    }

    /// Pick the locale for `request`.
    pub fn negotiate(&self, request: &RouteRequest) -> &str {
        if let Some(locale) = request
            .cookie(&self.cookie_name)
            .and_then(|value| self.configured(value))
        {
            return locale;
        }

        request
            .header(&ACCEPT_LANGUAGE)
            .and_then(|header| self.from_accept_language(header))
            .unwrap_or_else(|| self.locales.default_locale())
    }

    fn configured(&self, code: &str) -> Option<&str> {
        self.locales
            .locales()
            .iter()
            .find(|l| l.as_str() == code)
            .map(String::as_str)
    }

    /// Walk the header's tags in quality order. Each tag tries an exact
    /// match, then a primary-subtag match (`ja-JP` selects `ja`, `en`
    /// selects `en-US`), before the next tag is considered.
    fn from_accept_language(&self, header: &str) -> Option<&str> {
        let locales = self.locales.locales();

        accept_language::parse(header).iter().find_map(|tag| {
            let primary = primary_subtag(tag);
            locales
                .iter()
                .find(|l| l.eq_ignore_ascii_case(tag))
                .or_else(|| {
                    locales
                        .iter()
                        .find(|l| primary_subtag(l).eq_ignore_ascii_case(primary))
                })
                .map(String::as_str)
        })
    }
}

fn primary_subtag(tag: &str) -> &str {
    tag.split(['-', '_']).next().unwrap_or(tag)
}

#[async_trait]
impl LocaleDetector for NegotiatingDetector {
    async fn detect(&self, request: &RouteRequest) -> Detection {
        if self.locales.split_path(&request.path).locale.is_some() {
            return Detection::Next;
        }

        let locale = self.negotiate(request);
        let redirect = || Detection::Redirect(request.path_and_query(&prefixed(locale, &request.path, false)));
        let rewrite = || Detection::Rewrite(prefixed(locale, &request.path, true));

        match self.prefix {
            LocalePrefix::Always => redirect(),
            LocalePrefix::AsNeeded if locale == self.locales.default_locale() => rewrite(),
            LocalePrefix::AsNeeded => redirect(),
            LocalePrefix::Never => rewrite(),
        }
    }
}

/// `/about` → `/ja/about`. The root maps to `/ja` for redirects and `/ja/`
/// for rewrites.
fn prefixed(locale: &str, path: &str, rewrite: bool) -> String {
    match path {
        "" | "/" if rewrite => format!("/{locale}/"),
        "" | "/" => format!("/{locale}"),
        _ => format!("/{locale}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    fn detector(prefix: LocalePrefix) -> NegotiatingDetector {
        NegotiatingDetector::new(LocaleSet::new(["en", "ja"], "en").unwrap(), prefix)
    }

    #[test]
    fn test_negotiation_order() {
        let d = detector(LocalePrefix::Always);

        let req = RouteRequest::new("example.com", "/");
        assert_eq!(d.negotiate(&req), "en");

        let req = RouteRequest::new("example.com", "/").with_header(ACCEPT_LANGUAGE, "ja-JP,ja;q=0.9,en;q=0.8");
        assert_eq!(d.negotiate(&req), "ja");

        let req = RouteRequest::new("example.com", "/")
            .with_header(ACCEPT_LANGUAGE, "ja")
            .with_header(COOKIE, "NEXT_LOCALE=en");
        assert_eq!(d.negotiate(&req), "en");

        let req = RouteRequest::new("example.com", "/")
            .with_header(ACCEPT_LANGUAGE, "ja")
            .with_header(COOKIE, "NEXT_LOCALE=fr");
        assert_eq!(d.negotiate(&req), "ja");
    }

    #[test]
    fn test_primary_subtag_fallback() {
        let d = detector(LocalePrefix::Always);
        let req = RouteRequest::new("example.com", "/").with_header(ACCEPT_LANGUAGE, "fr-FR,ja-JP;q=0.5");
        assert_eq!(d.negotiate(&req), "ja");

        let req = RouteRequest::new("example.com", "/").with_header(ACCEPT_LANGUAGE, "fr-FR,de;q=0.5");
        assert_eq!(d.negotiate(&req), "en");
    }

    #[test]
    fn test_accept_language_priority_order() {
        let d = detector(LocalePrefix::Always);

        for header in ["ja-JP,en;q=0.5", "de-DE,ja-JP;q=0.9,en;q=0.5", "JA,en;q=0.5", "ja-jp"] {
            let req = RouteRequest::new("example.com", "/").with_header(ACCEPT_LANGUAGE, header);
            assert_eq!(d.negotiate(&req), "ja", "{header}");
        }

        let req = RouteRequest::new("example.com", "/").with_header(ACCEPT_LANGUAGE, "en-GB,ja;q=0.9");
        assert_eq!(d.negotiate(&req), "en");
    }

    #[test]
    fn test_region_locales_match_case_insensitively() {
        let d = NegotiatingDetector::new(LocaleSet::new(["en-US", "pt-BR"], "en-US").unwrap(), LocalePrefix::Always);

        let req = RouteRequest::new("example.com", "/").with_header(ACCEPT_LANGUAGE, "PT-br,en-US;q=0.5");
        assert_eq!(d.negotiate(&req), "pt-BR");

        let req = RouteRequest::new("example.com", "/").with_header(ACCEPT_LANGUAGE, "pt;q=0.4,en;q=0.9");
        assert_eq!(d.negotiate(&req), "en-US");
    }

    #[test]
    fn test_custom_cookie_name() {
        let d = detector(LocalePrefix::Always).with_cookie_name("lang");
        let req = RouteRequest::new("example.com", "/").with_header(COOKIE, "lang=ja");
        assert_eq!(d.negotiate(&req), "ja");
    }

    #[tokio::test]
    async fn test_always_redirects() {
        let d = detector(LocalePrefix::Always);
        let req = RouteRequest::new("example.com", "/about").with_query("a=1");
        assert_eq!(d.detect(&req).await, Detection::Redirect("/en/about?a=1".into()));

        let req = RouteRequest::new("example.com", "/");
        assert_eq!(d.detect(&req).await, Detection::Redirect("/en".into()));
    }

    #[tokio::test]
    async fn test_as_needed() {
        let d = detector(LocalePrefix::AsNeeded);

        let req = RouteRequest::new("example.com", "/");
        assert_eq!(d.detect(&req).await, Detection::Rewrite("/en/".into()));

        let req = RouteRequest::new("example.com", "/about").with_header(ACCEPT_LANGUAGE, "ja");
        assert_eq!(d.detect(&req).await, Detection::Redirect("/ja/about".into()));
    }

    #[tokio::test]
    async fn test_never_rewrites() {
        let d = detector(LocalePrefix::Never);
        let req = RouteRequest::new("example.com", "/").with_header(ACCEPT_LANGUAGE, "ja");
        assert_eq!(d.detect(&req).await, Detection::Rewrite("/ja/".into()));
    }

    #[tokio::test]
    async fn test_prefixed_path_is_left_alone() {
        let d = detector(LocalePrefix::Always);
        let req = RouteRequest::new("example.com", "/ja/about");
        assert_eq!(d.detect(&req).await, Detection::Next);
    }

    #[tokio::test]
    async fn test_closure_and_noop_detectors() {
        let req = RouteRequest::new("example.com", "/");
        assert_eq!(NoopDetector.detect(&req).await, Detection::Next);

        let closure = |r: &RouteRequest| Detection::Rewrite(format!("/ja{}", r.path));
        assert_eq!(closure.detect(&req).await, Detection::Rewrite("/ja/".into()));
    }
}
