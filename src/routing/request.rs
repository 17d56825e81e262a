//! The router's view of an incoming request.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Routing-relevant parts of one request, independent of any server
/// framework.
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    /// Raw host header, port included.
    pub host: Option<String>,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
}

impl RouteRequest {
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            path: path.into(),
            query: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Add a header. Values that are not valid header text are skipped.
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.append(name, value);
        }
        self
    }

    /// Host header, or `""` when absent.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or_default()
    }

    /// First value of `name` as text.
    pub fn header(&self, name: &HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Value of the cookie `name`, searching every `Cookie` header.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.headers
            .get_all(axum::http::header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// `path` with `?query` appended when present.
    pub fn path_and_query(&self, path: &str) -> String {
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => format!("{path}?{query}"),
            _ => path.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_cookie_lookup() {
        let req = RouteRequest::new("example.com", "/")
            .with_header(header::COOKIE, "theme=dark; NEXT_LOCALE=ja")
            .with_header(header::COOKIE, "other=1");

        assert_eq!(req.cookie("NEXT_LOCALE"), Some("ja"));
        assert_eq!(req.cookie("other"), Some("1"));
        assert_eq!(req.cookie("missing"), None);
    }

    #[test]
    fn test_defaults() {
        let req = RouteRequest::default();
        assert_eq!(req.host(), "");
        assert_eq!(req.header(&header::ACCEPT_LANGUAGE), None);
        assert_eq!(req.path_and_query("/x"), "/x");

        let req = RouteRequest::new("h", "/a").with_query("b=1");
        assert_eq!(req.path_and_query("/en/a"), "/en/a?b=1");
    }
}
