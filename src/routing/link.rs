//! Cross-subdomain URL building.
//!
//! Used by the view layer to link between tenants: from any page on
//! `fuga.example.com:3000`, a link to subdomain `piyo` becomes
//! `http://piyo.example.com:3000/...`.

use thiserror::Error;
use url::Url;

use crate::routing::resolver::is_loopback_or_ip;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("Current URL has no host: {0}")]
    MissingHost(String),

    #[error("Invalid URL: {0}")]
    Parse(#[from] url::ParseError),
}

/// Base domain (with port) of `current`.
///
/// Loopback and IP hosts are kept whole; hosts with more than two labels
/// keep the last two.
pub fn base_domain(current: &Url) -> Result<String, LinkError> {
    let host = current
        .host_str()
        .ok_or_else(|| LinkError::MissingHost(current.to_string()))?;

    let labels: Vec<&str> = host.split('.').collect();
    let base = if is_loopback_or_ip(host) || labels.len() <= 2 {
        host.to_string()
    } else {
        labels[labels.len() - 2..].join(".")
    };

    Ok(match current.port() {
        Some(port) => format!("{base}:{port}"),
        None => base,
    })
}

/// Build the URL of `href` on `subdomain` (or on the base domain when
/// `subdomain` is `None`), keeping the scheme of `current`.
///
/// `configured_base` overrides base-domain detection.
pub fn subdomain_url(
    current: &Url,
    subdomain: Option<&str>,
    href: &str,
    configured_base: Option<&str>,
) -> Result<Url, LinkError> {
    let base = match configured_base {
        Some(base) => base.to_string(),
        None => base_domain(current)?,
    };

    let host = match subdomain {
        Some(sub) if !sub.is_empty() => format!("{sub}.{base}"),
        _ => base,
    };
    let href = if href.is_empty() { "/" } else { href };

    let origin = Url::parse(&format!("{}://{}", current.scheme(), host))?;
    Ok(origin.join(href)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_base_domain() {
        assert_eq!(base_domain(&url("https://fuga.example.com/")).unwrap(), "example.com");
        assert_eq!(base_domain(&url("http://example.com:3000/")).unwrap(), "example.com:3000");
        assert_eq!(base_domain(&url("http://localhost:3000/x")).unwrap(), "localhost:3000");
        assert_eq!(base_domain(&url("http://127.0.0.1:8080/")).unwrap(), "127.0.0.1:8080");
    }

    #[test]
    fn test_subdomain_url() {
        let current = url("https://fuga.example.com:3000/ja/x");
        assert_eq!(
            subdomain_url(&current, Some("piyo"), "/x", None).unwrap().as_str(),
            "https://piyo.example.com:3000/x"
        );
        assert_eq!(
            subdomain_url(&current, None, "", None).unwrap().as_str(),
            "https://example.com:3000/"
        );
    }

    #[test]
    fn test_configured_base_wins() {
        let current = url("http://localhost:3000/");
        assert_eq!(
            subdomain_url(&current, Some("fuga"), "/a?b=1", Some("lvh.me:3000")).unwrap().as_str(),
            "http://fuga.lvh.me:3000/a?b=1"
        );
    }

    #[test]
    fn test_missing_host() {
        let current = url("mailto:user@example.com");
        assert!(matches!(
            subdomain_url(&current, Some("a"), "/", None),
            Err(LinkError::MissingHost(_))
        ));
    }
}
