//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check route shape and uniqueness before the route table is built
//! - Check the locale list and its default
//! - Validate addresses and header names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SubrouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::SubrouterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route path prefix {0:?} must start with '/' and not end with '/'")]
    InvalidPathPrefix(String),

    #[error("route subdomain {0:?} must be a non-empty lowercase label without dots")]
    InvalidSubdomain(String),

    #[error("duplicate route path prefix {0}")]
    DuplicatePath(String),

    #[error("duplicate route subdomain {0}")]
    DuplicateSubdomain(String),

    #[error("i18n.locales must not be empty")]
    NoLocales,

    #[error("invalid locale code {0:?}")]
    InvalidLocale(String),

    #[error("duplicate locale {0}")]
    DuplicateLocale(String),

    #[error("default locale {0} is not in i18n.locales")]
    UnknownDefaultLocale(String),

    #[error("route path prefix {prefix} starts with locale {locale}")]
    PrefixIsLocale { prefix: String, locale: String },

    #[error("invalid locale header name {0:?}")]
    InvalidHeaderName(String),

    #[error("exclude prefix {0:?} must start with '/'")]
    InvalidExcludePrefix(String),

    #[error("invalid {field} address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("routing.hostname_cache_limit must be greater than zero")]
    ZeroCacheLimit,
}

/// Validate `config`, collecting every problem.
pub fn validate_config(config: &SubrouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    validate_routes(config, &mut errors);
    validate_i18n(config, &mut errors);

    for prefix in &config.routing.exclude_prefixes {
        if !prefix.starts_with('/') {
            errors.push(ValidationError::InvalidExcludePrefix(prefix.clone()));
        }
    }

    if config.routing.hostname_cache_limit == 0 {
        errors.push(ValidationError::ZeroCacheLimit);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_routes(config: &SubrouterConfig, errors: &mut Vec<ValidationError>) {
    let mut paths = HashSet::new();
    let mut subdomains = HashSet::new();

    for route in &config.routes {
        let prefix = route.path_prefix.as_str();
        if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
            errors.push(ValidationError::InvalidPathPrefix(route.path_prefix.clone()));
        }
        if !paths.insert(prefix) {
            errors.push(ValidationError::DuplicatePath(route.path_prefix.clone()));
        }

        if let Some(subdomain) = &route.subdomain {
            if subdomain.is_empty()
                || subdomain.contains(['.', ':'])
                || subdomain.bytes().any(|b| b.is_ascii_uppercase())
            {
                errors.push(ValidationError::InvalidSubdomain(subdomain.clone()));
            }
        }
        if !subdomains.insert(route.subdomain.as_deref()) {
            let label = route.subdomain.as_deref().unwrap_or("default");
            errors.push(ValidationError::DuplicateSubdomain(label.to_string()));
        }
    }
}

fn validate_i18n(config: &SubrouterConfig, errors: &mut Vec<ValidationError>) {
    let i18n = &config.i18n;

    if HeaderName::from_bytes(i18n.locale_header.as_bytes()).is_err() {
        errors.push(ValidationError::InvalidHeaderName(i18n.locale_header.clone()));
    }

    if !i18n.enabled {
        return;
    }

    if i18n.locales.is_empty() {
        errors.push(ValidationError::NoLocales);
        return;
    }

    let mut seen = HashSet::new();
    for locale in &i18n.locales {
        if locale.is_empty() || locale.contains('/') {
            errors.push(ValidationError::InvalidLocale(locale.clone()));
        }
        if !seen.insert(locale.as_str()) {
            errors.push(ValidationError::DuplicateLocale(locale.clone()));
        }
    }

    if !seen.contains(i18n.default_locale.as_str()) {
        errors.push(ValidationError::UnknownDefaultLocale(i18n.default_locale.clone()));
    }

    for route in &config.routes {
        let first = route.path_prefix.trim_start_matches('/').split('/').next().unwrap_or_default();
        if !first.is_empty() && seen.contains(first) {
            errors.push(ValidationError::PrefixIsLocale {
                prefix: route.path_prefix.clone(),
                locale: first.to_string(),
            });
        }
    }
}
