//! Locale set and path-prefix extraction.
//!
//! # Responsibilities
//! - Hold the configured locale codes and default
//! - Split a path into (locale, remainder) when its first segment is a locale
//!
//! # Design Decisions
//! - Segment parser, no regex: only the first non-empty segment is inspected
//! - Membership in the set is authoritative; a length check short-circuits
//!   segments that cannot be a configured code
//! - Trailing slashes in the remainder are preserved

use std::collections::HashSet;

use thiserror::Error;

/// Errors raised while building a [`LocaleSet`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("Locale list is empty")]
    Empty,

    #[error("Duplicate locale found: {0}")]
    Duplicate(String),

    #[error("Invalid locale code: {0:?}")]
    Invalid(String),

    #[error("Default locale {0} is not in the locale list")]
    UnknownDefault(String),
}

/// A path split around its locale prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePath {
    pub locale: Option<String>,
    /// Path without the locale segment; the input path when there is none.
    pub remainder: String,
}

/// Ordered set of supported locale codes plus the default.
#[derive(Debug, Clone)]
pub struct LocaleSet {
    locales: Vec<String>,
    lookup: HashSet<String>,
    default_locale: String,
    max_len: usize,
}

impl LocaleSet {
    pub fn new(
        locales: impl IntoIterator<Item = impl Into<String>>,
        default_locale: impl Into<String>,
    ) -> Result<Self, LocaleError> {
        let locales: Vec<String> = locales.into_iter().map(Into::into).collect();
        let default_locale = default_locale.into();

        if locales.is_empty() {
            return Err(LocaleError::Empty);
        }

        let mut lookup = HashSet::with_capacity(locales.len());
        for code in &locales {
            if code.is_empty() || code.contains('/') {
                return Err(LocaleError::Invalid(code.clone()));
            }
            if !lookup.insert(code.clone()) {
                return Err(LocaleError::Duplicate(code.clone()));
            }
        }

        if !lookup.contains(&default_locale) {
            return Err(LocaleError::UnknownDefault(default_locale));
        }

        let max_len = locales.iter().map(String::len).max().unwrap_or(0);

        Ok(Self {
            locales,
            lookup,
            default_locale,
            max_len,
        })
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn contains(&self, code: &str) -> bool {
        code.len() <= self.max_len && self.lookup.contains(code)
    }

    /// Split `path` around a leading locale segment.
    ///
    /// `/ja/piyo/` → `(Some("ja"), "/piyo/")`, `/ja` → `(Some("ja"), "/")`,
    /// `/about` → `(None, "/about")`.
    pub fn split_path(&self, path: &str) -> LocalePath {
        let trimmed = path.trim_start_matches('/');
        let segment = trimmed.split('/').next().unwrap_or_default();

        if segment.is_empty() || !self.contains(segment) {
            return LocalePath {
                locale: None,
                remainder: path.to_string(),
            };
        }

        let rest = &trimmed[segment.len()..];
        let remainder = if rest.is_empty() {
            "/".to_string()
        } else {
            rest.to_string()
        };

        LocalePath {
            locale: Some(segment.to_string()),
            remainder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> LocaleSet {
        LocaleSet::new(["en", "ja"], "en").unwrap()
    }

    #[test]
    fn test_split_with_locale() {
        let set = locales();

        let split = set.split_path("/ja/piyo/piyora");
        assert_eq!(split.locale.as_deref(), Some("ja"));
        assert_eq!(split.remainder, "/piyo/piyora");

        let split = set.split_path("/ja/piyo/");
        assert_eq!(split.remainder, "/piyo/");

        let split = set.split_path("/en");
        assert_eq!(split.locale.as_deref(), Some("en"));
        assert_eq!(split.remainder, "/");

        let split = set.split_path("/ja/");
        assert_eq!(split.remainder, "/");
    }

    #[test]
    fn test_split_without_locale() {
        let set = locales();
        for path in ["/", "", "/about", "/fr/about", "/japan", "/hoge/ja"] {
            let split = set.split_path(path);
            assert_eq!(split.locale, None, "{path}");
            assert_eq!(split.remainder, path);
        }
    }

    #[test]
    fn test_locale_codes_are_case_sensitive() {
        let set = locales();
        assert!(set.split_path("/JA/x").locale.is_none());
    }

    #[test]
    fn test_region_codes() {
        let set = LocaleSet::new(["en-US", "pt-BR"], "en-US").unwrap();
        let split = set.split_path("/pt-BR/loja");
        assert_eq!(split.locale.as_deref(), Some("pt-BR"));
        assert_eq!(split.remainder, "/loja");
        assert!(!set.contains("a-very-long-segment"));
    }

    #[test]
    fn test_invalid_sets() {
        assert_eq!(LocaleSet::new(Vec::<String>::new(), "en").unwrap_err(), LocaleError::Empty);
        assert_eq!(
            LocaleSet::new(["en", "en"], "en").unwrap_err(),
            LocaleError::Duplicate("en".into())
        );
        assert_eq!(
            LocaleSet::new(["en", "ja"], "fr").unwrap_err(),
            LocaleError::UnknownDefault("fr".into())
        );
        assert_eq!(
            LocaleSet::new(["en", "ja/x"], "en").unwrap_err(),
            LocaleError::Invalid("ja/x".into())
        );
    }

    #[test]
    fn test_accessors() {
        let set = locales();
        assert_eq!(set.locales(), ["en".to_string(), "ja".to_string()]);
        assert_eq!(set.default_locale(), "en");
        assert!(set.contains("ja"));
        assert!(!set.contains("fr"));
    }
}
