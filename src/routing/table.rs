//! Route table: subdomain → path prefix.
//!
//! # Responsibilities
//! - Validate route uniqueness (path prefix and subdomain)
//! - Provide O(1) subdomain lookup
//! - Expose the single default (subdomain-less) route
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Duplicates are a construction error, never resolved at runtime
//! - Configuration order is kept for iteration and error reporting

use std::collections::{HashMap, HashSet};

use thiserror::Error;

/// A single rewrite target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Internal path prefix requests are rewritten under (e.g. `/dashboard`).
    pub path_prefix: String,

    /// Subdomain label that selects this route. `None` marks the default route.
    pub subdomain: Option<String>,
}

impl Route {
    /// A route selected by `subdomain`.
    pub fn new(path_prefix: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            subdomain: Some(subdomain.into()),
        }
    }

    /// The default route, used for the base domain.
    pub fn default_route(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            subdomain: None,
        }
    }

    pub fn is_default(&self) -> bool {
        self.subdomain.is_none()
    }

    /// Subdomain label for logs; `"default"` for the default route.
    pub fn label(&self) -> &str {
        self.subdomain.as_deref().unwrap_or("default")
    }
}

/// Errors raised while building a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("Duplicate path found: {0}")]
    DuplicatePath(String),

    /// Carries the subdomain label, or `default` for a second default route.
    #[error("Duplicate subdomain found: {0}")]
    DuplicateSubdomain(String),
}

/// Validated, immutable set of routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_subdomain: HashMap<String, usize>,
    default_index: Option<usize>,
}

impl RouteTable {
    /// Build a table, failing on the first duplicate path prefix or subdomain.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        let mut seen_paths = HashSet::new();
        let mut by_subdomain = HashMap::new();
        let mut default_index = None;

        for (index, route) in routes.iter().enumerate() {
            if !seen_paths.insert(route.path_prefix.clone()) {
                return Err(RouteTableError::DuplicatePath(route.path_prefix.clone()));
            }

            match &route.subdomain {
                Some(subdomain) => {
                    if by_subdomain.insert(subdomain.clone(), index).is_some() {
                        return Err(RouteTableError::DuplicateSubdomain(subdomain.clone()));
                    }
                }
                None => {
                    if default_index.replace(index).is_some() {
                        return Err(RouteTableError::DuplicateSubdomain("default".to_string()));
                    }
                }
            }
        }

        Ok(Self {
            routes,
            by_subdomain,
            default_index,
        })
    }

    /// Look up the non-default route for `subdomain`.
    pub fn get(&self, subdomain: &str) -> Option<&Route> {
        self.by_subdomain.get(subdomain).map(|&i| &self.routes[i])
    }

    /// True if `subdomain` selects a non-default route.
    pub fn has_subdomain(&self, subdomain: &str) -> bool {
        self.by_subdomain.contains_key(subdomain)
    }

    pub fn default_route(&self) -> Option<&Route> {
        self.default_index.map(|i| &self.routes[i])
    }

    /// Routes in configuration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_routes() -> Vec<Route> {
        vec![
            Route::default_route("/hoge"),
            Route::new("/fuga", "fuga"),
            Route::new("/piyo", "piyo"),
        ]
    }

    #[test]
    fn test_build_and_lookup() {
        let table = RouteTable::new(sample_routes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("fuga").unwrap().path_prefix, "/fuga");
        assert_eq!(table.get("piyo").unwrap().path_prefix, "/piyo");
        assert!(table.get("hoge").is_none());
        assert!(table.has_subdomain("fuga"));
        assert!(!table.has_subdomain("default"));
        assert_eq!(table.default_route().unwrap().path_prefix, "/hoge");
        assert_eq!(table.routes()[1].label(), "fuga");
        assert_eq!(table.routes()[0].label(), "default");
    }

    #[test]
    fn test_duplicate_path_fails() {
        let err = RouteTable::new(vec![Route::new("/x", "a"), Route::new("/x", "b")]).unwrap_err();
        assert_eq!(err, RouteTableError::DuplicatePath("/x".into()));
        assert_eq!(err.to_string(), "Duplicate path found: /x");
    }

    #[test]
    fn test_duplicate_subdomain_fails() {
        let err = RouteTable::new(vec![Route::new("/a", "admin"), Route::new("/b", "admin")]).unwrap_err();
        assert_eq!(err, RouteTableError::DuplicateSubdomain("admin".into()));
    }

    #[test]
    fn test_two_default_routes_fail() {
        let err = RouteTable::new(vec![Route::default_route("/a"), Route::default_route("/b")]).unwrap_err();
        assert_eq!(err, RouteTableError::DuplicateSubdomain("default".into()));
        assert_eq!(err.to_string(), "Duplicate subdomain found: default");
    }

    #[test]
    fn test_table_without_default() {
        let table = RouteTable::new(vec![Route::new("/fuga", "fuga")]).unwrap();
        assert!(table.default_route().is_none());
        assert!(!table.is_empty());

        let empty = RouteTable::new(Vec::new()).unwrap();
        assert!(empty.is_empty());
        assert!(empty.default_route().is_none());
    }
}
