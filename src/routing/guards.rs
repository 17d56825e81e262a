//! Rewrite guards.
//!
//! Both checks run before a rewrite is issued for a resolved route. Either
//! one firing means the request passes through untouched.

use crate::routing::table::Route;

/// The default route's internal prefix must not be reachable directly:
/// `/dashboard/page` on the base domain is served as is, not rewritten.
pub fn blocks_direct_access(path: &str, route: &Route, is_default: bool) -> bool {
    is_default && starts_with_prefix_segment(path, &route.path_prefix)
}

/// The path already carries the route's prefix, so rewriting it again would
/// loop when the middleware sees its own output.
pub fn is_already_rewritten(path: &str, route: &Route) -> bool {
    starts_with_prefix_segment(path, &route.path_prefix) && path != route.path_prefix
}

/// `path` starts with `prefix + "/"`.
fn starts_with_prefix_segment(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}
