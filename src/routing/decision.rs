//! Router output.

use serde::Serialize;

/// What to do with one request. Produced once, consumed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RewriteDecision {
    /// Serve the request as it arrived.
    PassThrough,
    /// Serve `path` internally; `locale` is exposed to downstream handlers.
    Rewrite { path: String, locale: Option<String> },
    /// Send the client to `location`.
    Redirect { location: String },
}

impl RewriteDecision {
    /// Label used for metrics and logs.
    pub fn action(&self) -> &'static str {
        match self {
            RewriteDecision::PassThrough => "pass_through",
            RewriteDecision::Rewrite { .. } => "rewrite",
            RewriteDecision::Redirect { .. } => "redirect",
        }
    }
}
