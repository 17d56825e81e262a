//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router decision points produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields only; no string-formatted log lines in the hot path
//! - Metrics are cheap (atomic increments) and always recorded

pub mod logging;
pub mod metrics;
