//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define router metrics (decisions, guard hits, cache efficiency, latency)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `subrouter_decisions_total` (counter): decisions by action
//! - `subrouter_guard_hits_total` (counter): pass-throughs by guard
//! - `subrouter_hostname_cache_total` (counter): hostname cache hits/misses
//! - `subrouter_handle_duration_seconds` (histogram): time spent in `handle`
//! - `subrouter_config_reloads_total` (counter): reload attempts by result
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade, a no-op until an exporter
//!   is installed
//! - Labels are static strings only (no paths or hosts, unbounded cardinality)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one router decision and the time it took.
pub fn record_decision(action: &'static str, start: Instant) {
    counter!("subrouter_decisions_total", "action" => action).increment(1);
    histogram!("subrouter_handle_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a pass-through caused by a guard or a missing route.
pub fn record_guard_hit(guard: &'static str) {
    counter!("subrouter_guard_hits_total", "guard" => guard).increment(1);
}

/// Record a hostname cache lookup.
pub fn record_hostname_cache(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!("subrouter_hostname_cache_total", "result" => result).increment(1);
}

/// Record a configuration reload attempt.
pub fn record_config_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    counter!("subrouter_config_reloads_total", "result" => result).increment(1);
}
