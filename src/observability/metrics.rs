//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_matches_total` (counter): lookups by method and outcome
//! - `router_match_duration_seconds` (histogram): lookup latency
//! - `router_routes` (gauge): routes in the published table
//! - `router_reloads_total` (counter): table reloads by outcome
//!
//! The `method` label is one of the known verbs or `OTHER`; request methods
//! are client-controlled and must not mint new series.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Verb;

const OTHER_METHOD: &str = "OTHER";

/// Outcome label for a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched,
    NotFound,
}

impl MatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOutcome::Matched => "matched",
            MatchOutcome::NotFound => "not_found",
        }
    }
}

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Fold a request method into a bounded label value.
pub fn method_label(method: &str) -> &'static str {
    method
        .parse::<Verb>()
        .map(|verb| verb.as_str())
        .unwrap_or(OTHER_METHOD)
}

pub fn record_match(method: &str, outcome: MatchOutcome, start: Instant) {
    metrics::counter!(
        "router_matches_total",
        "method" => method_label(method),
        "outcome" => outcome.as_str()
    )
    .increment(1);
    metrics::histogram!("router_match_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_table_size(routes: usize) {
    metrics::gauge!("router_routes").set(routes as f64);
}

pub fn record_reload(success: bool) {
    let outcome = if success { "ok" } else { "rejected" };
    metrics::counter!("router_reloads_total", "outcome" => outcome).increment(1);
}
