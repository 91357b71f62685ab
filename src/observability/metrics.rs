//! Metrics collection and exposition.
//!
//! # Metrics
//! - `portal_route_resolutions_total` (counter): lookups by outcome and segment
//! - `portal_bootstrap_attempts_total` (counter): database bootstrap by outcome

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Segment;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a path lookup. `segment` is `None` on a miss.
pub fn record_resolution(segment: Option<Segment>) {
    let (outcome, segment) = match segment {
        Some(segment) => ("found", segment.as_str()),
        None => ("not_found", "none"),
    };
    ::metrics::counter!(
        "portal_route_resolutions_total",
        "outcome" => outcome,
        "segment" => segment
    )
    .increment(1);
}

/// Record a database bootstrap attempt.
pub fn record_bootstrap(success: bool) {
    let outcome = if success { "success" } else { "failure" };
    ::metrics::counter!("portal_bootstrap_attempts_total", "outcome" => outcome).increment(1);
}
