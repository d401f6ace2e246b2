use std::net::SocketAddr;

use crate::model::Verdict;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: validation runs. Labels: verdict.
pub const VALIDATIONS_TOTAL: &str = "vestry_validations_total";

/// Histogram: full validation latency in seconds (fetch + checks).
pub const VALIDATION_DURATION_SECONDS: &str = "vestry_validation_duration_seconds";

/// Counter: schedule validations skipped on malformed form input.
pub const SCHEDULE_SKIPS_TOTAL: &str = "vestry_schedule_skips_total";

// ── Result-shape metrics ────────────────────────────────────────

/// Counter: conflicts reported across all validations.
pub const CONFLICTS_TOTAL: &str = "vestry_conflicts_total";

/// Counter: alternative slots proposed across all validations.
pub const SUGGESTIONS_TOTAL: &str = "vestry_suggestions_total";

/// Histogram: snapshot fetch latency in seconds.
pub const SNAPSHOT_FETCH_DURATION_SECONDS: &str = "vestry_snapshot_fetch_duration_seconds";

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init(port: Option<u16>) {
    let Some(port) = port else { return };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .expect("failed to install Prometheus metrics exporter");
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
}

/// Map a verdict to a short label for metrics.
pub fn verdict_label(verdict: &Verdict) -> &'static str {
    match verdict {
        Verdict::Allowed => "allowed",
        Verdict::NeedsConfirmation => "needs_confirmation",
        Verdict::Blocked => "blocked",
    }
}
