use std::net::SocketAddr;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: full-list fetches issued against the repository.
pub const FETCHES_TOTAL: &str = "venuesync_fetches_total";

/// Counter: full-list fetches that failed.
pub const FETCH_ERRORS_TOTAL: &str = "venuesync_fetch_errors_total";

/// Counter: single-branch mutations dispatched (enable/disable/update).
pub const MUTATIONS_TOTAL: &str = "venuesync_mutations_total";

/// Counter: single-branch mutations that failed.
pub const MUTATION_ERRORS_TOTAL: &str = "venuesync_mutation_errors_total";

/// Histogram: ids per bulk operation.
pub const BULK_BATCH_SIZE: &str = "venuesync_bulk_batch_size";

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
