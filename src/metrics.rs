use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all relay metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Pre-register counters so they appear even before the first increment.
    counter!("webhooks_received_total").absolute(0);
    counter!("webhook_rejections_total").absolute(0);
    counter!("orders_submitted_total").absolute(0);
    counter!("orders_failed_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("exchange_latency_seconds").record(0.0);

    Ok(handle)
}

/// A handle backed by a recorder that is not installed globally, for tests
/// and embedders that install their own recorder.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
