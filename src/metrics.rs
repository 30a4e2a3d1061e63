use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus exporter and register all application metrics.
/// Returns a `PrometheusHandle` whose `render()` method produces the
/// text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // Pre-register counters so they appear even before the first increment.
    counter!("evaluation_passes_total").absolute(0);
    counter!("single_evaluations_total").absolute(0);
    counter!("predictions_evaluated_total").absolute(0);
    counter!("points_awarded_total").absolute(0);
    counter!("evaluation_conflicts_total").absolute(0);

    // Histogram is lazily created on first record; force creation.
    histogram!("evaluation_duration_seconds").record(0.0);

    handle
}
