//! Run metrics for the normalization pipeline.
//!
//! Counters are always recorded through the `metrics` facade; they only leave
//! the process when a Prometheus exporter has been installed.

use std::net::SocketAddr;
use std::sync::Once;
use tracing::{info, warn};

static INIT: Once = Once::new();

/// Install the Prometheus exporter on `addr`. Idempotent.
pub fn init_metrics(addr: SocketAddr) {
    INIT.call_once(|| {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
        match builder.install() {
            Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
            Err(e) => warn!("Failed to install Prometheus exporter: {}", e),
        }
    });
}

/// Metrics for one pipeline run
pub struct PipelineMetrics;

impl PipelineMetrics {
    pub fn record_run(
        records_total: usize,
        records_written: usize,
        records_rejected: usize,
        records_degraded: usize,
        duration_secs: f64,
    ) {
        ::metrics::counter!("jobs_pipeline_runs_total").increment(1);
        ::metrics::counter!("jobs_records_total").increment(records_total as u64);
        ::metrics::counter!("jobs_records_written_total").increment(records_written as u64);
        ::metrics::counter!("jobs_records_rejected_total").increment(records_rejected as u64);
        ::metrics::counter!("jobs_records_degraded_total").increment(records_degraded as u64);
        ::metrics::histogram!("jobs_pipeline_duration_seconds").record(duration_secs);
    }

    /// Count one per-record issue by kind and field
    pub fn record_issue(kind: &'static str, field: String) {
        ::metrics::counter!("jobs_record_issues_total", "kind" => kind, "field" => field)
            .increment(1);
    }
}
