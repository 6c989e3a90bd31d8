use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder,
    HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "Total number of HTTP requests",
        &["method", "path", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds",
        &["method", "path"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .unwrap();

    // Trainer Metrics
    pub static ref SCENARIO_VIEWS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "scenario_views_total",
        "Scenario pages rendered, by scenario key",
        &["scenario"]
    )
    .unwrap();

    pub static ref SCENARIO_ROTATIONS_TOTAL: IntCounter = register_int_counter!(
        "scenario_rotations_total",
        "Requests for a new random scenario"
    )
    .unwrap();

    pub static ref ANSWER_SUBMISSIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "answer_submissions_total",
        "Answer sheets submitted, by scenario key",
        &["scenario"]
    )
    .unwrap();

    pub static ref SESSION_INDEX_RESETS_TOTAL: IntCounter = register_int_counter!(
        "session_index_resets_total",
        "Stored scenario indexes that were invalid and reset to 0"
    )
    .unwrap();
}

/// Render all metrics in Prometheus text format
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("Failed to convert metrics to UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        let _ = HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/health", "200"])
            .get();
        let _ = SCENARIO_ROTATIONS_TOTAL.get();
    }

    #[test]
    fn test_render_metrics() {
        SCENARIO_VIEWS_TOTAL
            .with_label_values(&["residential-bravo-smoke"])
            .inc();

        let output = render_metrics().unwrap();
        assert!(output.contains("scenario_views_total"));
        assert!(output.contains("residential-bravo-smoke"));
    }
}
