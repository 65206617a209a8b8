// =============================================================================
// METRICS MODULE
// =============================================================================
// Prometheus metrics for the gateway, scraped from GET /metrics.
//
// Without an installed recorder (unit tests, the kiosk) every macro below is
// a no-op.
// =============================================================================

use anyhow::Result;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::models::Provenance;

/// Labels: method, endpoint, status
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

/// Labels: method, endpoint
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Labels: source (live/demo/fallback)
pub const WEATHER_FETCHES_TOTAL: &str = "weather_fetches_total";

pub const ROOM_ENVIRONMENT_READINGS_TOTAL: &str = "room_environment_readings_total";

/// Installs the global Prometheus recorder and returns its render handle.
pub fn setup_metrics() -> Result<PrometheusHandle> {
    // Mostly in-memory answers; the long tail is the weather provider
    let latency_buckets = &[
        0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(HTTP_REQUEST_DURATION_SECONDS.to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    describe_counter!(HTTP_REQUESTS_TOTAL, "Total number of HTTP requests received");
    describe_histogram!(HTTP_REQUEST_DURATION_SECONDS, "HTTP request latency in seconds");
    describe_counter!(
        WEATHER_FETCHES_TOTAL,
        "Weather snapshots served, by source (live, demo, fallback)"
    );
    describe_counter!(
        ROOM_ENVIRONMENT_READINGS_TOTAL,
        "Simulated room environment readings served"
    );

    Ok(handle)
}

/// Handle that is not installed globally. Renders whatever was recorded
/// through it, which in tests is nothing.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

pub fn record_http_request(method: &str, endpoint: &str, status: u16, duration_secs: f64) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .record(duration_secs);
}

pub fn record_weather_fetch(source: Provenance) {
    let source = match source {
        Provenance::Live => "live",
        Provenance::Demo => "demo",
        Provenance::Fallback => "fallback",
    };
    counter!(WEATHER_FETCHES_TOTAL, "source" => source).increment(1);
}

pub fn record_environment_reading() {
    counter!(ROOM_ENVIRONMENT_READINGS_TOTAL).increment(1);
}
