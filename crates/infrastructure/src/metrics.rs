//! The two histograms live under the `gohole` namespace (kept verbatim — it
//! is part of the wire contract the metrics HTTP collaborator exposes, not
//! cosmetic).

use prometheus::{register_histogram_vec, HistogramVec};
use std::sync::LazyLock;

/// `gohole_blacklist_lookup_duration_seconds{bloom_filter, array}`.
pub static BLACKLIST_LOOKUP_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "gohole_blacklist_lookup_duration_seconds",
        "Duration of a domain lookup in the blacklist.",
        &["bloom_filter", "array"],
        vec![
            1e-6, 1.75e-6, 2.5e-6, 3.75e-6, 5e-6, 6.25e-6, 7.5e-6, 8.75e-6, 1e-5,
        ]
    )
    .expect("blacklist_lookup_duration_seconds registers exactly once")
});

/// `gohole_dns_queries_duration_seconds{status, query}`.
pub static DNS_QUERIES_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        "gohole_dns_queries_duration_seconds",
        "Duration of replies to DNS queries.",
        &["status", "query"],
        vec![
            1e-5, 2.5e-5, 5e-5, 7.5e-5, 1e-4, 2.5e-4, 5e-4, 7.5e-4, 1e-3, 2.5e-3, 5e-3, 7.5e-3,
            1e-2, 2.5e-2, 5e-2, 7.5e-2, 1e-1,
        ]
    )
    .expect("dns_queries_duration_seconds registers exactly once")
});

/// Observe a blacklist lookup. `filter_outcome` is `"absent"` or `"maybe"`;
/// `array_outcome` is `"absent"` or `"present"`.
pub fn observe_blacklist_lookup(filter_outcome: &str, array_outcome: &str, seconds: f64) {
    BLACKLIST_LOOKUP_DURATION
        .with_label_values(&[filter_outcome, array_outcome])
        .observe(seconds);
}

/// Observe a completed query. `status` is one of `malformed_query`, `cache`,
/// `block`, `upstream`, `upstream_error`; `query` is the record type string
/// or `"-"` for malformed queries.
pub fn observe_query(status: &str, query: &str, seconds: f64) {
    DNS_QUERIES_DURATION
        .with_label_values(&[status, query])
        .observe(seconds);
}

/// Render the default registry in Prometheus text exposition format, for the
/// `GET /metrics` collaborator.
pub fn encode_text() -> Result<String, prometheus::Error> {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buf = Vec::new();
    encoder.encode(&metric_families, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
