use axum::http::StatusCode;
use sinkdns_infrastructure::metrics::encode_text;
use tracing::error;

/// `GET /metrics` — Prometheus exposition of the two histograms. Unauthenticated; served on its own port so it can sit behind
/// a different trust boundary than the admin API.
pub async fn get_metrics() -> Result<String, StatusCode> {
    encode_text().map_err(|err| {
        error!(error = %err, "failed to render metrics");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}
