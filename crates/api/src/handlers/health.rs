/// `GET /health` — unauthenticated liveness probe for the admin API.
pub async fn health_check() -> &'static str {
    "OK"
}
