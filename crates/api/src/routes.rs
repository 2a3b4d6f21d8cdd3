use crate::auth::require_admin_basic_auth;
use crate::handlers;
use crate::state::AppState;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

/// Admin API routes: config read/update, gated by HTTP Basic
/// auth, plus an unauthenticated health probe.
pub fn admin_routes(state: AppState) -> Router {
    let protected = Router::new()
        .route("/config", get(handlers::config::get_config))
        .route("/config", post(handlers::config::update_config))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin_basic_auth));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(protected)
        .with_state(state)
}

/// Metrics routes: unauthenticated `GET /metrics`.
pub fn metrics_routes() -> Router {
    Router::new().route("/metrics", get(handlers::metrics::get_metrics))
}
