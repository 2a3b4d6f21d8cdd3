use crate::routes::{admin_routes, metrics_routes};
use crate::state::AppState;
use std::net::SocketAddr;
use tracing::info;

/// Serves the admin HTTP API on `addr` until the process exits. Its only
/// effect on the DNS core is the restart signal carried in `state.restart_tx`.
pub async fn serve_admin(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    info!(%addr, "admin API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, admin_routes(state)).await
}

/// Serves `GET /metrics` on `addr` until the process exits.
/// The caller is responsible for skipping this entirely when
/// `PrometheusPort == "0"`.
pub async fn serve_metrics(addr: SocketAddr) -> std::io::Result<()> {
    info!(%addr, "metrics endpoint listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, metrics_routes()).await
}
