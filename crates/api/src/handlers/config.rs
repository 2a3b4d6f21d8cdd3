use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use sinkdns_domain::{Config, ConfigUpdate};
use tracing::{error, info, warn};

/// `GET /config` — the admin API's read contract.
pub async fn get_config(State(state): State<AppState>) -> Result<Json<Config>, StatusCode> {
    state.get_config.execute().await.map(Json).map_err(|err| {
        error!(error = %err, "failed to read config for admin API");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// `POST /config` — applies the narrow admin subset, persists it, then signals the
/// supervisor's restart channel exactly once. A malformed body yields 400
/// with the config left unchanged.
pub async fn update_config(
    State(state): State<AppState>,
    body: Result<Json<ConfigUpdate>, axum::extract::rejection::JsonRejection>,
) -> Result<StatusCode, StatusCode> {
    let Json(update) = body.map_err(|err| {
        warn!(error = %err, "admin API config POST rejected: malformed body");
        StatusCode::BAD_REQUEST
    })?;

    state.update_config.execute(update).await.map_err(|err| {
        error!(error = %err, "failed to persist admin config update");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    // Single-slot channel: a restart already queued is not queued twice.
    match state.restart_tx.try_send(()) {
        Ok(()) => info!("restart signal sent to supervisor"),
        Err(tokio::sync::mpsc::error::TrySendError::Full(())) => {
            info!("restart already pending, not queuing another")
        }
        Err(tokio::sync::mpsc::error::TrySendError::Closed(())) => {
            error!("restart channel closed; supervisor is not listening")
        }
    }

    Ok(StatusCode::OK)
}
