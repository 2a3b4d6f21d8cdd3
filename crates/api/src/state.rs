use sinkdns_application::{GetConfigUseCase, UpdateConfigUseCase};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Shared state for the admin HTTP API.
///
/// `restart_tx` is the supervisor's single-slot restart channel: a successful `POST /config` sends on it exactly once. The
/// channel has capacity 1, matching the "single-slot" contract — a restart
/// already pending when another POST lands is not queued twice.
#[derive(Clone)]
pub struct AppState {
    pub get_config: Arc<GetConfigUseCase>,
    pub update_config: Arc<UpdateConfigUseCase>,
    pub admin_usr_hash: Arc<str>,
    pub admin_pwd_hash: Arc<str>,
    pub restart_tx: mpsc::Sender<()>,
}
