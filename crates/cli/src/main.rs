//! `sinkdns` — a recursive-style DNS forwarder that blocks, overrides,
//! caches, and otherwise forwards queries to an upstream resolver.

mod bootstrap;
mod supervisor;

use clap::Parser;
use sinkdns_api::AppState;
use sinkdns_application::{ConfigRepository, GetConfigUseCase, UpdateConfigUseCase};
use sinkdns_infrastructure::FileConfigRepository;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

/// The admin web UI/API port has no config field of its own — it is
/// hardcoded.
const ADMIN_API_PORT: u16 = 8080;

#[derive(Parser)]
#[command(name = "sinkdns", about = "A recursive-style DNS sinkhole/forwarder")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = "/etc/sinkdns/config.json")]
    config: PathBuf,

    /// Force debug-level logging regardless of the config file's `Debug` field.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bootstrap::logging::init(cli.debug);

    let mut config = match bootstrap::config::load_config(&cli.config).await {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, path = %cli.config.display(), "fatal: could not load configuration");
            std::process::exit(1);
        }
    };
    if cli.debug {
        config.debug = true;
    }

    let config_repo: Arc<dyn ConfigRepository> = Arc::new(FileConfigRepository::new(cli.config.clone()));
    let (restart_tx, restart_rx) = mpsc::channel(1);

    spawn_metrics_server(&config.prometheus_port)?;
    spawn_admin_api(config_repo.clone(), &config, restart_tx)?;

    supervisor::run(config, config_repo, restart_rx).await
}

/// `PrometheusPort == "0"` disables the metrics server entirely.
fn spawn_metrics_server(prometheus_port: &str) -> anyhow::Result<()> {
    if prometheus_port == "0" {
        info!("metrics server disabled (PrometheusPort=0)");
        return Ok(());
    }

    let addr: SocketAddr = format!("0.0.0.0:{prometheus_port}")
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid PrometheusPort {prometheus_port:?}: {e}"))?;

    tokio::spawn(async move {
        if let Err(err) = sinkdns_api::serve_metrics(addr).await {
            error!(error = %err, "metrics server exited");
        }
    });
    Ok(())
}

fn spawn_admin_api(
    config_repo: Arc<dyn ConfigRepository>,
    config: &sinkdns_domain::Config,
    restart_tx: mpsc::Sender<()>,
) -> anyhow::Result<()> {
    let state = AppState {
        get_config: Arc::new(GetConfigUseCase::new(config_repo.clone())),
        update_config: Arc::new(UpdateConfigUseCase::new(config_repo)),
        admin_usr_hash: config.admin_usr_hash.clone().into(),
        admin_pwd_hash: config.admin_pwd_hash.clone().into(),
        restart_tx,
    };

    let addr: SocketAddr = ([0, 0, 0, 0], ADMIN_API_PORT).into();
    tokio::spawn(async move {
        if let Err(err) = sinkdns_api::serve_admin(addr, state).await {
            error!(error = %err, "admin API server exited");
        }
    });
    Ok(())
}
