use anyhow::Context;
use sinkdns_application::ConfigRepository;
use sinkdns_domain::Config;
use sinkdns_infrastructure::FileConfigRepository;
use std::path::Path;
use tracing::info;

/// Loads the startup configuration.
///
/// Unlike [`FileConfigRepository`]'s steady-state behavior — which defaults
/// a missing file so a supervisor restart never fails just because the
/// admin API hasn't written one yet — a missing file at *startup* is the
/// unrecoverable error ("Fatal config-file-not-found → non-zero exit").
pub async fn load_config(path: &Path) -> anyhow::Result<Config> {
    tokio::fs::metadata(path)
        .await
        .with_context(|| format!("config file not found: {}", path.display()))?;

    let repo = FileConfigRepository::new(path.to_path_buf());
    let config = repo.get_config().await.context("failed to parse config file")?;

    info!(
        path = %path.display(),
        dns_port = %config.dns_port,
        upstream_dns = %config.upstream_dns,
        sources = config.blocklist_sources.len(),
        "configuration loaded"
    );

    Ok(config)
}
