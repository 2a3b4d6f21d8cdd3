use crate::ports::ConfigRepository;
use sinkdns_domain::{ConfigUpdate, DomainError};
use std::sync::Arc;
use tracing::info;

/// Applies the admin API's config update and persists the
/// result. The caller (infrastructure's restart-signal sender) is
/// responsible for waking the supervisor afterwards.
pub struct UpdateConfigUseCase {
    repository: Arc<dyn ConfigRepository>,
}

impl UpdateConfigUseCase {
    pub fn new(repository: Arc<dyn ConfigRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, update: ConfigUpdate) -> Result<(), DomainError> {
        let mut config = self.repository.get_config().await?;
        config.apply_admin_update(&update);
        self.repository.save_config(&config).await?;

        info!(
            upstream_dns = %config.upstream_dns,
            sources = config.blocklist_sources.len(),
            "configuration updated via admin API"
        );

        Ok(())
    }
}
