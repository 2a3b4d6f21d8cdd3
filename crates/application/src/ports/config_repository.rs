use async_trait::async_trait;
use sinkdns_domain::{Config, DomainError};

/// Persistence seam for [`Config`], implemented by infrastructure as a JSON
/// file on disk. Thin plumbing — the admin API (an out-of-scope
/// collaborator) is the only caller that mutates it.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    async fn get_config(&self) -> Result<Config, DomainError>;
    async fn save_config(&self, config: &Config) -> Result<(), DomainError>;
}
