use async_trait::async_trait;
use sinkdns_application::ConfigRepository;
use sinkdns_domain::{Config, DomainError};
use std::sync::Mutex;

pub struct InMemoryConfigRepository {
    config: Mutex<Config>,
}

impl InMemoryConfigRepository {
    pub fn new(config: Config) -> Self {
        Self {
            config: Mutex::new(config),
        }
    }
}

#[async_trait]
impl ConfigRepository for InMemoryConfigRepository {
    async fn get_config(&self) -> Result<Config, DomainError> {
        Ok(self.config.lock().unwrap().clone())
    }

    async fn save_config(&self, config: &Config) -> Result<(), DomainError> {
        *self.config.lock().unwrap() = config.clone();
        Ok(())
    }
}
