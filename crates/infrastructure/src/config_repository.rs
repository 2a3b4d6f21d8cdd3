use async_trait::async_trait;
use sinkdns_application::ConfigRepository;
use sinkdns_domain::{Config, DomainError};
use std::path::PathBuf;
use tokio::fs;
use tracing::info;

/// JSON file-backed [`ConfigRepository`]. Applies the
/// recognized environment variables on top of whatever is on disk every time
/// it is read, so the environment always wins over the file.
pub struct FileConfigRepository {
    path: PathBuf,
}

impl FileConfigRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl ConfigRepository for FileConfigRepository {
    async fn get_config(&self) -> Result<Config, DomainError> {
        let mut config = match fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| DomainError::Io(format!("malformed config file {}: {e}", self.path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no config file found, starting from defaults");
                Config::default()
            }
            Err(e) => return Err(DomainError::Io(e.to_string())),
        };

        config.apply_env_overlay();
        Ok(config)
    }

    /// Writes back in a stable, indented JSON form.
    async fn save_config(&self, config: &Config) -> Result<(), DomainError> {
        let contents = serde_json::to_string_pretty(config)
            .map_err(|e| DomainError::Io(format!("failed to serialize config: {e}")))?;
        fs::write(&self.path, contents)
            .await
            .map_err(|e| DomainError::Io(e.to_string()))
    }
}
