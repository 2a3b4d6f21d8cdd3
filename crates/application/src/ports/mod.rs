pub mod config_repository;
pub mod upstream_client;

pub use config_repository::ConfigRepository;
pub use upstream_client::{UpstreamClient, UpstreamExchange};
