//! Infrastructure layer: the DNS core (bloom filter, blocklist, loader,
//! response cache, override installer, upstream transports, query handler),
//! Prometheus metrics, and the JSON file-backed config repository.

pub mod config_repository;
pub mod dns;
pub mod metrics;

pub use config_repository::FileConfigRepository;
pub use dns::block_filter::{load, BloomFilter, Blocklist};
pub use dns::cache::{CacheKey, CachedResponse, ResponseCache};
pub use dns::transport;
pub use dns::overrides;
pub use dns::QueryHandler;
