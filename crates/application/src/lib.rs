//! Application layer: ports the infrastructure implements, and the config
//! use-cases the admin API drives. The DNS hot path (blocklist, cache,
//! query handler) lives entirely in infrastructure — it has no need for a
//! port/use-case seam, since those pieces are swapped wholesale by the
//! supervisor rather than injected per-call.

pub mod ports;
pub mod use_cases;

pub use ports::{ConfigRepository, UpstreamClient, UpstreamExchange};
pub use use_cases::config::{GetConfigUseCase, UpdateConfigUseCase};
