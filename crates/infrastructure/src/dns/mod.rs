pub mod block_filter;
pub mod cache;
pub mod handler;
pub mod overrides;
pub mod transport;

pub use handler::QueryHandler;
