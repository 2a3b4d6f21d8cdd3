mod tls;
mod udp;

pub use tls::TlsUpstreamClient;
pub use udp::UdpUpstreamClient;

use sinkdns_application::UpstreamClient;
use sinkdns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Default per-exchange timeout.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(2);

/// Builds the configured upstream transport: TCP+TLS when a TLS server name
/// is set, plain UDP otherwise.
pub fn build(upstream_addr: SocketAddr, tls_server_name: &str) -> Result<Arc<dyn UpstreamClient>, DomainError> {
    if tls_server_name.is_empty() {
        Ok(Arc::new(UdpUpstreamClient::new(upstream_addr, DEFAULT_UPSTREAM_TIMEOUT)))
    } else {
        Ok(Arc::new(TlsUpstreamClient::new(
            upstream_addr,
            tls_server_name,
            DEFAULT_UPSTREAM_TIMEOUT,
        )?))
    }
}
