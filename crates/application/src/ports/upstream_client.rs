use async_trait::async_trait;
use hickory_proto::op::Message;
use sinkdns_domain::DomainError;
use std::time::Duration;

/// A resolved upstream exchange: the upstream's full reply and the measured
/// round-trip time.
pub struct UpstreamExchange {
    pub response: Message,
    pub rtt: Duration,
}

/// Transport-agnostic seam over the upstream DNS resolver: plain UDP or
/// TCP+TLS, selected at construction time by whether a TLS SNI name was
/// configured.
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    async fn exchange(&self, request: &Message) -> Result<UpstreamExchange, DomainError>;
}
