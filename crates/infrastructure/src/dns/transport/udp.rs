use async_trait::async_trait;
use hickory_proto::op::Message;
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable};
use sinkdns_application::{UpstreamClient, UpstreamExchange};
use sinkdns_domain::DomainError;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size this client is prepared to receive.
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// Plain UDP upstream transport. A fresh socket is bound per exchange — no
/// connection pooling; the query volume this sinkhole serves does not
/// justify adding one.
pub struct UdpUpstreamClient {
    server_addr: SocketAddr,
    timeout: Duration,
}

impl UdpUpstreamClient {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
        }
    }
}

#[async_trait]
impl UpstreamClient for UdpUpstreamClient {
    async fn exchange(&self, request: &Message) -> Result<UpstreamExchange, DomainError> {
        let started = Instant::now();

        let query_bytes = request
            .to_bytes()
            .map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))?;

        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            "0.0.0.0:0".parse().unwrap()
        } else {
            "[::]:0".parse().unwrap()
        };

        let exchange_fut = async {
            let socket = UdpSocket::bind(bind_addr)
                .await
                .map_err(|e| DomainError::Io(e.to_string()))?;

            socket
                .send_to(&query_bytes, self.server_addr)
                .await
                .map_err(|e| DomainError::Io(e.to_string()))?;

            let mut buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
            let (len, _from) = socket
                .recv_from(&mut buf)
                .await
                .map_err(|e| DomainError::Io(e.to_string()))?;
            buf.truncate(len);

            Message::from_bytes(&buf).map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))
        };

        let response = tokio::time::timeout(self.timeout, exchange_fut)
            .await
            .map_err(|_| DomainError::UpstreamTimeout)??;

        let rtt = started.elapsed();
        debug!(server = %self.server_addr, rtt_ms = rtt.as_millis(), "upstream UDP exchange complete");
        Ok(UpstreamExchange { response, rtt })
    }
}
