use async_trait::async_trait;
use hickory_proto::op::Message;
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable};
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use sinkdns_application::{UpstreamClient, UpstreamExchange};
use sinkdns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

/// DNS-over-TLS upstream transport: a TCP connection upgraded
/// to TLS, with the standard 2-byte big-endian length prefix DNS-over-TCP
/// uses (RFC 1035 §4.2.2). A fresh connection is opened per exchange.
pub struct TlsUpstreamClient {
    server_addr: SocketAddr,
    server_name: ServerName<'static>,
    connector: TlsConnector,
    timeout: Duration,
}

impl TlsUpstreamClient {
    pub fn new(server_addr: SocketAddr, tls_server_name: &str, timeout: Duration) -> Result<Self, DomainError> {
        let mut roots = RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        let config = ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth();

        let server_name = ServerName::try_from(tls_server_name.to_string())
            .map_err(|_| DomainError::InvalidDomainName(tls_server_name.to_string()))?;

        Ok(Self {
            server_addr,
            server_name,
            connector: TlsConnector::from(Arc::new(config)),
            timeout,
        })
    }
}

#[async_trait]
impl UpstreamClient for TlsUpstreamClient {
    async fn exchange(&self, request: &Message) -> Result<UpstreamExchange, DomainError> {
        let started = Instant::now();

        let query_bytes = request
            .to_bytes()
            .map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))?;

        let exchange_fut = async {
            let tcp = TcpStream::connect(self.server_addr)
                .await
                .map_err(|e| DomainError::Io(e.to_string()))?;
            let mut tls = self
                .connector
                .connect(self.server_name.clone(), tcp)
                .await
                .map_err(|e| DomainError::Io(e.to_string()))?;

            let len = u16::try_from(query_bytes.len())
                .map_err(|_| DomainError::InvalidDnsMessage("query too large for DNS-over-TCP".into()))?;
            tls.write_all(&len.to_be_bytes())
                .await
                .map_err(|e| DomainError::Io(e.to_string()))?;
            tls.write_all(&query_bytes)
                .await
                .map_err(|e| DomainError::Io(e.to_string()))?;

            let mut len_buf = [0u8; 2];
            tls.read_exact(&mut len_buf)
                .await
                .map_err(|e| DomainError::Io(e.to_string()))?;
            let response_len = u16::from_be_bytes(len_buf) as usize;

            let mut response_buf = vec![0u8; response_len];
            tls.read_exact(&mut response_buf)
                .await
                .map_err(|e| DomainError::Io(e.to_string()))?;

            Message::from_bytes(&response_buf).map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))
        };

        let response = tokio::time::timeout(self.timeout, exchange_fut)
            .await
            .map_err(|_| DomainError::UpstreamTimeout)??;

        let rtt = started.elapsed();
        debug!(server = %self.server_addr, rtt_ms = rtt.as_millis(), "upstream DoT exchange complete");
        Ok(UpstreamExchange { response, rtt })
    }
}
