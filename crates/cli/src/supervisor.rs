use anyhow::Context;
use sinkdns_application::ConfigRepository;
use sinkdns_domain::Config;
use sinkdns_infrastructure::dns::block_filter;
use sinkdns_infrastructure::dns::{overrides, transport};
use sinkdns_infrastructure::{QueryHandler, ResponseCache};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{error, info};

/// The restart-channel state machine:
/// `RUNNING(listener, blocklist, cache) → DRAINING → REBUILDING → RUNNING'`.
///
/// Each iteration rebuilds the blocklist, cache, overrides, upstream client,
/// and query handler from scratch, binds a fresh UDP listener, and serves
/// until a restart signal arrives. The old blocklist and cache become
/// unreachable once the iteration's `Arc`s are dropped; nothing beyond the
/// running listener task is carried forward.
pub async fn run(
    initial_config: Config,
    config_repo: Arc<dyn ConfigRepository>,
    mut restart_rx: mpsc::Receiver<()>,
) -> anyhow::Result<()> {
    let mut config = initial_config;

    loop {
        let blocklist = Arc::new(block_filter::load(&config.blocklist_sources).await);

        let cache = Arc::new(ResponseCache::new());
        overrides::install(&cache, &config.overrides);
        info!(overrides_installed = cache.item_count(), "overrides installed");

        let upstream_addr: SocketAddr = config
            .upstream_dns
            .parse()
            .with_context(|| format!("invalid upstream DNS address: {}", config.upstream_dns))?;
        let upstream = transport::build(upstream_addr, &config.upstream_tls_srv_name)
            .context("failed to build upstream DNS client")?;

        let handler = QueryHandler::new(blocklist, cache, upstream);

        let bind_addr: SocketAddr = format!("0.0.0.0:{}", config.dns_port)
            .parse()
            .with_context(|| format!("invalid DNS listen port: {}", config.dns_port))?;
        let udp_socket =
            bind_tuned_udp_socket(bind_addr).with_context(|| format!("failed to bind DNS listener on {bind_addr}"))?;

        let mut server = hickory_server::ServerFuture::new(handler);
        server.register_socket(udp_socket);

        info!(%bind_addr, "DNS listener running");
        let listener_task = tokio::spawn(async move {
            if let Err(err) = server.block_until_done().await {
                error!(error = %err, "DNS listener exited with an error");
            }
        });

        match restart_rx.recv().await {
            Some(()) => info!("restart signal received, draining and rebuilding"),
            None => {
                info!("restart channel closed, shutting down");
                listener_task.abort();
                return Ok(());
            }
        }

        // DRAINING: abort the in-flight listener. Queries in flight at this
        // instant are dropped; clients retry.
        listener_task.abort();

        // REBUILDING: the admin API already persisted the new config before
        // signaling restart; re-read it for the next iteration.
        config = config_repo
            .get_config()
            .await
            .context("failed to reload config after restart signal")?;
    }
}

/// Binds a UDP socket with larger send/recv buffers than the OS default.
/// DNS datagrams arrive in bursts and the default ~256KB buffer drops
/// packets under load.
fn bind_tuned_udp_socket(addr: SocketAddr) -> std::io::Result<UdpSocket> {
    let domain = if addr.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(8 * 1024 * 1024)?;
    socket.set_send_buffer_size(4 * 1024 * 1024)?;
    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
