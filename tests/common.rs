#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable};
use hickory_server::ServerFuture;
use sinkdns_domain::Override;
use sinkdns_infrastructure::dns::{block_filter, overrides, transport};
use sinkdns_infrastructure::{QueryHandler, ResponseCache};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running sinkhole listener bound to a loopback port, assembled directly
/// from the same infrastructure pieces the supervisor composes on every
/// restart — this test crate has no dependency on the CLI or
/// admin-API layers.
pub struct Sinkhole {
    pub addr: SocketAddr,
    task: JoinHandle<()>,
}

impl Sinkhole {
    pub async fn start(sources: &[String], overrides_cfg: &[Override], upstream_addr: SocketAddr) -> Self {
        let blocklist = Arc::new(block_filter::load(sources).await);
        let cache = Arc::new(ResponseCache::new());
        overrides::install(&cache, overrides_cfg);
        let upstream = transport::build(upstream_addr, "").expect("plain UDP upstream client");
        let handler = QueryHandler::new(blocklist, cache, upstream);

        let socket = UdpSocket::bind("127.0.0.1:0").await.expect("bind loopback UDP");
        let addr = socket.local_addr().expect("local addr");

        let mut server = ServerFuture::new(handler);
        server.register_socket(socket);

        let task = tokio::spawn(async move {
            let _ = server.block_until_done().await;
        });

        Self { addr, task }
    }
}

impl Drop for Sinkhole {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A one-shot fake upstream resolver: answers every query with a single A
/// record for the queried name, at a fixed TTL.
pub struct FakeUpstream {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FakeUpstream {
    pub async fn start(answer_ip: Ipv4Addr, ttl: u32) -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { break };
                        let Ok(query) = Message::from_bytes(&buf[..len]) else { continue };
                        let Some(question) = query.queries().first() else { continue };

                        let mut response = Message::new();
                        response.set_id(query.id());
                        response.set_message_type(MessageType::Response);
                        response.set_op_code(OpCode::Query);
                        response.set_response_code(ResponseCode::NoError);
                        response.set_recursion_available(true);
                        response.add_query(question.clone());
                        response.add_answer(Record::from_rdata(
                            question.name().clone(),
                            ttl,
                            RData::A(A(answer_ip)),
                        ));

                        if let Ok(bytes) = response.to_bytes() {
                            let _ = socket.send_to(&bytes, peer).await;
                        }
                    }
                }
            }
        });

        Self { addr, shutdown_tx: Some(shutdown_tx) }
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Sends `name`/`record_type` as a single-question query to `server_addr`
/// over plain UDP and returns the parsed reply, or `None` on timeout (used
/// to assert that a dropped upstream-error query never gets a reply).
pub async fn send_query(server_addr: SocketAddr, name: &str, record_type: RecordType) -> Option<Message> {
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

    let mut query = Message::new();
    query.set_id(0xABCD);
    query.set_message_type(MessageType::Query);
    query.set_op_code(OpCode::Query);
    query.set_recursion_desired(true);
    query.add_query(Query::query(Name::from_str(name).unwrap(), record_type));

    let bytes = query.to_bytes().unwrap();
    client.send_to(&bytes, server_addr).await.unwrap();

    let mut buf = vec![0u8; 512];
    match tokio::time::timeout(Duration::from_millis(800), client.recv(&mut buf)).await {
        Ok(Ok(len)) => Some(Message::from_bytes(&buf[..len]).unwrap()),
        _ => None,
    }
}

/// A one-shot raw HTTP server serving `body` to every request it accepts,
/// for exercising [`sinkdns_infrastructure::dns::block_filter::load`]
/// against real HTTP sources.
pub struct MockHttpServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockHttpServer {
    pub async fn start(body: String) -> (Self, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((mut stream, _)) = accepted else { break };
                        let body = body.clone();
                        tokio::spawn(async move {
                            let mut buf = [0u8; 1024];
                            let _ = stream.read(&mut buf).await;
                            let response = format!(
                                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                                body.len(),
                                body
                            );
                            let _ = stream.write_all(response.as_bytes()).await;
                            let _ = stream.shutdown().await;
                        });
                    }
                }
            }
        });

        (Self { shutdown_tx: Some(shutdown_tx) }, format!("http://{addr}/list.txt"))
    }
}

impl Drop for MockHttpServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Sends a raw two-question message.
pub async fn send_malformed_multi_question_query(server_addr: SocketAddr) -> Message {
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();

    let mut query = Message::new();
    query.set_id(0xBEEF);
    query.set_message_type(MessageType::Query);
    query.set_op_code(OpCode::Query);
    query.add_query(Query::query(Name::from_str("a.example.").unwrap(), RecordType::A));
    query.add_query(Query::query(Name::from_str("b.example.").unwrap(), RecordType::A));

    let bytes = query.to_bytes().unwrap();
    client.send_to(&bytes, server_addr).await.unwrap();

    let mut buf = vec![0u8; 512];
    let len = tokio::time::timeout(Duration::from_secs(3), client.recv(&mut buf))
        .await
        .expect("reply within timeout")
        .unwrap();

    Message::from_bytes(&buf[..len]).unwrap()
}
