#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::{BinDecodable, BinEncodable};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// A one-shot mock upstream DNS server: answers every query with a single A
/// record for the queried name, over a raw UDP socket.
pub struct MockUpstreamServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockUpstreamServer {
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

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

impl Drop for MockUpstreamServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
