use crate::dns::block_filter::Blocklist;
use crate::dns::cache::{CacheKey, CachedResponse, ResponseCache};
use crate::metrics;
use async_trait::async_trait;
use hickory_proto::op::{Header, MessageType, OpCode, ResponseCode};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use sinkdns_application::UpstreamClient;
use std::iter;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// The stateless per-query pipeline:
/// malformed → cache → blocklist → upstream. Rebuilt wholesale by the
/// supervisor whenever the blocklist or upstream client changes; holds no
/// state of its own beyond shared references to the components it pipes
/// a query through.
pub struct QueryHandler {
    blocklist: Arc<Blocklist>,
    cache: Arc<ResponseCache>,
    upstream: Arc<dyn UpstreamClient>,
}

impl QueryHandler {
    pub fn new(blocklist: Arc<Blocklist>, cache: Arc<ResponseCache>, upstream: Arc<dyn UpstreamClient>) -> Self {
        Self {
            blocklist,
            cache,
            upstream,
        }
    }

    fn response_header(req: &Request, rcode: ResponseCode) -> Header {
        let mut header = *req.header();
        header.set_message_type(MessageType::Response);
        header.set_op_code(OpCode::Query);
        header.set_response_code(rcode);
        header.set_recursion_desired(req.recursion_desired());
        header.set_recursion_available(true);
        header.set_authoritative(false);
        header
    }
}

#[async_trait]
impl RequestHandler for QueryHandler {
    async fn handle_request<R: ResponseHandler>(&self, req: &Request, mut response: R) -> ResponseInfo {
        let started = Instant::now();

        // 1. malformed: exactly one question is required.
        if req.queries().len() != 1 {
            metrics::observe_query("malformed_query", "-", started.elapsed().as_secs_f64());
            let header = Self::response_header(req, ResponseCode::FormErr);
            let msg = MessageResponseBuilder::from_message_request(req).build(
                header,
                iter::empty(),
                iter::empty(),
                iter::empty(),
                iter::empty(),
            );
            return response
                .send_response(msg)
                .await
                .unwrap_or_else(|_| ResponseInfo::from(*req.header()));
        }

        let query = req.queries()[0].clone();
        let qname = query.name().clone();
        let qtype = query.query_type();
        let qclass = query.query_class();
        let qtype_label = qtype.to_string();

        let name_fqdn_lower = qname.to_ascii().to_ascii_lowercase();
        let name_dotless_lower = name_fqdn_lower.trim_end_matches('.').to_string();

        // 2. cache
        let cache_key = CacheKey::new(name_fqdn_lower.clone(), qtype, qclass);
        if let Some(cached) = self.cache.get(&cache_key) {
            metrics::observe_query("cache", &qtype_label, started.elapsed().as_secs_f64());
            let header = Self::response_header(req, cached.response_code);
            let msg = MessageResponseBuilder::from_message_request(req).build(
                header,
                cached.answer_records.iter(),
                iter::empty(),
                iter::empty(),
                iter::empty(),
            );
            return response
                .send_response(msg)
                .await
                .unwrap_or_else(|_| ResponseInfo::from(*req.header()));
        }

        // 3. blocklist — a hit is never written back to the cache; the
        // blocklist itself is the authority and may be replaced on restart.
        if self.blocklist.contains(&name_dotless_lower) {
            metrics::observe_query("block", &qtype_label, started.elapsed().as_secs_f64());
            let header = Self::response_header(req, ResponseCode::NXDomain);
            let msg = MessageResponseBuilder::from_message_request(req).build(
                header,
                iter::empty(),
                iter::empty(),
                iter::empty(),
                iter::empty(),
            );
            return response
                .send_response(msg)
                .await
                .unwrap_or_else(|_| ResponseInfo::from(*req.header()));
        }

        // 4. upstream
        let mut outbound = hickory_proto::op::Message::new();
        outbound.set_id(req.id());
        outbound.set_message_type(MessageType::Query);
        outbound.set_op_code(OpCode::Query);
        outbound.set_recursion_desired(true);
        outbound.add_query(query.original().clone());

        match self.upstream.exchange(&outbound).await {
            Ok(exchange) => {
                metrics::observe_query("upstream", &qtype_label, started.elapsed().as_secs_f64());

                let answers: Vec<_> = exchange.response.answers().to_vec();
                let rcode = exchange.response.response_code();

                if !answers.is_empty() {
                    let ttl = answers[0].ttl();
                    self.cache.set(
                        cache_key,
                        CachedResponse {
                            answer_records: answers.clone(),
                            response_code: rcode,
                            expires_at: None,
                        },
                        std::time::Duration::from_secs(ttl as u64),
                    );
                }

                let header = Self::response_header(req, rcode);
                let msg = MessageResponseBuilder::from_message_request(req).build(
                    header,
                    answers.iter(),
                    iter::empty(),
                    iter::empty(),
                    iter::empty(),
                );
                response
                    .send_response(msg)
                    .await
                    .unwrap_or_else(|_| ResponseInfo::from(*req.header()))
            }
            Err(err) => {
                metrics::observe_query("upstream_error", &qtype_label, started.elapsed().as_secs_f64());
                warn!(query = %name_fqdn_lower, error = %err, "upstream exchange failed, dropping query");
                debug!("no reply sent for this query (spec default: drop rather than SERVFAIL)");
                ResponseInfo::from(*req.header())
            }
        }
    }
}
