use hickory_proto::op::ResponseCode;
use hickory_proto::rr::Record;
use std::time::Instant;

/// A cached reply. `expires_at = None` means the entry never expires — used
/// for permanent override records that are installed with no expiration.
#[derive(Clone, Debug)]
pub struct CachedResponse {
    pub answer_records: Vec<Record>,
    pub response_code: ResponseCode,
    pub expires_at: Option<Instant>,
}

impl CachedResponse {
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => Instant::now() >= at,
            None => false,
        }
    }
}
