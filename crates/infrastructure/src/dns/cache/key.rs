use hickory_proto::rr::{DNSClass, RecordType};
use std::sync::Arc;

/// Cache lookup key: the fully-qualified, lower-cased query name plus its
/// type and class. Two queries for the same name that differ
/// in case hit the same entry.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CacheKey {
    pub name_fqdn_lower: Arc<str>,
    pub record_type: RecordType,
    pub class: DNSClass,
}

impl CacheKey {
    pub fn new(name_fqdn_lower: impl Into<Arc<str>>, record_type: RecordType, class: DNSClass) -> Self {
        Self {
            name_fqdn_lower: name_fqdn_lower.into(),
            record_type,
            class,
        }
    }
}
