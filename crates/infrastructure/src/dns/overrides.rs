use crate::dns::cache::{CacheKey, CachedResponse, ResponseCache};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use sinkdns_domain::Override;
use std::net::IpAddr;
use std::str::FromStr;
use tracing::warn;

/// TTL reported on a synthesized override answer. The entry
/// itself is installed with no expiration — only the advertised TTL is 3600.
const OVERRIDE_TTL_SECONDS: u32 = 3600;

/// Installs every configured override into `cache` as a permanent entry.
/// An override with an empty `ip` synthesizes NXDOMAIN; otherwise it
/// installs an A or AAAA answer matching the parsed address family.
///
/// `AAAA` overrides are installed exactly like `A` overrides — both
/// populate the cache symmetrically rather than the IPv6 branch silently
/// doing nothing.
pub fn install(cache: &ResponseCache, overrides: &[Override]) {
    for ov in overrides {
        let Some(record_type) = parse_record_type(&ov.record_type) else {
            warn!(r#type = %ov.record_type, domain = %ov.domain, "skipping override with unrecognized type");
            continue;
        };

        let name_fqdn_lower = fqdn_lower(&ov.domain);
        let key = CacheKey::new(name_fqdn_lower.clone(), record_type, DNSClass::IN);

        if ov.ip.trim().is_empty() {
            cache.set_permanent(
                key,
                CachedResponse {
                    answer_records: Vec::new(),
                    response_code: ResponseCode::NXDomain,
                    expires_at: None,
                },
            );
            continue;
        }

        let Ok(ip) = IpAddr::from_str(ov.ip.trim()) else {
            warn!(ip = %ov.ip, domain = %ov.domain, "skipping override with unparseable IP");
            continue;
        };

        let Some(record) = build_answer(&name_fqdn_lower, record_type, ip) else {
            warn!(
                r#type = %ov.record_type,
                ip = %ov.ip,
                domain = %ov.domain,
                "skipping override: record type does not match IP address family"
            );
            continue;
        };

        cache.set_permanent(
            key,
            CachedResponse {
                answer_records: vec![record],
                response_code: ResponseCode::NoError,
                expires_at: None,
            },
        );
    }
}

fn parse_record_type(s: &str) -> Option<RecordType> {
    match s.to_ascii_uppercase().as_str() {
        "A" => Some(RecordType::A),
        "AAAA" => Some(RecordType::AAAA),
        _ => None,
    }
}

fn fqdn_lower(domain: &str) -> String {
    let lower = domain.to_ascii_lowercase();
    if lower.ends_with('.') {
        lower
    } else {
        format!("{lower}.")
    }
}

fn build_answer(name_fqdn_lower: &str, record_type: RecordType, ip: IpAddr) -> Option<Record> {
    let name = Name::from_str(name_fqdn_lower).ok()?;
    let rdata = match (record_type, ip) {
        (RecordType::A, IpAddr::V4(v4)) => RData::A(A(v4)),
        (RecordType::AAAA, IpAddr::V6(v6)) => RData::AAAA(AAAA(v6)),
        _ => return None,
    };
    Some(Record::from_rdata(name, OVERRIDE_TTL_SECONDS, rdata))
}
