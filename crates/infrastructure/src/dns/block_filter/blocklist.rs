use super::bloom::BloomFilter;
use crate::metrics;
use compact_str::CompactString;
use sinkdns_domain::normalize_domain;
use std::time::Instant;
use tracing::info;

/// Target false-positive rate for the bloom filter gating this blocklist's
/// sorted array: `p = 0.01`.
const TARGET_FALSE_POSITIVE_RATE: f64 = 0.01;

/// An immutable, deduplicated, lexicographically sorted set of blocked
/// domains, fronted by a bloom filter.
///
/// Constructed wholesale by [`super::loader::BlocklistLoader`] and never
/// mutated afterwards; replaced wholesale on restart.
pub struct Blocklist {
    sorted_domains: Vec<CompactString>,
    filter: BloomFilter,
}

impl Blocklist {
    /// Builds a blocklist from an already sorted, already deduplicated list
    /// of lower-case domains. Use [`super::loader::BlocklistLoader`] to
    /// produce that list from raw sources.
    pub fn from_sorted_deduped(sorted_domains: Vec<CompactString>) -> Self {
        let mut filter = BloomFilter::new(sorted_domains.len(), TARGET_FALSE_POSITIVE_RATE);
        for domain in &sorted_domains {
            filter.add(domain);
        }

        let array_bytes: usize = sorted_domains.iter().map(|d| d.len()).sum();
        info!(
            domain_count = sorted_domains.len(),
            array_mb = array_bytes as f64 / 1e6,
            bloom_mb = filter.size_bytes() as f64 / 1e6,
            "blocklist built"
        );

        Self {
            sorted_domains,
            filter,
        }
    }

    pub fn empty() -> Self {
        Self::from_sorted_deduped(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.sorted_domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_domains.is_empty()
    }

    /// Whether `domain` is blocked. Normalizes case; the fast bloom-miss
    /// path never touches the sorted array.
    #[inline]
    pub fn contains(&self, domain: &str) -> bool {
        let start = Instant::now();
        let lower = normalize_domain(domain);

        let maybe_present = self.filter.test(&lower);
        if !maybe_present {
            metrics::observe_blacklist_lookup("absent", "absent", start.elapsed().as_secs_f64());
            return false;
        }

        let present = self
            .sorted_domains
            .binary_search_by(|d| d.as_str().cmp(lower.as_str()))
            .is_ok();

        let array_outcome = if present { "present" } else { "absent" };
        metrics::observe_blacklist_lookup("maybe", array_outcome, start.elapsed().as_secs_f64());
        present
    }
}
