use super::blocklist::Blocklist;
use compact_str::CompactString;
use sinkdns_domain::is_allowed_source_line;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::{info, warn};

/// Fetches every source, parses and merges them, and builds a [`Blocklist`].
/// A source that fails to fetch or yields no domains is
/// logged and skipped — it never aborts the overall load, and if every
/// source fails the result is an empty (non-blocking) blocklist.
pub async fn load(sources: &[String]) -> Blocklist {
    let mut per_source = Vec::with_capacity(sources.len());

    for source in sources {
        match fetch_source(source).await {
            Ok(text) => {
                let domains = parse_source_text(&text);
                if domains.is_empty() {
                    warn!(source = %source, "source yielded no domains, skipping");
                    continue;
                }
                per_source.push(domains);
            }
            Err(err) => {
                warn!(source = %source, error = %err, "failed to load blocklist source, skipping");
            }
        }
    }

    let merged = merge_sorted_sources(per_source);
    Blocklist::from_sorted_deduped(merged)
}

async fn fetch_source(source: &str) -> Result<String, reqwest::Error> {
    let response = reqwest::get(source).await?.error_for_status()?;
    response.text().await
}

/// Parses one source's raw text into a per-source sorted list of lower-case
/// domains. Duplicates within a single source survive this step — the
/// cross-source merge in [`merge_sorted_sources`] is what deduplicates.
///
/// Each line: trimmed of surrounding whitespace; skipped if it contains any
/// character outside `[a-zA-Z0-9._\- ]` (this is how `#`-comment lines are
/// rejected, with no special casing needed); otherwise the substring after
/// the last space is taken as the candidate domain (handles both bare
/// domain lists and `<ip> <domain>` hosts-format lines).
pub fn parse_source_text(text: &str) -> Vec<String> {
    let mut domains: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| is_allowed_source_line(line))
        .map(|line| match line.rfind(' ') {
            Some(idx) => &line[idx + 1..],
            None => line,
        })
        .filter(|candidate| !candidate.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    domains.sort();
    domains
}

/// Merges `k` already-sorted per-source domain lists into one sorted,
/// deduplicated list in `O(total · log k)` via a k-way merge over a binary
/// heap — an improvement over the original's quadratic linked-list
/// insertion merge. Output is identical to sorting the union of all inputs
/// and then deduplicating, regardless of source order.
pub fn merge_sorted_sources(sources: Vec<Vec<String>>) -> Vec<CompactString> {
    let mut cursors: Vec<(Vec<String>, usize)> = sources.into_iter().map(|v| (v, 0)).collect();
    let mut heap: BinaryHeap<Reverse<(String, usize)>> = BinaryHeap::new();

    for (idx, (items, _)) in cursors.iter().enumerate() {
        if let Some(first) = items.first() {
            heap.push(Reverse((first.clone(), idx)));
        }
    }

    let total: usize = cursors.iter().map(|(v, _)| v.len()).sum();
    let mut merged = Vec::with_capacity(total);
    let mut last_emitted: Option<String> = None;

    while let Some(Reverse((value, source_idx))) = heap.pop() {
        let (items, cursor) = &mut cursors[source_idx];
        *cursor += 1;
        if let Some(next) = items.get(*cursor) {
            heap.push(Reverse((next.clone(), source_idx)));
        }

        if last_emitted.as_deref() != Some(value.as_str()) {
            merged.push(CompactString::from(value.as_str()));
            last_emitted = Some(value);
        }
    }

    info!(sources = cursors.len(), domains = merged.len(), "merged blocklist sources");
    merged
}
