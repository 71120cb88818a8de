//! Percentile result cache.
//!
//! A report only depends on the target id, the ranked fields, and the peer
//! values those fields read, so the cache key is a blake3 hash over exactly
//! that. Any peer joining, leaving, or changing a ranked value produces a
//! different key, which makes invalidation automatic: stale entries are
//! simply never hit again.
//!
//! This replaces the original design's live re-computation on every
//! subscription callback with an explicit request/response memo.

use std::collections::HashMap;
use std::sync::RwLock;

use hooplab_core::compare::{overall_percentile, CompareError, PercentileReport};
use hooplab_core::domain::Build;

#[derive(Debug, Default)]
pub struct RankCache {
    entries: RwLock<HashMap<String, PercentileReport>>,
}

impl RankCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached `overall_percentile`. Errors are not cached; a malformed call
    /// fails every time it is made.
    pub fn report(
        &self,
        target: &Build,
        peers: &[Build],
        fields: &[&str],
    ) -> Result<PercentileReport, CompareError> {
        let key = fingerprint(target, peers, fields);

        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
        {
            return Ok(hit.clone());
        }

        let report = overall_percentile(target, peers, fields)?;
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, report.clone());
        Ok(report)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

/// Content hash of everything the report depends on.
fn fingerprint(target: &Build, peers: &[Build], fields: &[&str]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(target.id.0.as_bytes());
    for field in fields {
        hasher.update(b"\0");
        hasher.update(field.as_bytes());
    }

    // Peer order must not matter: hash (id, values) pairs in id order.
    let mut peer_lines: Vec<String> = peers
        .iter()
        .map(|peer| {
            let values: Vec<String> = fields
                .iter()
                .map(|f| match peer.attribute(f) {
                    Some(v) => v.to_string(),
                    None => "?".to_string(),
                })
                .collect();
            format!("{}={}", peer.id.0, values.join(","))
        })
        .collect();
    peer_lines.sort_unstable();
    for line in peer_lines {
        hasher.update(b"\0");
        hasher.update(line.as_bytes());
    }

    hasher.finalize().to_hex().to_string()
}
