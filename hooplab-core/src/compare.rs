//! Percentile ranking — how a build's measured fields stand against the
//! other builds at its position.
//!
//! The peer set INCLUDES the target build: `peers_by_position` returns every
//! build at the position and the target is one of them, so the denominator
//! is the full peer count and a build holding a field's maximum ranks at
//! exactly 100. Callers assembling a peer slice by hand must keep the target
//! in it; a target value absent from the peer values is reported as
//! [`CompareError::TargetNotInPeerSet`] rather than silently ranking 0.
//!
//! Per field: sort the peer values ascending and take the 1-based index of
//! the FIRST occurrence of the target's value. Builds tied on a value all
//! report the lowest-index rank — a deliberately crude tie policy, kept
//! as observed behavior.
//!
//! Both entry points are pure: no I/O, no logging, no mutation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::{Build, BuildId};

/// The measured fields ranked by default on the build detail view.
pub const DEFAULT_RANKED_FIELDS: [&str; 2] = ["height", "weight"];

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompareError {
    #[error("cannot rank against an empty peer set")]
    EmptyPeerSet,

    #[error("no ranked fields were requested")]
    NoRankedFields,

    #[error("ranked field '{field}' does not exist on build records")]
    FieldNotFound { field: String },

    #[error("build {id} holds no '{field}' value present in the peer set; the peer set must include the target")]
    TargetNotInPeerSet { id: BuildId, field: String },
}

/// Result of ranking one build against its peers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileReport {
    /// Per-field percentiles, unrounded, keyed by field name.
    pub fields: BTreeMap<String, f64>,
    /// Mean of the per-field percentiles, rounded to 2 decimals.
    pub overall: f64,
    /// Size of the peer set the ranks were taken in.
    pub peer_count: usize,
}

/// Rank one field of `target` within `peers`.
///
/// Returns `rank / peer_count * 100` where rank is the 1-based position of
/// the first occurrence of the target's value in the ascending-sorted peer
/// values. Output is in `(0, 100]`.
pub fn field_percentile(target: &Build, peers: &[Build], field: &str) -> Result<f64, CompareError> {
    if peers.is_empty() {
        return Err(CompareError::EmptyPeerSet);
    }
    let target_value = target
        .attribute(field)
        .ok_or_else(|| CompareError::FieldNotFound {
            field: field.to_string(),
        })?;

    let mut values = Vec::with_capacity(peers.len());
    for peer in peers {
        let value = peer
            .attribute(field)
            .ok_or_else(|| CompareError::FieldNotFound {
                field: field.to_string(),
            })?;
        values.push(value);
    }
    values.sort_unstable();

    let rank = values
        .iter()
        .position(|&v| v == target_value)
        .ok_or_else(|| CompareError::TargetNotInPeerSet {
            id: target.id.clone(),
            field: field.to_string(),
        })?
        + 1;

    Ok(rank as f64 / values.len() as f64 * 100.0)
}

/// Rank every requested field and average the percentiles.
pub fn overall_percentile(
    target: &Build,
    peers: &[Build],
    fields: &[&str],
) -> Result<PercentileReport, CompareError> {
    if fields.is_empty() {
        return Err(CompareError::NoRankedFields);
    }
    if peers.is_empty() {
        return Err(CompareError::EmptyPeerSet);
    }

    let mut per_field = BTreeMap::new();
    let mut sum = 0.0;
    for field in fields {
        let pct = field_percentile(target, peers, field)?;
        sum += pct;
        per_field.insert((*field).to_string(), pct);
    }

    Ok(PercentileReport {
        overall: round_2dp(sum / fields.len() as f64),
        fields: per_field,
        peer_count: peers.len(),
    })
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
