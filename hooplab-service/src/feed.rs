//! Home feed — most-liked and newest build pages, each card annotated with
//! the build's percentile standing among its position peers.
//!
//! Annotation is embarrassingly parallel (one independent ranking per card)
//! so the page fans out over rayon. A card whose ranking fails degrades to
//! an unannotated card instead of failing the page; the detail view is
//! where a ranking error becomes user-visible.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use hooplab_core::compare::{PercentileReport, DEFAULT_RANKED_FIELDS};
use hooplab_core::domain::{Build, Position};
use hooplab_core::store::{DocumentStore, StoreError};

use crate::rank_cache::RankCache;

/// Default page size for the most-liked rail.
pub const DEFAULT_MOST_LIKED_LIMIT: usize = 20;

/// Default page size for the newest rail.
pub const DEFAULT_NEWEST_LIMIT: usize = 5;

/// One feed entry: the build plus its percentile standing, when computable.
#[derive(Debug, Clone, Serialize)]
pub struct FeedCard {
    pub build: Build,
    pub percentile: Option<PercentileReport>,
}

pub struct Feed<'a> {
    store: &'a dyn DocumentStore,
    cache: Option<&'a RankCache>,
}

impl<'a> Feed<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store, cache: None }
    }

    /// Reuse percentile reports across pages through `cache`.
    pub fn with_cache(store: &'a dyn DocumentStore, cache: &'a RankCache) -> Self {
        Self {
            store,
            cache: Some(cache),
        }
    }

    /// Builds ordered by like count, most liked first. Ties break newest
    /// first so fresh builds aren't buried under old zero-like ones.
    pub fn most_liked(&self, limit: usize) -> Result<Vec<FeedCard>, StoreError> {
        let mut builds = self.store.builds()?;
        builds.sort_by(|a, b| {
            b.likes
                .cmp(&a.likes)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        builds.truncate(limit);
        self.annotate(builds)
    }

    /// Builds ordered by creation time, newest first.
    pub fn newest(&self, limit: usize) -> Result<Vec<FeedCard>, StoreError> {
        let mut builds = self.store.builds()?;
        builds.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        builds.truncate(limit);
        self.annotate(builds)
    }

    fn annotate(&self, builds: Vec<Build>) -> Result<Vec<FeedCard>, StoreError> {
        // One peer fetch per distinct position on the page; the ranking
        // itself then runs without touching the store.
        let mut peers_by_position: HashMap<Position, Vec<Build>> = HashMap::new();
        for build in &builds {
            if !peers_by_position.contains_key(&build.position) {
                peers_by_position
                    .insert(build.position, self.store.peers_by_position(build.position)?);
            }
        }

        let cards = builds
            .into_par_iter()
            .map(|build| {
                let peers = &peers_by_position[&build.position];
                let report = match self.cache {
                    Some(cache) => cache.report(&build, peers, &DEFAULT_RANKED_FIELDS),
                    None => hooplab_core::compare::overall_percentile(
                        &build,
                        peers,
                        &DEFAULT_RANKED_FIELDS,
                    ),
                };
                let percentile = match report {
                    Ok(report) => Some(report),
                    Err(e) => {
                        warn!(build = %build.id, error = %e, "skipping percentile annotation");
                        None
                    }
                };
                FeedCard { build, percentile }
            })
            .collect();

        Ok(cards)
    }
}
