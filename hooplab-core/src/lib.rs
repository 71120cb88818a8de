//! HoopLab Core — domain types, ranking and aggregation, document store.
//!
//! This crate contains everything below the service layer:
//! - Domain types (builds, attribute sheet, positions, users, LFG posts)
//! - Percentile ranking of a build against its position peers (`compare`)
//! - Category score aggregation for the breakdown chart (`aggregate`)
//! - The document store seam with in-memory and JSON-file backends (`store`)
//!
//! The two computations in `compare` and `aggregate` are pure functions over
//! plain data; everything effectful lives behind `store::DocumentStore`.

pub mod aggregate;
pub mod compare;
pub mod domain;
pub mod store;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: core types are Send + Sync.
    ///
    /// The feed annotates cards in parallel, so builds, reports, and store
    /// handles cross thread boundaries. If any of these stops being
    /// thread-safe the build breaks here first.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Build>();
        require_sync::<domain::Build>();
        require_send::<domain::UserProfile>();
        require_sync::<domain::UserProfile>();
        require_send::<domain::LfgPost>();
        require_sync::<domain::LfgPost>();
        require_send::<domain::Position>();
        require_sync::<domain::Position>();

        require_send::<compare::PercentileReport>();
        require_sync::<compare::PercentileReport>();
        require_send::<aggregate::CategorySlice>();
        require_sync::<aggregate::CategorySlice>();

        require_send::<store::MemoryStore>();
        require_sync::<store::MemoryStore>();
        require_send::<store::JsonStore>();
        require_sync::<store::JsonStore>();
    }

    /// Architecture contract: the ranking entry points take plain data and
    /// return plain data — no store handle, no session, no callbacks. If a
    /// store parameter ever creeps into these signatures, this stops
    /// compiling.
    #[test]
    fn ranking_takes_only_plain_data() {
        fn _check(
            target: &domain::Build,
            peers: &[domain::Build],
        ) -> Result<compare::PercentileReport, compare::CompareError> {
            compare::overall_percentile(target, peers, &compare::DEFAULT_RANKED_FIELDS)
        }
    }
}
