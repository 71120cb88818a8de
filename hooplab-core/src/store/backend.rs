//! Document store trait and structured error types.
//!
//! The `DocumentStore` trait abstracts over backends (in-memory, JSON files)
//! so services can swap implementations and mock for tests. It carries the
//! whole request/response surface the app needs: collection reads, document
//! writes and deletes, the peer query behind ranking, and the counter
//! updates behind likes.

use thiserror::Error;

use crate::domain::{Build, BuildId, LfgPost, Position, PostId, UserId, UserProfile};

pub const BUILDS: &str = "builds";
pub const USERS: &str = "users";
pub const POSTS: &str = "posts";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no document '{id}' in collection '{collection}'")]
    NotFound { collection: &'static str, id: String },

    #[error("a user with email '{email}' already exists")]
    DuplicateEmail { email: String },

    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt collection file '{path}': {message}")]
    Corrupt { path: String, message: String },
}

impl StoreError {
    pub fn not_found(collection: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}

/// Backend-agnostic document store.
///
/// Every method is a single request/response call; there are no listeners
/// or subscriptions. Multi-document consistency (e.g. unlinking a deleted
/// build from its owner) is the service layer's job.
pub trait DocumentStore: Send + Sync {
    // ── builds ──────────────────────────────────────────────────────
    fn insert_build(&self, build: Build) -> Result<(), StoreError>;
    fn build(&self, id: &BuildId) -> Result<Build, StoreError>;
    fn delete_build(&self, id: &BuildId) -> Result<(), StoreError>;
    fn builds(&self) -> Result<Vec<Build>, StoreError>;

    /// Every build at `position` — the peer set for ranking. Includes the
    /// target build itself when it is stored.
    fn peers_by_position(&self, position: Position) -> Result<Vec<Build>, StoreError>;

    /// Increment the like counter; returns the new count.
    fn add_like(&self, id: &BuildId) -> Result<u32, StoreError>;

    /// Decrement the like counter, saturating at zero; returns the new count.
    fn remove_like(&self, id: &BuildId) -> Result<u32, StoreError>;

    // ── users ───────────────────────────────────────────────────────
    fn create_user(&self, user: UserProfile) -> Result<(), StoreError>;
    fn user(&self, id: &UserId) -> Result<UserProfile, StoreError>;
    fn user_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError>;
    fn update_user(&self, user: UserProfile) -> Result<(), StoreError>;

    // ── posts ───────────────────────────────────────────────────────
    fn insert_post(&self, post: LfgPost) -> Result<(), StoreError>;
    fn post(&self, id: &PostId) -> Result<LfgPost, StoreError>;
    fn delete_post(&self, id: &PostId) -> Result<(), StoreError>;
    fn posts(&self) -> Result<Vec<LfgPost>, StoreError>;

    /// Counted aggregation: number of live posts, without materializing them.
    fn post_count(&self) -> Result<usize, StoreError>;
}
