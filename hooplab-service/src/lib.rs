//! HoopLab Service — everything between the store and a surface.
//!
//! This crate builds on `hooplab-core` to provide:
//! - Email/password auth with a persisted session file
//! - Build submission, deletion, and likes with owner checks
//! - Feed pages (most liked, newest) with parallel percentile annotation
//! - A content-addressed percentile report cache
//! - The LFG board with TTL-based purging
//! - Profile assembly and gamertag updates
//! - CSV export of the build catalog
//! - TOML configuration

pub mod auth;
pub mod builds;
pub mod config;
pub mod export;
pub mod feed;
pub mod lfg;
pub mod profile;
pub mod rank_cache;

pub use auth::{AuthError, Authenticator, Session, SessionFile, MIN_PASSWORD_LEN};
pub use builds::{BuildService, BuildServiceError};
pub use config::{ConfigError, HoopLabConfig};
pub use export::export_builds_csv;
pub use feed::{Feed, FeedCard, DEFAULT_MOST_LIKED_LIMIT, DEFAULT_NEWEST_LIMIT};
pub use lfg::{LfgBoard, LfgError, LfgService, BOARD_LIMIT, DEFAULT_POST_TTL_MINUTES};
pub use profile::{ProfileError, ProfileService, ProfileView};
pub use rank_cache::RankCache;
