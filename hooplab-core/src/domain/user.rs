//! User profile document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BuildId, PostId, UserId};

/// A registered user's document: credentials, display name, and the id
/// arrays that link the user to their builds, liked builds, and LFG posts.
///
/// `gamertag` starts empty and is stamped by the first build submission or
/// an explicit profile update; it must be at least 4 characters once set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub gamertag: String,
    /// Hex-encoded random salt mixed into the password digest.
    pub password_salt: String,
    /// Hex-encoded blake3 digest of salt + password.
    pub password_digest: String,
    pub liked_builds: Vec<BuildId>,
    pub builds: Vec<BuildId>,
    pub posts: Vec<PostId>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn has_gamertag(&self) -> bool {
        !self.gamertag.is_empty()
    }

    pub fn has_liked(&self, build: &BuildId) -> bool {
        self.liked_builds.contains(build)
    }
}
