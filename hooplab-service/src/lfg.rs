//! Looking-for-group board.
//!
//! Posts are short-lived notices: the CLI purges anything older than the
//! configured TTL before rendering the board, so the board only ever shows
//! live posts. Each user holds at most one live post at a time — the
//! composer is only offered once the previous post is gone.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tracing::info;

use hooplab_core::domain::{GameMode, LfgPost, PostId};
use hooplab_core::store::{DocumentStore, StoreError};

use crate::auth::Session;

/// Posts older than this are purged from the board.
pub const DEFAULT_POST_TTL_MINUTES: i64 = 60;

/// How many foreign posts a board page shows.
pub const BOARD_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum LfgError {
    #[error("post content must not be empty")]
    EmptyContent,

    #[error("you already have a live post ({id}); delete it first")]
    AlreadyPosted { id: PostId },

    #[error("post {id} does not belong to the signed-in user")]
    NotOwner { id: PostId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One page of the board, split the way it renders: the viewer's own post
/// (composer hidden while it exists) and everyone else's, newest first.
#[derive(Debug, Clone)]
pub struct LfgBoard {
    pub own: Option<LfgPost>,
    pub others: Vec<LfgPost>,
    /// Total live posts, the "People Looking: N" header.
    pub total: usize,
}

pub struct LfgService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> LfgService<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Publish a post for the session's user.
    pub fn post(
        &self,
        session: &Session,
        mode: GameMode,
        content: &str,
    ) -> Result<LfgPost, LfgError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(LfgError::EmptyContent);
        }

        if let Some(existing) = self
            .store
            .posts()?
            .into_iter()
            .find(|p| p.user_id == session.user_id)
        {
            return Err(LfgError::AlreadyPosted { id: existing.id });
        }

        let mut user = self.store.user(&session.user_id)?;
        let post = LfgPost {
            id: PostId::generate(),
            user_id: user.id.clone(),
            gamertag: user.gamertag.clone(),
            content: content.to_string(),
            mode,
            created_at: Utc::now(),
        };
        self.store.insert_post(post.clone())?;
        user.posts.push(post.id.clone());
        self.store.update_user(user)?;

        info!(post = %post.id, mode = %mode, "lfg post published");
        Ok(post)
    }

    /// Assemble the board for a viewer.
    pub fn board(&self, session: &Session) -> Result<LfgBoard, LfgError> {
        let total = self.store.post_count()?;
        let mut posts = self.store.posts()?;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts.truncate(BOARD_LIMIT);

        let own = posts
            .iter()
            .find(|p| p.user_id == session.user_id)
            .cloned();
        let others = posts
            .into_iter()
            .filter(|p| p.user_id != session.user_id)
            .collect();

        Ok(LfgBoard { own, others, total })
    }

    /// Delete one of the user's own posts.
    pub fn delete(&self, session: &Session, id: &PostId) -> Result<(), LfgError> {
        let post = self.store.post(id)?;
        if post.user_id != session.user_id {
            return Err(LfgError::NotOwner { id: id.clone() });
        }
        self.store.delete_post(id)?;

        let mut user = self.store.user(&session.user_id)?;
        user.posts.retain(|p| p != id);
        self.store.update_user(user)?;
        Ok(())
    }

    /// Delete every post strictly older than `ttl` and unlink each from its
    /// author's document. Returns how many were removed.
    pub fn purge_expired(&self, ttl: Duration, now: DateTime<Utc>) -> Result<usize, LfgError> {
        let expired: Vec<LfgPost> = self
            .store
            .posts()?
            .into_iter()
            .filter(|p| p.is_expired(now, ttl))
            .collect();

        for post in &expired {
            self.store.delete_post(&post.id)?;
            let mut user = self.store.user(&post.user_id)?;
            user.posts.retain(|p| p != &post.id);
            self.store.update_user(user)?;
        }

        if !expired.is_empty() {
            info!(purged = expired.len(), "expired lfg posts removed");
        }
        Ok(expired.len())
    }
}
