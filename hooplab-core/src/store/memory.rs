//! In-memory store — the test double every service test runs against.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{Build, BuildId, LfgPost, Position, PostId, UserId, UserProfile};

use super::backend::{DocumentStore, StoreError, BUILDS, POSTS, USERS};

/// HashMap-per-collection store behind `RwLock`s.
#[derive(Debug, Default)]
pub struct MemoryStore {
    builds: RwLock<HashMap<BuildId, Build>>,
    users: RwLock<HashMap<UserId, UserProfile>>,
    posts: RwLock<HashMap<PostId, LfgPost>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Lock poisoning only happens if a writer panicked; the data itself is
// still consistent for these single-map operations, so recover the guard.
macro_rules! rlock {
    ($lock:expr) => {
        $lock.read().unwrap_or_else(|e| e.into_inner())
    };
}

macro_rules! wlock {
    ($lock:expr) => {
        $lock.write().unwrap_or_else(|e| e.into_inner())
    };
}

impl DocumentStore for MemoryStore {
    fn insert_build(&self, build: Build) -> Result<(), StoreError> {
        wlock!(self.builds).insert(build.id.clone(), build);
        Ok(())
    }

    fn build(&self, id: &BuildId) -> Result<Build, StoreError> {
        rlock!(self.builds)
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(BUILDS, id))
    }

    fn delete_build(&self, id: &BuildId) -> Result<(), StoreError> {
        wlock!(self.builds)
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(BUILDS, id))
    }

    fn builds(&self) -> Result<Vec<Build>, StoreError> {
        Ok(rlock!(self.builds).values().cloned().collect())
    }

    fn peers_by_position(&self, position: Position) -> Result<Vec<Build>, StoreError> {
        Ok(rlock!(self.builds)
            .values()
            .filter(|b| b.position == position)
            .cloned()
            .collect())
    }

    fn add_like(&self, id: &BuildId) -> Result<u32, StoreError> {
        let mut builds = wlock!(self.builds);
        let build = builds
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(BUILDS, id))?;
        build.likes += 1;
        Ok(build.likes)
    }

    fn remove_like(&self, id: &BuildId) -> Result<u32, StoreError> {
        let mut builds = wlock!(self.builds);
        let build = builds
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(BUILDS, id))?;
        build.likes = build.likes.saturating_sub(1);
        Ok(build.likes)
    }

    fn create_user(&self, user: UserProfile) -> Result<(), StoreError> {
        let mut users = wlock!(self.users);
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail { email: user.email });
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }

    fn user(&self, id: &UserId) -> Result<UserProfile, StoreError> {
        rlock!(self.users)
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(USERS, id))
    }

    fn user_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(rlock!(self.users)
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    fn update_user(&self, user: UserProfile) -> Result<(), StoreError> {
        let mut users = wlock!(self.users);
        if !users.contains_key(&user.id) {
            return Err(StoreError::not_found(USERS, &user.id));
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }

    fn insert_post(&self, post: LfgPost) -> Result<(), StoreError> {
        wlock!(self.posts).insert(post.id.clone(), post);
        Ok(())
    }

    fn post(&self, id: &PostId) -> Result<LfgPost, StoreError> {
        rlock!(self.posts)
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(POSTS, id))
    }

    fn delete_post(&self, id: &PostId) -> Result<(), StoreError> {
        wlock!(self.posts)
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(POSTS, id))
    }

    fn posts(&self) -> Result<Vec<LfgPost>, StoreError> {
        Ok(rlock!(self.posts).values().cloned().collect())
    }

    fn post_count(&self) -> Result<usize, StoreError> {
        Ok(rlock!(self.posts).len())
    }
}
