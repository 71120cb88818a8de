//! Build submission, deletion, and likes.
//!
//! Every operation keeps the build collection and the owner's user document
//! consistent: submitting links the new id into `user.builds`, deleting
//! unlinks it, and like/unlike move the id in and out of
//! `user.liked_builds` in the same step that adjusts the counter.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use hooplab_core::domain::{
    validate_gamertag, Build, BuildDraft, BuildError, BuildId,
};
use hooplab_core::store::{DocumentStore, StoreError};

use crate::auth::Session;

#[derive(Debug, Error)]
pub enum BuildServiceError {
    #[error(transparent)]
    Invalid(#[from] BuildError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("a gamertag is required before submitting a build")]
    GamertagRequired,

    #[error("build {id} does not belong to the signed-in user")]
    NotOwner { id: BuildId },

    #[error("build {id} is already in your liked builds")]
    AlreadyLiked { id: BuildId },

    #[error("build {id} is not in your liked builds")]
    NotLiked { id: BuildId },
}

pub struct BuildService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> BuildService<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Validate and submit a draft on behalf of the session's user.
    ///
    /// `gamertag` is required when the user has none yet; when given it also
    /// updates the user document, so the first submission stamps the tag.
    pub fn submit(
        &self,
        session: &Session,
        draft: &BuildDraft,
        gamertag: Option<&str>,
    ) -> Result<Build, BuildServiceError> {
        let mut user = self.store.user(&session.user_id)?;

        let tag = match gamertag {
            Some(tag) => {
                validate_gamertag(tag)?;
                tag.trim().to_string()
            }
            None if user.has_gamertag() => user.gamertag.clone(),
            None => return Err(BuildServiceError::GamertagRequired),
        };

        draft.validate()?;

        let build = Build::from_draft(draft, user.id.clone(), tag.clone(), Utc::now());
        self.store.insert_build(build.clone())?;

        user.gamertag = tag;
        user.builds.push(build.id.clone());
        self.store.update_user(user)?;

        info!(build = %build.id, position = %build.position, "build submitted");
        Ok(build)
    }

    /// Delete a build. Only the owner may delete it; the id is unlinked from
    /// the owner's document in the same operation.
    pub fn delete(&self, session: &Session, id: &BuildId) -> Result<(), BuildServiceError> {
        let build = self.store.build(id)?;
        if build.user_id != session.user_id {
            return Err(BuildServiceError::NotOwner { id: id.clone() });
        }

        self.store.delete_build(id)?;

        let mut user = self.store.user(&session.user_id)?;
        user.builds.retain(|b| b != id);
        self.store.update_user(user)?;

        info!(build = %id, "build deleted");
        Ok(())
    }

    /// Like a build: bump its counter and remember it on the user document.
    pub fn like(&self, session: &Session, id: &BuildId) -> Result<u32, BuildServiceError> {
        let mut user = self.store.user(&session.user_id)?;
        if user.has_liked(id) {
            return Err(BuildServiceError::AlreadyLiked { id: id.clone() });
        }

        let likes = self.store.add_like(id)?;
        user.liked_builds.push(id.clone());
        self.store.update_user(user)?;
        Ok(likes)
    }

    /// Withdraw a like.
    pub fn unlike(&self, session: &Session, id: &BuildId) -> Result<u32, BuildServiceError> {
        let mut user = self.store.user(&session.user_id)?;
        if !user.has_liked(id) {
            return Err(BuildServiceError::NotLiked { id: id.clone() });
        }

        let likes = self.store.remove_like(id)?;
        user.liked_builds.retain(|b| b != id);
        self.store.update_user(user)?;
        Ok(likes)
    }
}
