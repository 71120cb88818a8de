//! Profile assembly — explicit request/response reads in place of the
//! original's three live listeners.

use thiserror::Error;

use hooplab_core::domain::{validate_gamertag, Build, BuildError, LfgPost};
use hooplab_core::store::{DocumentStore, StoreError};

use crate::auth::Session;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Invalid(#[from] BuildError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Everything the profile page shows.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub email: String,
    pub gamertag: String,
    pub builds: Vec<Build>,
    pub posts: Vec<LfgPost>,
}

impl ProfileView {
    pub fn build_count(&self) -> usize {
        self.builds.len()
    }
}

pub struct ProfileService<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> ProfileService<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Assemble the signed-in user's profile: tag, own builds, own posts.
    pub fn view(&self, session: &Session) -> Result<ProfileView, ProfileError> {
        let user = self.store.user(&session.user_id)?;
        let builds = self
            .store
            .builds()?
            .into_iter()
            .filter(|b| b.user_id == session.user_id)
            .collect();
        let posts = self
            .store
            .posts()?
            .into_iter()
            .filter(|p| p.user_id == session.user_id)
            .collect();
        Ok(ProfileView {
            email: user.email,
            gamertag: user.gamertag,
            builds,
            posts,
        })
    }

    /// Change the user's gamertag. Existing builds keep the tag they were
    /// submitted under; only future submissions pick up the new one.
    pub fn set_gamertag(&self, session: &Session, tag: &str) -> Result<(), ProfileError> {
        validate_gamertag(tag)?;
        let mut user = self.store.user(&session.user_id)?;
        user.gamertag = tag.trim().to_string();
        self.store.update_user(user)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Authenticator;
    use crate::builds::BuildService;
    use crate::lfg::LfgService;
    use hooplab_core::domain::{BuildDraft, GameMode, Position};
    use hooplab_core::store::MemoryStore;

    fn draft() -> BuildDraft {
        BuildDraft {
            position: Position::C,
            role: "Inside C".to_string(),
            height: 84,
            weight: 260,
            wingspan: 88,
            ..BuildDraft::default()
        }
    }

    #[test]
    fn view_collects_only_own_documents() {
        let store = MemoryStore::new();
        let auth = Authenticator::new(&store);
        let me = auth.sign_up("me@example.com", "hunter22").unwrap();
        let them = auth.sign_up("them@example.com", "hunter22").unwrap();

        let builds = BuildService::new(&store);
        builds.submit(&me, &draft(), Some("MyTag01")).unwrap();
        builds.submit(&them, &draft(), Some("Other01")).unwrap();
        LfgService::new(&store)
            .post(&me, GameMode::Fives, "running 5s")
            .unwrap();

        let view = ProfileService::new(&store).view(&me).unwrap();
        assert_eq!(view.gamertag, "MyTag01");
        assert_eq!(view.build_count(), 1);
        assert_eq!(view.posts.len(), 1);
        assert!(view.builds.iter().all(|b| b.user_id == me.user_id));
    }

    #[test]
    fn gamertag_update_applies_to_future_submissions_only() {
        let store = MemoryStore::new();
        let me = Authenticator::new(&store)
            .sign_up("me@example.com", "hunter22")
            .unwrap();
        let builds = BuildService::new(&store);
        let first = builds.submit(&me, &draft(), Some("OldTag99")).unwrap();

        let profile = ProfileService::new(&store);
        profile.set_gamertag(&me, "NewTag99").unwrap();

        let second = builds.submit(&me, &draft(), None).unwrap();
        assert_eq!(first.gamertag, "OldTag99");
        assert_eq!(second.gamertag, "NewTag99");
        assert_eq!(profile.view(&me).unwrap().gamertag, "NewTag99");
    }

    #[test]
    fn short_gamertag_rejected() {
        let store = MemoryStore::new();
        let me = Authenticator::new(&store)
            .sign_up("me@example.com", "hunter22")
            .unwrap();
        assert!(matches!(
            ProfileService::new(&store).set_gamertag(&me, "ab"),
            Err(ProfileError::Invalid(BuildError::GamertagTooShort { .. }))
        ));
    }
}
