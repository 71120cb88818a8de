//! JSON-file store — one pretty-printed file per collection under a data
//! directory. Each operation is load-modify-save; there is no partial-write
//! recovery beyond the typed `Corrupt` error, which is deliberate: the store
//! holds user data, so a damaged file must surface instead of silently
//! reading as empty.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Build, BuildId, LfgPost, Position, PostId, UserId, UserProfile};

use super::backend::{DocumentStore, StoreError, BUILDS, POSTS, USERS};

/// File-backed document store rooted at a directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open (and create if needed) a store directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Missing file reads as an empty collection; unparseable content is a
    /// `Corrupt` error.
    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<BTreeMap<String, T>, StoreError> {
        let path = self.collection_path(name);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn save<T: Serialize>(
        &self,
        name: &str,
        collection: &BTreeMap<String, T>,
    ) -> Result<(), StoreError> {
        let path = self.collection_path(name);
        let json = serde_json::to_string_pretty(collection).map_err(|e| StoreError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        fs::write(&path, json)?;
        debug!(collection = name, documents = collection.len(), "saved collection");
        Ok(())
    }
}

impl DocumentStore for JsonStore {
    fn insert_build(&self, build: Build) -> Result<(), StoreError> {
        let mut builds: BTreeMap<String, Build> = self.load(BUILDS)?;
        builds.insert(build.id.0.clone(), build);
        self.save(BUILDS, &builds)
    }

    fn build(&self, id: &BuildId) -> Result<Build, StoreError> {
        self.load::<Build>(BUILDS)?
            .remove(&id.0)
            .ok_or_else(|| StoreError::not_found(BUILDS, id))
    }

    fn delete_build(&self, id: &BuildId) -> Result<(), StoreError> {
        let mut builds: BTreeMap<String, Build> = self.load(BUILDS)?;
        if builds.remove(&id.0).is_none() {
            return Err(StoreError::not_found(BUILDS, id));
        }
        self.save(BUILDS, &builds)
    }

    fn builds(&self) -> Result<Vec<Build>, StoreError> {
        Ok(self.load::<Build>(BUILDS)?.into_values().collect())
    }

    fn peers_by_position(&self, position: Position) -> Result<Vec<Build>, StoreError> {
        Ok(self
            .load::<Build>(BUILDS)?
            .into_values()
            .filter(|b| b.position == position)
            .collect())
    }

    fn add_like(&self, id: &BuildId) -> Result<u32, StoreError> {
        let mut builds: BTreeMap<String, Build> = self.load(BUILDS)?;
        let build = builds
            .get_mut(&id.0)
            .ok_or_else(|| StoreError::not_found(BUILDS, id))?;
        build.likes += 1;
        let likes = build.likes;
        self.save(BUILDS, &builds)?;
        Ok(likes)
    }

    fn remove_like(&self, id: &BuildId) -> Result<u32, StoreError> {
        let mut builds: BTreeMap<String, Build> = self.load(BUILDS)?;
        let build = builds
            .get_mut(&id.0)
            .ok_or_else(|| StoreError::not_found(BUILDS, id))?;
        build.likes = build.likes.saturating_sub(1);
        let likes = build.likes;
        self.save(BUILDS, &builds)?;
        Ok(likes)
    }

    fn create_user(&self, user: UserProfile) -> Result<(), StoreError> {
        let mut users: BTreeMap<String, UserProfile> = self.load(USERS)?;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::DuplicateEmail { email: user.email });
        }
        users.insert(user.id.0.clone(), user);
        self.save(USERS, &users)
    }

    fn user(&self, id: &UserId) -> Result<UserProfile, StoreError> {
        self.load::<UserProfile>(USERS)?
            .remove(&id.0)
            .ok_or_else(|| StoreError::not_found(USERS, id))
    }

    fn user_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self
            .load::<UserProfile>(USERS)?
            .into_values()
            .find(|u| u.email == email))
    }

    fn update_user(&self, user: UserProfile) -> Result<(), StoreError> {
        let mut users: BTreeMap<String, UserProfile> = self.load(USERS)?;
        if !users.contains_key(&user.id.0) {
            return Err(StoreError::not_found(USERS, &user.id));
        }
        users.insert(user.id.0.clone(), user);
        self.save(USERS, &users)
    }

    fn insert_post(&self, post: LfgPost) -> Result<(), StoreError> {
        let mut posts: BTreeMap<String, LfgPost> = self.load(POSTS)?;
        posts.insert(post.id.0.clone(), post);
        self.save(POSTS, &posts)
    }

    fn post(&self, id: &PostId) -> Result<LfgPost, StoreError> {
        self.load::<LfgPost>(POSTS)?
            .remove(&id.0)
            .ok_or_else(|| StoreError::not_found(POSTS, id))
    }

    fn delete_post(&self, id: &PostId) -> Result<(), StoreError> {
        let mut posts: BTreeMap<String, LfgPost> = self.load(POSTS)?;
        if posts.remove(&id.0).is_none() {
            return Err(StoreError::not_found(POSTS, id));
        }
        self.save(POSTS, &posts)
    }

    fn posts(&self) -> Result<Vec<LfgPost>, StoreError> {
        Ok(self.load::<LfgPost>(POSTS)?.into_values().collect())
    }

    fn post_count(&self) -> Result<usize, StoreError> {
        Ok(self.load::<LfgPost>(POSTS)?.len())
    }
}
