//! Email/password authentication and session persistence.
//!
//! Sign-up creates the user document with default values (empty gamertag,
//! empty like/build/post arrays) in the same step that registers the
//! credentials, so a signed-in user always has a profile to read.
//!
//! Passwords are never stored: each user carries a random salt and a blake3
//! digest of salt + password. The session is a small JSON file next to the
//! data directory; a missing or damaged session file simply reads as
//! signed out.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use hooplab_core::domain::{UserId, UserProfile};
use hooplab_core::store::{DocumentStore, StoreError};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

const SALT_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("an account with email '{email}' already exists")]
    EmailTaken { email: String },

    #[error("'{email}' is not a valid email address")]
    InvalidEmail { email: String },

    #[error("password must be at least {min} characters long")]
    WeakPassword { min: usize },

    #[error("email or password is incorrect")]
    InvalidCredentials,

    #[error("not signed in")]
    NotSignedIn,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("session file error: {0}")]
    Session(#[from] std::io::Error),
}

/// The signed-in identity the services operate on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub email: String,
}

/// Session persistence across CLI invocations.
///
/// Missing or corrupt file reads as signed out rather than erroring — a
/// stale session is worthless, not precious.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<Session> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Credential checks against the user collection.
pub struct Authenticator<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> Authenticator<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Register a new account and return its session.
    pub fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = email.trim();
        if !email.contains('@') || email.len() < 3 {
            return Err(AuthError::InvalidEmail {
                email: email.to_string(),
            });
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.store.user_by_email(email)?.is_some() {
            return Err(AuthError::EmailTaken {
                email: email.to_string(),
            });
        }

        let salt = random_salt();
        let user = UserProfile {
            id: UserId::generate(),
            email: email.to_string(),
            gamertag: String::new(),
            password_digest: digest(&salt, password),
            password_salt: salt,
            liked_builds: Vec::new(),
            builds: Vec::new(),
            posts: Vec::new(),
            created_at: Utc::now(),
        };
        let session = Session {
            user_id: user.id.clone(),
            email: user.email.clone(),
        };
        self.store.create_user(user)?;
        info!(email, "new account created");
        Ok(session)
    }

    /// Check credentials and return a session.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let user = self
            .store
            .user_by_email(email.trim())?
            .ok_or(AuthError::InvalidCredentials)?;
        if digest(&user.password_salt, password) != user.password_digest {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(Session {
            user_id: user.id,
            email: user.email,
        })
    }
}

fn random_salt() -> String {
    let mut bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex_encode(&bytes)
}

fn digest(salt: &str, password: &str) -> String {
    blake3::hash(format!("{salt}:{password}").as_bytes())
        .to_hex()
        .to_string()
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
