//! Persisted authentication session.
//!
//! The store mirrors the signed-in [`Session`] into key-value storage under
//! two keys, token first and user second, and keeps an in-memory copy for the
//! rest of the client. It is constructed once and shared; there is no global.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::ports::{ApiError, AuthGateway, KeyValueStorage, StorageError};
use super::{AuthToken, Session, SignInCredentials, User};

/// Storage key prefix used by the shipped web client.
pub const DEFAULT_STORAGE_PREFIX: &str = "@GoBarber";

/// Failures raised by [`SessionStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// `POST sessions` failed.
    #[error("sign-in request failed: {0}")]
    Gateway(#[from] ApiError),
    /// Persisting or clearing the session failed.
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
    /// The user profile could not be encoded as JSON.
    #[error("user profile could not be encoded: {message}")]
    Encode {
        /// Serializer error text.
        message: String,
    },
    /// The operation needs an active session.
    #[error("no user is signed in")]
    NotSignedIn,
}

/// The pair of storage keys holding the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    token: String,
    user: String,
}

impl StorageKeys {
    /// Keys `<prefix>:token` and `<prefix>:user`.
    ///
    /// # Examples
    /// ```
    /// use barber_client::domain::StorageKeys;
    ///
    /// let keys = StorageKeys::default();
    /// assert_eq!(keys.token(), "@GoBarber:token");
    /// assert_eq!(keys.user(), "@GoBarber:user");
    /// ```
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            token: format!("{prefix}:token"),
            user: format!("{prefix}:user"),
        }
    }

    /// Key holding the raw token.
    #[must_use]
    pub const fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Key holding the user profile JSON.
    #[must_use]
    pub const fn user(&self) -> &str {
        self.user.as_str()
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_prefix(DEFAULT_STORAGE_PREFIX)
    }
}

/// Session cache shared by the form pipelines and the dashboard.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    gateway: Arc<dyn AuthGateway>,
    keys: StorageKeys,
    session: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Build the store and restore any persisted session. No request is sent.
    #[must_use]
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        gateway: Arc<dyn AuthGateway>,
        keys: StorageKeys,
    ) -> Self {
        let restored = Self::restore(storage.as_ref(), &keys);
        Self {
            storage,
            gateway,
            keys,
            session: RwLock::new(restored),
        }
    }

    /// Read the persisted session.
    ///
    /// Returns `None` when either key is missing, the stored user is not valid
    /// JSON, or storage cannot be read. Nothing is written back.
    #[must_use]
    pub fn restore(storage: &dyn KeyValueStorage, keys: &StorageKeys) -> Option<Session> {
        let raw_token = read_or_log(storage, keys.token())?;
        let raw_user = read_or_log(storage, keys.user())?;

        let token = match AuthToken::new(raw_token) {
            Ok(token) => token,
            Err(error) => {
                warn!(key = keys.token(), %error, "ignoring stored session");
                return None;
            }
        };
        let user = serde_json::from_str::<User>(&raw_user)
            .inspect_err(|error| warn!(key = keys.user(), %error, "stored user is not valid json"))
            .ok()?;
        debug!(user_id = %user.id(), "restored stored session");
        Some(Session::new(token, user))
    }

    /// Authenticate, persist token then user, and cache the session.
    ///
    /// If the user cannot be written the token write is rolled back so storage
    /// never holds half a session.
    pub async fn sign_in(&self, credentials: &SignInCredentials) -> Result<Session, SessionError> {
        let session = self.gateway.create_session(credentials).await?;
        let user_json = encode_user(session.user())?;

        self.storage.set(self.keys.token(), session.token().expose())?;
        if let Err(error) = self.storage.set(self.keys.user(), &user_json) {
            if let Err(rollback) = self.storage.remove(self.keys.token()) {
                warn!(error = %rollback, "failed to roll back token after user write failed");
            }
            return Err(error.into());
        }

        *self.write() = Some(session.clone());
        info!(user_id = %session.user().id(), "signed in");
        Ok(session)
    }

    /// Clear both keys and the in-memory session.
    ///
    /// Both removals are always attempted; the first failure is returned.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        let token_result = self.storage.remove(self.keys.token());
        let user_result = self.storage.remove(self.keys.user());
        *self.write() = None;
        debug!("signed out");
        token_result?;
        user_result?;
        Ok(())
    }

    /// Replace the cached and persisted user, keeping the token.
    pub fn update_user(&self, user: User) -> Result<(), SessionError> {
        let mut guard = self.write();
        let Some(current) = guard.take() else {
            return Err(SessionError::NotSignedIn);
        };
        let user_json = match encode_user(&user) {
            Ok(json) => json,
            Err(error) => {
                *guard = Some(current);
                return Err(error);
            }
        };
        if let Err(error) = self.storage.set(self.keys.user(), &user_json) {
            *guard = Some(current);
            return Err(error.into());
        }
        *guard = Some(current.with_user(user));
        Ok(())
    }

    /// Copy of the cached session.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.read().clone()
    }

    /// Copy of the signed-in user.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|session| session.user().clone())
    }

    /// Copy of the bearer token.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        self.read().as_ref().map(|session| session.token().clone())
    }

    /// `true` while a session is cached.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Keys the session is persisted under.
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn read_or_log(storage: &dyn KeyValueStorage, key: &str) -> Option<String> {
    storage
        .get(key)
        .inspect_err(|error| warn!(key, %error, "session storage read failed"))
        .ok()
        .flatten()
}

fn encode_user(user: &User) -> Result<String, SessionError> {
    serde_json::to_string(user).map_err(|error| SessionError::Encode {
        message: error.to_string(),
    })
}

#[cfg(test)]
#[path = "session_store_tests.rs"]
mod tests;
