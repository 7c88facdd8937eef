//! Driven port for `POST sessions`.

use async_trait::async_trait;

use crate::domain::{Session, SignInCredentials};

use super::ApiError;

/// Remote authentication endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a token and user profile.
    async fn create_session(&self, credentials: &SignInCredentials) -> Result<Session, ApiError>;
}
