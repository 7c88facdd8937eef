//! Driven port for the password recovery endpoints.

use async_trait::async_trait;

use crate::domain::PasswordReset;

use super::ApiError;

/// Remote password recovery endpoints. Neither returns a body.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordGateway: Send + Sync {
    /// `POST password/forgot`: email a reset link to `email`.
    async fn request_reset(&self, email: &str) -> Result<(), ApiError>;

    /// `POST password/reset`: set the new password using the emailed token.
    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), ApiError>;
}
