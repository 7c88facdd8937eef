//! Driven port for account endpoints: registration, profile and avatar.

use async_trait::async_trait;

use crate::domain::{AuthToken, AvatarUpload, NewAccount, ProfileUpdate, User};

use super::ApiError;

/// Remote account endpoints.
///
/// Profile and avatar calls are authenticated with the session token; the
/// caller passes it explicitly rather than the adapter holding any auth state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountGateway: Send + Sync {
    /// `POST users`.
    async fn create_account(&self, account: &NewAccount) -> Result<User, ApiError>;

    /// `PUT profile`.
    async fn update_profile(
        &self,
        token: &AuthToken,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError>;

    /// `PATCH users/avatar` as a multipart upload.
    async fn upload_avatar(&self, token: &AuthToken, avatar: &AvatarUpload)
    -> Result<User, ApiError>;
}
