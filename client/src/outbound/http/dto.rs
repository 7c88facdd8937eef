//! Wire DTOs for the GoBarber REST API.
//!
//! Request bodies borrow from domain payloads; responses decode straight into
//! domain types where the shapes already match.

use serde::{Deserialize, Serialize};

use crate::domain::{
    AuthToken, NewAccount, PasswordReset, ProfileUpdate, Session, SignInCredentials, User,
};

#[derive(Debug, Serialize)]
pub(super) struct SessionRequest<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a SignInCredentials> for SessionRequest<'a> {
    fn from(value: &'a SignInCredentials) -> Self {
        Self {
            email: value.email(),
            password: value.password(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SessionResponse {
    pub(super) user: User,
    pub(super) token: AuthToken,
}

impl SessionResponse {
    pub(super) fn into_session(self) -> Session {
        Session::new(self.token, self.user)
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewAccountRequest<'a> {
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a NewAccount> for NewAccountRequest<'a> {
    fn from(value: &'a NewAccount) -> Self {
        Self {
            name: value.name.as_str(),
            email: value.email.as_str(),
            password: value.password.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ForgotPasswordRequest<'a> {
    pub(super) email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResetPasswordRequest<'a> {
    pub(super) password: &'a str,
    pub(super) password_confirmation: &'a str,
    pub(super) token: &'a str,
}

impl<'a> From<&'a PasswordReset> for ResetPasswordRequest<'a> {
    fn from(value: &'a PasswordReset) -> Self {
        Self {
            password: value.password.as_str(),
            password_confirmation: value.password_confirmation.as_str(),
            token: value.token.as_str(),
        }
    }
}

/// `PUT profile` body; password fields are omitted unless changing password.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProfileUpdateRequest<'a> {
    pub(super) name: &'a str,
    pub(super) email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) old_password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) new_password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) password_confirmation: Option<&'a str>,
}

impl<'a> From<&'a ProfileUpdate> for ProfileUpdateRequest<'a> {
    fn from(value: &'a ProfileUpdate) -> Self {
        let change = value.password_change.as_ref();
        Self {
            name: value.name.as_str(),
            email: value.email.as_str(),
            old_password: change.map(|c| c.old_password.as_str()),
            new_password: change.map(|c| c.new_password.as_str()),
            password_confirmation: change.map(|c| c.password_confirmation.as_str()),
        }
    }
}
