//! Authenticated session primitives.

use std::fmt;

use serde::Deserialize;
use zeroize::Zeroizing;

use super::User;

/// Errors raised when constructing an [`AuthToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidationError {
    /// The token was empty or whitespace.
    EmptyToken,
}

impl fmt::Display for TokenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "auth token must not be empty"),
        }
    }
}

impl std::error::Error for TokenValidationError {}

/// Bearer token issued by `POST sessions`.
///
/// The raw value is zeroised on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Validate and wrap a raw token value.
    ///
    /// # Examples
    /// ```
    /// use barber_client::domain::AuthToken;
    ///
    /// let token = AuthToken::new("token-123").unwrap();
    /// assert_eq!(token.expose(), "token-123");
    /// assert_eq!(format!("{token:?}"), "AuthToken(<redacted>)");
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, TokenValidationError> {
        let value = raw.into();
        if value.trim().is_empty() {
            return Err(TokenValidationError::EmptyToken);
        }
        Ok(Self(Zeroizing::new(value)))
    }

    /// Raw token text, for the `Authorization` header and storage only.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl TryFrom<String> for AuthToken {
    type Error = TokenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Token plus profile for the signed-in user.
///
/// ## Invariants
/// - A session always carries both parts; there is no half-signed-in state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: AuthToken,
    user: User,
}

impl Session {
    /// Pair a token with the user it was issued for.
    #[must_use]
    pub const fn new(token: AuthToken, user: User) -> Self {
        Self { token, user }
    }

    /// Bearer token.
    #[must_use]
    pub const fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Signed-in profile.
    #[must_use]
    pub const fn user(&self) -> &User {
        &self.user
    }

    /// Replace the profile while keeping the token.
    #[must_use]
    pub fn with_user(self, user: User) -> Self {
        Self {
            token: self.token,
            user,
        }
    }
}
