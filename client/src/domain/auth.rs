//! Sign-in credentials.
//!
//! Shape checks (email format, required fields) belong to the sign-in schema;
//! this type only carries the values to the gateway and keeps the password
//! out of logs.

use std::fmt;

use zeroize::Zeroizing;

/// Email and password sent to `POST sessions`.
#[derive(Clone, PartialEq, Eq)]
pub struct SignInCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl SignInCredentials {
    /// Wrap the submitted values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// E-mail address as typed.
    #[must_use]
    pub const fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plain-text password, for the request body only.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for SignInCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
