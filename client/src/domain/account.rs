//! Account payloads: registration, password reset, profile and avatar.

use zeroize::Zeroizing;

/// Registration payload for `POST users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Sign-in e-mail address.
    pub email: String,
    /// Chosen password.
    pub password: Zeroizing<String>,
}

/// Payload for `POST password/reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordReset {
    /// New password.
    pub password: Zeroizing<String>,
    /// Repeated new password.
    pub password_confirmation: Zeroizing<String>,
    /// Reset token taken from the emailed link.
    pub token: String,
}

/// Optional password change attached to a profile update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    /// Current password, checked by the backend.
    pub old_password: Zeroizing<String>,
    /// Replacement password.
    pub new_password: Zeroizing<String>,
    /// Repeated replacement password.
    pub password_confirmation: Zeroizing<String>,
}

/// Payload for `PUT profile`.
///
/// ## Invariants
/// - `password_change` is `Some` only when the user typed an old password;
///   otherwise the password fields are left out of the request entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name.
    pub name: String,
    /// New e-mail address.
    pub email: String,
    /// Password fields, sent only when present.
    pub password_change: Option<PasswordChange>,
}

impl ProfileUpdate {
    /// Build the update, dropping password fields when `old_password` is empty.
    ///
    /// # Examples
    /// ```
    /// use barber_client::domain::ProfileUpdate;
    ///
    /// let update = ProfileUpdate::from_fields("Ada", "ada@example.com", "", "ignored", "ignored");
    /// assert!(update.password_change.is_none());
    /// ```
    #[must_use]
    pub fn from_fields(
        name: &str,
        email: &str,
        old_password: &str,
        new_password: &str,
        password_confirmation: &str,
    ) -> Self {
        let password_change = (!old_password.is_empty()).then(|| PasswordChange {
            old_password: Zeroizing::new(old_password.to_owned()),
            new_password: Zeroizing::new(new_password.to_owned()),
            password_confirmation: Zeroizing::new(password_confirmation.to_owned()),
        });
        Self {
            name: name.to_owned(),
            email: email.to_owned(),
            password_change,
        }
    }
}

/// Image uploaded through `PATCH users/avatar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUpload {
    /// Original file name, sent as the multipart file name.
    pub file_name: String,
    /// MIME type of `bytes`.
    pub content_type: String,
    /// Image contents.
    pub bytes: Vec<u8>,
}

impl AvatarUpload {
    /// Build an upload, guessing the content type from the file extension.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = name.into();
        let content_type = content_type_for(&file_name).to_owned();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
