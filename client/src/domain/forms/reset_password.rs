//! Reset-password form.

use std::sync::Arc;

use url::form_urlencoded;
use zeroize::Zeroizing;

use super::{
    FormCopy, FormServices, FormSpec, FormState, SubmissionOutcome, ToastCopy, fields, messages,
    submit_form,
};
use crate::domain::ports::PasswordGateway;
use crate::domain::validation::{Constraint, Rule, Schema};
use crate::domain::{FieldSet, PasswordReset, RemoteFailure, Route};

const COPY: FormCopy = FormCopy {
    success: ToastCopy::new("Password reset", "Your new password has been saved."),
    failure: ToastCopy::new(
        "Password reset failed",
        "Could not reset your password. Please try again.",
    ),
};

/// Password required; confirmation must match it.
#[must_use]
pub fn reset_password_schema() -> Schema {
    Schema::new()
        .rule(Rule::new(fields::PASSWORD, Constraint::Required, messages::PASSWORD_REQUIRED))
        .rule(Rule::new(
            fields::PASSWORD_CONFIRMATION,
            Constraint::EqualsField(fields::PASSWORD),
            messages::PASSWORD_MISMATCH,
        ))
}

/// Extract the non-empty `token` parameter from a location.
///
/// Accepts a bare query (`?token=abc` or `token=abc`) or a full URL.
///
/// # Examples
/// ```
/// use barber_client::domain::forms::reset_token_from_query;
///
/// assert_eq!(
///     reset_token_from_query("http://localhost:3000/reset-password?token=abc#top"),
///     Some("abc".to_owned())
/// );
/// assert_eq!(reset_token_from_query("?token="), None);
/// ```
#[must_use]
pub fn reset_token_from_query(location: &str) -> Option<String> {
    let after_mark = location.split_once('?').map_or(location, |(_, rest)| rest);
    let query = after_mark.split_once('#').map_or(after_mark, |(head, _)| head);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

/// Sets a new password from an emailed link, then returns to sign-in.
pub struct ResetPasswordForm {
    passwords: Arc<dyn PasswordGateway>,
    services: FormServices,
    spec: FormSpec,
    state: FormState,
}

impl ResetPasswordForm {
    /// Reset-password form reporting through `services`.
    #[must_use]
    pub fn new(passwords: Arc<dyn PasswordGateway>, services: FormServices) -> Self {
        Self {
            passwords,
            services,
            spec: FormSpec {
                name: "reset-password",
                schema: reset_password_schema(),
                copy: COPY,
                destination: Some(Route::Root),
            },
            state: FormState::default(),
        }
    }

    /// Status and field errors of the latest attempt.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Submit using the token found in `location`.
    ///
    /// A missing token is reported like any other remote failure, after the
    /// field set has validated.
    pub async fn submit(&self, input: &FieldSet, location: &str) -> SubmissionOutcome {
        submit_form(&self.state, &self.services, &self.spec, input, || async {
            let token = reset_token_from_query(location).ok_or(RemoteFailure::MissingResetToken)?;
            let reset = PasswordReset {
                password: Zeroizing::new(input.value(fields::PASSWORD).to_owned()),
                password_confirmation: Zeroizing::new(
                    input.value(fields::PASSWORD_CONFIRMATION).to_owned(),
                ),
                token,
            };
            self.passwords.reset_password(&reset).await?;
            Ok::<(), RemoteFailure>(())
        })
        .await
    }
}
