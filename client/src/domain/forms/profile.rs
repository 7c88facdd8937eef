//! Profile form.

use std::sync::Arc;

use super::{
    FormCopy, FormServices, FormSpec, FormState, MIN_PASSWORD_LENGTH, SubmissionOutcome, ToastCopy,
    fields, messages, submit_form,
};
use crate::domain::ports::AccountGateway;
use crate::domain::validation::{Constraint, Rule, Schema};
use crate::domain::{FieldSet, ProfileUpdate, RemoteFailure, Route, SessionError, SessionStore};

const COPY: FormCopy = FormCopy {
    success: ToastCopy::new(
        "Profile updated!",
        "Your profile information was updated successfully.",
    ),
    failure: ToastCopy::new(
        "Update failed",
        "Could not update your profile. Please try again.",
    ),
};

/// Name and email as for sign-up; the new password and its confirmation are
/// only checked once an old password has been typed.
#[must_use]
pub fn profile_schema() -> Schema {
    let min = Constraint::MinLength(MIN_PASSWORD_LENGTH);
    Schema::new()
        .rule(Rule::new(fields::NAME, Constraint::Required, messages::NAME_REQUIRED))
        .rule(Rule::new(fields::EMAIL, Constraint::Required, messages::EMAIL_REQUIRED))
        .rule(Rule::new(fields::EMAIL, Constraint::Email, messages::EMAIL_INVALID))
        .rule(
            Rule::new(fields::NEW_PASSWORD, Constraint::Required, messages::PASSWORD_REQUIRED)
                .when_filled(fields::OLD_PASSWORD),
        )
        .rule(
            Rule::new(fields::NEW_PASSWORD, min, messages::PASSWORD_TOO_SHORT)
                .when_filled(fields::OLD_PASSWORD),
        )
        .rule(
            Rule::new(
                fields::PASSWORD_CONFIRMATION,
                Constraint::Required,
                messages::PASSWORD_REQUIRED,
            )
            .when_filled(fields::OLD_PASSWORD),
        )
        .rule(
            Rule::new(fields::PASSWORD_CONFIRMATION, min, messages::PASSWORD_TOO_SHORT)
                .when_filled(fields::OLD_PASSWORD),
        )
        .rule(Rule::new(
            fields::PASSWORD_CONFIRMATION,
            Constraint::EqualsField(fields::NEW_PASSWORD),
            messages::PASSWORD_MISMATCH,
        ))
}

/// Updates the signed-in user's profile and returns home.
pub struct ProfileForm {
    session: Arc<SessionStore>,
    accounts: Arc<dyn AccountGateway>,
    services: FormServices,
    spec: FormSpec,
    state: FormState,
}

impl ProfileForm {
    /// Profile form for the signed-in user.
    #[must_use]
    pub fn new(
        session: Arc<SessionStore>,
        accounts: Arc<dyn AccountGateway>,
        services: FormServices,
    ) -> Self {
        Self {
            session,
            accounts,
            services,
            spec: FormSpec {
                name: "profile",
                schema: profile_schema(),
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

    /// Submit the profile fields; password fields are sent only with an old password.
    pub async fn submit(&self, input: &FieldSet) -> SubmissionOutcome {
        submit_form(&self.state, &self.services, &self.spec, input, || async {
            let token = self
                .session
                .token()
                .ok_or(RemoteFailure::Session(SessionError::NotSignedIn))?;
            let update = ProfileUpdate::from_fields(
                input.value(fields::NAME),
                input.value(fields::EMAIL),
                input.value(fields::OLD_PASSWORD),
                input.value(fields::NEW_PASSWORD),
                input.value(fields::PASSWORD_CONFIRMATION),
            );
            let user = self.accounts.update_profile(&token, &update).await?;
            self.session.update_user(user)?;
            Ok::<(), RemoteFailure>(())
        })
        .await
    }
}
