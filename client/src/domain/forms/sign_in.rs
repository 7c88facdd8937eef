//! Sign-in form.

use std::sync::Arc;

use super::{
    FormCopy, FormServices, FormSpec, FormState, SubmissionOutcome, ToastCopy, fields, messages,
    submit_form,
};
use crate::domain::validation::{Constraint, Rule, Schema};
use crate::domain::{FieldSet, RemoteFailure, Route, SessionStore, SignInCredentials};

const COPY: FormCopy = FormCopy {
    success: ToastCopy::new("Signed in", "Welcome back to GoBarber."),
    failure: ToastCopy::new(
        "Authentication failed",
        "Could not sign in. Check your credentials.",
    ),
};

/// Email required and well formed; password required.
#[must_use]
pub fn sign_in_schema() -> Schema {
    Schema::new()
        .rule(Rule::new(fields::EMAIL, Constraint::Required, messages::EMAIL_REQUIRED))
        .rule(Rule::new(fields::EMAIL, Constraint::Email, messages::EMAIL_INVALID))
        .rule(Rule::new(fields::PASSWORD, Constraint::Required, messages::PASSWORD_REQUIRED))
}

/// Establishes a session and opens the dashboard.
pub struct SignInForm {
    session: Arc<SessionStore>,
    services: FormServices,
    spec: FormSpec,
    state: FormState,
}

impl SignInForm {
    /// Sign-in form reporting through `services`.
    #[must_use]
    pub fn new(session: Arc<SessionStore>, services: FormServices) -> Self {
        Self {
            session,
            services,
            spec: FormSpec {
                name: "sign-in",
                schema: sign_in_schema(),
                copy: COPY,
                destination: Some(Route::Dashboard),
            },
            state: FormState::default(),
        }
    }

    /// Status and field errors of the latest attempt.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Submit `email` and `password`; on success the session is persisted.
    pub async fn submit(&self, input: &FieldSet) -> SubmissionOutcome {
        submit_form(&self.state, &self.services, &self.spec, input, || async {
            let credentials =
                SignInCredentials::new(input.value(fields::EMAIL), input.value(fields::PASSWORD));
            self.session.sign_in(&credentials).await?;
            Ok::<(), RemoteFailure>(())
        })
        .await
    }
}
