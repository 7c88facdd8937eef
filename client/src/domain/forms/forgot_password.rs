//! Forgot-password form.

use std::sync::Arc;

use super::{
    FormCopy, FormServices, FormSpec, FormState, SubmissionOutcome, ToastCopy, fields, messages,
    submit_form,
};
use crate::domain::ports::PasswordGateway;
use crate::domain::validation::{Constraint, Rule, Schema};
use crate::domain::{FieldSet, RemoteFailure};

const COPY: FormCopy = FormCopy {
    success: ToastCopy::new(
        "Password recovery e-mail sent",
        "We sent you an e-mail to confirm the password recovery. Check your inbox.",
    ),
    failure: ToastCopy::new(
        "Password recovery failed",
        "Could not recover your password. Please try again.",
    ),
};

/// Email required and well formed.
#[must_use]
pub fn forgot_password_schema() -> Schema {
    Schema::new()
        .rule(Rule::new(fields::EMAIL, Constraint::Required, messages::EMAIL_REQUIRED))
        .rule(Rule::new(fields::EMAIL, Constraint::Email, messages::EMAIL_INVALID))
}

/// Requests a reset link. Stays on the same screen afterwards.
pub struct ForgotPasswordForm {
    passwords: Arc<dyn PasswordGateway>,
    services: FormServices,
    spec: FormSpec,
    state: FormState,
}

impl ForgotPasswordForm {
    /// Forgot-password form reporting through `services`.
    #[must_use]
    pub fn new(passwords: Arc<dyn PasswordGateway>, services: FormServices) -> Self {
        Self {
            passwords,
            services,
            spec: FormSpec {
                name: "forgot-password",
                schema: forgot_password_schema(),
                copy: COPY,
                destination: None,
            },
            state: FormState::default(),
        }
    }

    /// Status and field errors of the latest attempt.
    #[must_use]
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// Submit `email` to request a reset link.
    pub async fn submit(&self, input: &FieldSet) -> SubmissionOutcome {
        submit_form(&self.state, &self.services, &self.spec, input, || async {
            self.passwords
                .request_reset(input.value(fields::EMAIL))
                .await?;
            Ok::<(), RemoteFailure>(())
        })
        .await
    }
}
