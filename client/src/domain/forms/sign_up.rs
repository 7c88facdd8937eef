//! Sign-up form.

use std::sync::Arc;

use zeroize::Zeroizing;

use super::{
    FormCopy, FormServices, FormSpec, FormState, MIN_PASSWORD_LENGTH, SubmissionOutcome, ToastCopy,
    fields, messages, submit_form,
};
use crate::domain::ports::AccountGateway;
use crate::domain::validation::{Constraint, Rule, Schema};
use crate::domain::{FieldSet, NewAccount, RemoteFailure, Route};

const COPY: FormCopy = FormCopy {
    success: ToastCopy::new("Account created!", "You can now sign in to GoBarber."),
    failure: ToastCopy::new(
        "Sign-up failed",
        "Could not create your account. Please try again.",
    ),
};

/// Name required; email required and well formed; password of six or more.
#[must_use]
pub fn sign_up_schema() -> Schema {
    Schema::new()
        .rule(Rule::new(fields::NAME, Constraint::Required, messages::NAME_REQUIRED))
        .rule(Rule::new(fields::EMAIL, Constraint::Required, messages::EMAIL_REQUIRED))
        .rule(Rule::new(fields::EMAIL, Constraint::Email, messages::EMAIL_INVALID))
        .rule(Rule::new(fields::PASSWORD, Constraint::Required, messages::PASSWORD_REQUIRED))
        .rule(Rule::new(
            fields::PASSWORD,
            Constraint::MinLength(MIN_PASSWORD_LENGTH),
            messages::PASSWORD_TOO_SHORT,
        ))
}

/// Registers an account and returns to the sign-in screen.
pub struct SignUpForm {
    accounts: Arc<dyn AccountGateway>,
    services: FormServices,
    spec: FormSpec,
    state: FormState,
}

impl SignUpForm {
    /// Sign-up form reporting through `services`.
    #[must_use]
    pub fn new(accounts: Arc<dyn AccountGateway>, services: FormServices) -> Self {
        Self {
            accounts,
            services,
            spec: FormSpec {
                name: "sign-up",
                schema: sign_up_schema(),
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

    /// Submit `name`, `email` and `password` to create an account.
    pub async fn submit(&self, input: &FieldSet) -> SubmissionOutcome {
        submit_form(&self.state, &self.services, &self.spec, input, || async {
            let account = NewAccount {
                name: input.value(fields::NAME).to_owned(),
                email: input.value(fields::EMAIL).to_owned(),
                password: Zeroizing::new(input.value(fields::PASSWORD).to_owned()),
            };
            self.accounts.create_account(&account).await?;
            Ok::<(), RemoteFailure>(())
        })
        .await
    }
}
