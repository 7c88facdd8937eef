//! Form submission pipelines.
//!
//! Every page form runs the same sequence: clear field errors, validate the
//! whole field set against the form's [`Schema`], make exactly one remote call
//! when validation passes, then report through the [`NotificationQueue`] and
//! optionally navigate. Validation failures stay inline as field errors;
//! remote failures only ever produce the form's static error toast.

mod avatar;
mod forgot_password;
mod profile;
mod reset_password;
mod sign_in;
mod sign_up;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::ports::Navigator;
use super::{FieldErrorMap, FieldSet, NewToast, NotificationQueue, RemoteFailure, Route, Schema};

pub use avatar::AvatarForm;
pub use forgot_password::{ForgotPasswordForm, forgot_password_schema};
pub use profile::{ProfileForm, profile_schema};
pub use reset_password::{ResetPasswordForm, reset_password_schema, reset_token_from_query};
pub use sign_in::{SignInForm, sign_in_schema};
pub use sign_up::{SignUpForm, sign_up_schema};

/// Field names shared by the form schemas and the CLI.
pub mod fields {
    /// Display name.
    pub const NAME: &str = "name";
    /// E-mail address.
    pub const EMAIL: &str = "email";
    /// Password on sign-in, sign-up and reset.
    pub const PASSWORD: &str = "password";
    /// Repeated password on reset and profile.
    pub const PASSWORD_CONFIRMATION: &str = "passwordConfirmation";
    /// Current password on the profile form.
    pub const OLD_PASSWORD: &str = "oldPassword";
    /// Replacement password on the profile form.
    pub const NEW_PASSWORD: &str = "newPassword";
}

pub(crate) mod messages {
    pub const NAME_REQUIRED: &str = "Name is required";
    pub const EMAIL_REQUIRED: &str = "E-mail is required";
    pub const EMAIL_INVALID: &str = "Enter a valid e-mail";
    pub const PASSWORD_REQUIRED: &str = "Password is required";
    pub const PASSWORD_TOO_SHORT: &str = "At least 6 characters";
    pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
}

pub(crate) const MIN_PASSWORD_LENGTH: usize = 6;

/// Where a form is in its submission cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    /// No attempt in progress.
    #[default]
    Idle,
    /// Checking the field set against the schema.
    Validating,
    /// Waiting for the remote call.
    Submitting,
    /// The last attempt completed its remote call.
    Succeeded,
    /// The last attempt's remote call failed.
    Failed,
    /// The last attempt stopped at validation.
    ValidationFailed,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The remote call succeeded.
    Succeeded,
    /// Validation failed with these field errors; nothing was sent.
    ValidationFailed(FieldErrorMap),
    /// The remote call failed and the error toast was shown.
    Failed,
}

#[derive(Debug, Default)]
struct FormSnapshot {
    status: FormStatus,
    last_outcome: Option<FormStatus>,
    field_errors: FieldErrorMap,
}

/// Observable state of one form: status and inline field errors.
///
/// Field errors survive a finished attempt and are cleared when the next one
/// starts.
#[derive(Debug, Default)]
pub struct FormState {
    inner: Mutex<FormSnapshot>,
}

impl FormState {
    /// Current status.
    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.lock().status
    }

    /// Terminal status of the most recent attempt, if any.
    #[must_use]
    pub fn last_outcome(&self) -> Option<FormStatus> {
        self.lock().last_outcome
    }

    /// Copy of the inline field errors.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrorMap {
        self.lock().field_errors.clone()
    }

    /// Message shown beside `field`, if any.
    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<String> {
        self.lock().field_errors.get(field).map(str::to_owned)
    }

    fn begin(&self) {
        let mut guard = self.lock();
        guard.field_errors = FieldErrorMap::default();
        guard.status = FormStatus::Validating;
    }

    fn set_status(&self, status: FormStatus) {
        self.lock().status = status;
    }

    fn finish(&self, terminal: FormStatus, field_errors: Option<FieldErrorMap>) {
        let mut guard = self.lock();
        if let Some(errors) = field_errors {
            guard.field_errors = errors;
        }
        guard.last_outcome = Some(terminal);
        guard.status = FormStatus::Idle;
    }

    fn lock(&self) -> MutexGuard<'_, FormSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Static toast text for one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastCopy {
    /// Toast headline.
    pub title: &'static str,
    /// Toast body, if any.
    pub description: Option<&'static str>,
}

impl ToastCopy {
    /// Copy with a headline and a body.
    #[must_use]
    pub const fn new(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description: Some(description),
        }
    }

    /// Copy with a headline only.
    #[must_use]
    pub const fn titled(title: &'static str) -> Self {
        Self {
            title,
            description: None,
        }
    }
}

/// Success and failure copy for a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormCopy {
    /// Shown after the remote call succeeds.
    pub success: ToastCopy,
    /// Shown after any remote failure.
    pub failure: ToastCopy,
}

impl FormCopy {
    fn success_toast(&self) -> NewToast {
        with_copy(NewToast::success(self.success.title), self.success)
    }

    fn failure_toast(&self) -> NewToast {
        with_copy(NewToast::error(self.failure.title), self.failure)
    }
}

fn with_copy(toast: NewToast, copy: ToastCopy) -> NewToast {
    match copy.description {
        Some(description) => toast.with_description(description),
        None => toast,
    }
}

/// Static description of one form's pipeline.
#[derive(Debug, Clone)]
pub struct FormSpec {
    /// Form name used in logs.
    pub name: &'static str,
    /// Rules checked before any request.
    pub schema: Schema,
    /// Toast text.
    pub copy: FormCopy,
    /// Screen opened after success.
    pub destination: Option<Route>,
}

/// Collaborators every form reports through.
#[derive(Clone)]
pub struct FormServices {
    /// Queue receiving success and error toasts.
    pub toasts: Arc<NotificationQueue>,
    /// Router receiving the destination after success.
    pub navigator: Arc<dyn Navigator>,
}

impl FormServices {
    /// Bundle the shared collaborators.
    #[must_use]
    pub const fn new(toasts: Arc<NotificationQueue>, navigator: Arc<dyn Navigator>) -> Self {
        Self { toasts, navigator }
    }
}

/// Run one submission attempt.
///
/// `remote` is only invoked when validation passes, and at most once. It must
/// include the form's side effect so the success toast and navigation follow
/// it.
pub(crate) async fn submit_form<F, Fut>(
    state: &FormState,
    services: &FormServices,
    spec: &FormSpec,
    fields: &FieldSet,
    remote: F,
) -> SubmissionOutcome
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), RemoteFailure>>,
{
    state.begin();

    if let Err(errors) = spec.schema.validate(fields) {
        let field_errors = FieldErrorMap::from_violations(&errors);
        debug!(form = spec.name, violations = errors.len(), "validation failed");
        state.finish(FormStatus::ValidationFailed, Some(field_errors.clone()));
        return SubmissionOutcome::ValidationFailed(field_errors);
    }

    state.set_status(FormStatus::Submitting);
    match remote().await {
        Ok(()) => {
            services.toasts.add(spec.copy.success_toast());
            if let Some(route) = spec.destination {
                services.navigator.navigate(route);
            }
            info!(form = spec.name, "submission succeeded");
            state.finish(FormStatus::Succeeded, None);
            SubmissionOutcome::Succeeded
        }
        Err(error) => {
            warn!(form = spec.name, %error, "submission failed");
            services.toasts.add(spec.copy.failure_toast());
            state.finish(FormStatus::Failed, None);
            SubmissionOutcome::Failed
        }
    }
}
