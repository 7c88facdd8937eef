//! Avatar upload, submitted from the profile screen.

use std::sync::Arc;

use super::{FormCopy, FormServices, FormSpec, FormState, SubmissionOutcome, ToastCopy, submit_form};
use crate::domain::ports::AccountGateway;
use crate::domain::{AvatarUpload, FieldSet, RemoteFailure, Schema, SessionError, SessionStore};

const COPY: FormCopy = FormCopy {
    success: ToastCopy::titled("Avatar updated"),
    failure: ToastCopy::titled("Avatar update failed"),
};

/// Replaces the signed-in user's avatar. Has no fields to validate.
pub struct AvatarForm {
    session: Arc<SessionStore>,
    accounts: Arc<dyn AccountGateway>,
    services: FormServices,
    spec: FormSpec,
    state: FormState,
}

impl AvatarForm {
    /// Avatar form for the signed-in user.
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
                name: "avatar",
                schema: Schema::new(),
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

    /// Upload `upload` and store the returned user.
    pub async fn submit(&self, upload: &AvatarUpload) -> SubmissionOutcome {
        let no_fields = FieldSet::new();
        submit_form(&self.state, &self.services, &self.spec, &no_fields, || async {
            let token = self
                .session
                .token()
                .ok_or(RemoteFailure::Session(SessionError::NotSignedIn))?;
            let user = self.accounts.upload_avatar(&token, upload).await?;
            self.session.update_user(user)?;
            Ok::<(), RemoteFailure>(())
        })
        .await
    }
}
