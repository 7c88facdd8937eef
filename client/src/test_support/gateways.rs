//! Canned REST gateways and a fixed clock.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::Clock;

use crate::domain::ports::{
    AccountGateway, ApiError, AuthGateway, PasswordGateway, ScheduleGateway,
};
use crate::domain::{
    Appointment, AuthToken, AvatarUpload, DayAvailability, NewAccount, PasswordReset,
    ProfileUpdate, Session, SignInCredentials, User, UserId,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Auth gateway returning a fixed result and recording each email sent.
pub struct StubAuthGateway {
    response: Result<Session, ApiError>,
    emails: Mutex<Vec<String>>,
}

impl StubAuthGateway {
    /// Gateway answering every sign-in with `session`.
    #[must_use]
    pub const fn succeeding(session: Session) -> Self {
        Self {
            response: Ok(session),
            emails: Mutex::new(Vec::new()),
        }
    }

    /// Gateway rejecting every sign-in with `error`.
    #[must_use]
    pub const fn failing(error: ApiError) -> Self {
        Self {
            response: Err(error),
            emails: Mutex::new(Vec::new()),
        }
    }

    /// E-mails sent, in call order.
    #[must_use]
    pub fn emails(&self) -> Vec<String> {
        lock(&self.emails).clone()
    }

    /// Number of sign-in requests.
    #[must_use]
    pub fn call_count(&self) -> usize {
        lock(&self.emails).len()
    }
}

#[async_trait]
impl AuthGateway for StubAuthGateway {
    async fn create_session(&self, credentials: &SignInCredentials) -> Result<Session, ApiError> {
        lock(&self.emails).push(credentials.email().to_owned());
        self.response.clone()
    }
}

/// One call observed by [`StubAccountGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountCall {
    /// `create_account`.
    CreateAccount {
        /// Submitted e-mail.
        email: String,
    },
    /// `update_profile`.
    UpdateProfile {
        /// Bearer token used.
        token: String,
        /// Whether password fields were sent.
        with_password: bool,
    },
    /// `upload_avatar`.
    UploadAvatar {
        /// Bearer token used.
        token: String,
        /// Uploaded file name.
        file_name: String,
    },
}

/// Account gateway answering every call with the same user or error.
pub struct StubAccountGateway {
    response: Result<User, ApiError>,
    calls: Mutex<Vec<AccountCall>>,
}

impl StubAccountGateway {
    /// Gateway answering every call with `user`.
    #[must_use]
    pub const fn succeeding(user: User) -> Self {
        Self {
            response: Ok(user),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Gateway failing every call with `error`.
    #[must_use]
    pub const fn failing(error: ApiError) -> Self {
        Self {
            response: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<AccountCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl AccountGateway for StubAccountGateway {
    async fn create_account(&self, account: &NewAccount) -> Result<User, ApiError> {
        lock(&self.calls).push(AccountCall::CreateAccount {
            email: account.email.clone(),
        });
        self.response.clone()
    }

    async fn update_profile(
        &self,
        token: &AuthToken,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        lock(&self.calls).push(AccountCall::UpdateProfile {
            token: token.expose().to_owned(),
            with_password: update.password_change.is_some(),
        });
        self.response.clone()
    }

    async fn upload_avatar(
        &self,
        token: &AuthToken,
        avatar: &AvatarUpload,
    ) -> Result<User, ApiError> {
        lock(&self.calls).push(AccountCall::UploadAvatar {
            token: token.expose().to_owned(),
            file_name: avatar.file_name.clone(),
        });
        self.response.clone()
    }
}

/// One call observed by [`StubPasswordGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordCall {
    /// `request_reset`.
    RequestReset {
        /// Submitted e-mail.
        email: String,
    },
    /// `reset_password`.
    ResetPassword {
        /// Reset token sent.
        token: String,
    },
}

/// Password gateway with a fixed outcome.
pub struct StubPasswordGateway {
    response: Result<(), ApiError>,
    calls: Mutex<Vec<PasswordCall>>,
}

impl StubPasswordGateway {
    /// Gateway accepting every call.
    #[must_use]
    pub const fn succeeding() -> Self {
        Self {
            response: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Gateway failing every call with `error`.
    #[must_use]
    pub const fn failing(error: ApiError) -> Self {
        Self {
            response: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<PasswordCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl PasswordGateway for StubPasswordGateway {
    async fn request_reset(&self, email: &str) -> Result<(), ApiError> {
        lock(&self.calls).push(PasswordCall::RequestReset {
            email: email.to_owned(),
        });
        self.response.clone()
    }

    async fn reset_password(&self, reset: &PasswordReset) -> Result<(), ApiError> {
        lock(&self.calls).push(PasswordCall::ResetPassword {
            token: reset.token.clone(),
        });
        self.response.clone()
    }
}

/// Schedule gateway serving fixed availability and appointments.
#[derive(Default)]
pub struct StubScheduleGateway {
    availability: Vec<DayAvailability>,
    appointments: Vec<Appointment>,
    providers: Mutex<Vec<String>>,
}

impl StubScheduleGateway {
    /// Gateway serving `availability` and `appointments` to every caller.
    #[must_use]
    pub const fn new(availability: Vec<DayAvailability>, appointments: Vec<Appointment>) -> Self {
        Self {
            availability,
            appointments,
            providers: Mutex::new(Vec::new()),
        }
    }

    /// Provider ids passed to `month_availability`, in call order.
    #[must_use]
    pub fn providers(&self) -> Vec<String> {
        lock(&self.providers).clone()
    }
}

#[async_trait]
impl ScheduleGateway for StubScheduleGateway {
    async fn month_availability(
        &self,
        _token: &AuthToken,
        provider_id: &UserId,
        _year: i32,
        _month: u32,
    ) -> Result<Vec<DayAvailability>, ApiError> {
        lock(&self.providers).push(provider_id.to_string());
        Ok(self.availability.clone())
    }

    async fn appointments_on(
        &self,
        _token: &AuthToken,
        _date: NaiveDate,
    ) -> Result<Vec<Appointment>, ApiError> {
        Ok(self.appointments.clone())
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    /// Clock reporting `utc_now` forever.
    #[must_use]
    pub const fn new(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}
