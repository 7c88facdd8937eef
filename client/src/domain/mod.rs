//! Domain primitives, services and ports.
//!
//! Purpose: hold every rule the client enforces without knowing how requests
//! travel or where bytes are persisted. Adapters live in `inbound` and
//! `outbound` and only meet the domain through [`ports`].
//!
//! Public surface:
//! - [`SessionStore`]: persisted token and user cache.
//! - [`NotificationQueue`]: auto-expiring toasts.
//! - [`forms`]: one submission pipeline per page.
//! - [`ScheduleService`]: dashboard availability and appointment lookups.

pub mod account;
pub mod auth;
pub mod error;
pub mod forms;
pub mod notification_queue;
pub mod ports;
pub mod route;
pub mod schedule;
pub mod session;
pub mod session_store;
pub mod toast;
pub mod user;
pub mod validation;

pub use self::account::{AvatarUpload, NewAccount, PasswordChange, PasswordReset, ProfileUpdate};
pub use self::auth::SignInCredentials;
pub use self::error::RemoteFailure;
pub use self::notification_queue::{DEFAULT_TOAST_DURATION, NotificationQueue};
pub use self::route::Route;
pub use self::schedule::{
    Appointment, AppointmentCustomer, DayAvailability, DaySchedule, ScheduleError,
    ScheduleService, disabled_days,
};
pub use self::session::{AuthToken, Session, TokenValidationError};
pub use self::session_store::{DEFAULT_STORAGE_PREFIX, SessionError, SessionStore, StorageKeys};
pub use self::toast::{NewToast, ToastId, ToastKind, ToastMessage};
pub use self::user::{User, UserId, UserValidationError};
pub use self::validation::{
    FieldErrorMap, FieldSet, FieldViolation, Rule, Schema, ValidationErrors,
};
