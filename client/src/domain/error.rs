//! Remote failure kind for the form pipelines.
//!
//! Validation failures are handled inline by the pipelines and never reach
//! this type. Everything else that can go wrong after validation passes is a
//! [`RemoteFailure`], and every variant is surfaced the same way: one static
//! error toast per form.

use thiserror::Error;

use super::SessionError;
use super::ports::ApiError;

/// Failure after validation succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteFailure {
    /// The REST call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Storing or reading the session failed.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// The reset link carried no `token` query parameter.
    #[error("reset link is missing its token")]
    MissingResetToken,
}
