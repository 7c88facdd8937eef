//! Driven port for the dashboard's read-only schedule endpoints.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Appointment, AuthToken, DayAvailability, UserId};

use super::ApiError;

/// Remote availability and appointment queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleGateway: Send + Sync {
    /// `GET providers/{id}/month-availability?year&month`, `month` is 1-based.
    async fn month_availability(
        &self,
        token: &AuthToken,
        provider_id: &UserId,
        year: i32,
        month: u32,
    ) -> Result<Vec<DayAvailability>, ApiError>;

    /// `GET appointments/me?day&month&year`.
    async fn appointments_on(
        &self,
        token: &AuthToken,
        date: NaiveDate,
    ) -> Result<Vec<Appointment>, ApiError>;
}
