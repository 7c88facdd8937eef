//! Dashboard schedule: month availability and the provider's day agenda.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::ports::{ApiError, ScheduleGateway};
use super::{AuthToken, SessionStore, UserId};

/// Local hour at which appointments move from morning to afternoon.
const AFTERNOON_STARTS_AT: u32 = 12;

/// One calendar day from `GET providers/{id}/month-availability`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// Day of the month, 1-based.
    pub day: u32,
    /// Whether the provider has a free slot that day.
    pub available: bool,
}

/// Customer attached to an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCustomer {
    /// Customer display name.
    pub name: String,
    /// Customer avatar URL.
    #[serde(default, alias = "avatar_url", skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// One booked slot from `GET appointments/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Backend identifier.
    pub id: String,
    /// Start time.
    pub date: DateTime<Utc>,
    /// Who booked the slot.
    pub user: AppointmentCustomer,
}

/// Days of `month` the calendar must not offer.
///
/// Entries that do not name a real day of that month are ignored.
///
/// # Examples
/// ```
/// use barber_client::domain::{DayAvailability, disabled_days};
///
/// let days = [
///     DayAvailability { day: 1, available: true },
///     DayAvailability { day: 2, available: false },
///     DayAvailability { day: 31, available: false },
/// ];
/// let disabled = disabled_days(2024, 2, &days);
/// assert_eq!(disabled.len(), 1);
/// assert_eq!(disabled[0].to_string(), "2024-02-02");
/// ```
#[must_use]
pub fn disabled_days(year: i32, month: u32, availability: &[DayAvailability]) -> Vec<NaiveDate> {
    availability
        .iter()
        .filter(|entry| !entry.available)
        .filter_map(|entry| NaiveDate::from_ymd_opt(year, month, entry.day))
        .collect()
}

/// A day's appointments grouped the way the dashboard lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySchedule {
    /// Appointments starting before local noon.
    pub morning: Vec<Appointment>,
    /// Appointments starting at or after local noon.
    pub afternoon: Vec<Appointment>,
    /// Earliest appointment strictly after "now".
    pub next: Option<Appointment>,
}

impl DaySchedule {
    /// Sort by start time and split at local noon in `tz`.
    #[must_use]
    pub fn partition<Tz: TimeZone>(
        mut appointments: Vec<Appointment>,
        now: DateTime<Utc>,
        tz: &Tz,
    ) -> Self {
        appointments.sort_by_key(|appointment| appointment.date);
        let next = appointments
            .iter()
            .find(|appointment| appointment.date > now)
            .cloned();
        let (morning, afternoon) = appointments.into_iter().partition(|appointment| {
            appointment.date.with_timezone(tz).hour() < AFTERNOON_STARTS_AT
        });
        Self {
            morning,
            afternoon,
            next,
        }
    }

    /// `true` when the day has no appointments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.morning.is_empty() && self.afternoon.is_empty()
    }
}

/// Failures raised by [`ScheduleService`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The REST call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Dashboard queries need the provider's token.
    #[error("no user is signed in")]
    NotSignedIn,
}

/// Read-only dashboard queries for the signed-in provider.
pub struct ScheduleService {
    gateway: Arc<dyn ScheduleGateway>,
    session: Arc<SessionStore>,
    clock: Arc<dyn Clock>,
}

impl ScheduleService {
    /// Build the service over the gateway, session and clock.
    #[must_use]
    pub const fn new(
        gateway: Arc<dyn ScheduleGateway>,
        session: Arc<SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway,
            session,
            clock,
        }
    }

    fn token(&self) -> Result<AuthToken, ScheduleError> {
        self.session.token().ok_or(ScheduleError::NotSignedIn)
    }

    /// Availability for every day of `month` (1-based) for `provider_id`.
    pub async fn month_availability(
        &self,
        provider_id: &UserId,
        year: i32,
        month: u32,
    ) -> Result<Vec<DayAvailability>, ScheduleError> {
        let token = self.token()?;
        let days = self
            .gateway
            .month_availability(&token, provider_id, year, month)
            .await?;
        debug!(provider = %provider_id, year, month, days = days.len(), "month availability");
        Ok(days)
    }

    /// The signed-in provider's appointments on `date`, grouped in local time.
    pub async fn day_schedule(&self, date: NaiveDate) -> Result<DaySchedule, ScheduleError> {
        let token = self.token()?;
        let appointments = self.gateway.appointments_on(&token, date).await?;
        debug!(%date, appointments = appointments.len(), "day schedule");
        Ok(DaySchedule::partition(appointments, self.clock.utc(), &Local))
    }
}
