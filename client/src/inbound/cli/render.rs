//! Plain-text output for command results.

use std::io::{self, Write};

use chrono::{NaiveDate, TimeZone};

use crate::domain::forms::SubmissionOutcome;
use crate::domain::{Appointment, DaySchedule, Route, ToastMessage, User};

pub(super) fn field_errors(out: &mut dyn Write, outcome: &SubmissionOutcome) -> io::Result<()> {
    if let SubmissionOutcome::ValidationFailed(errors) = outcome {
        for (field, message) in errors.iter() {
            writeln!(out, "{field}: {message}")?;
        }
    }
    Ok(())
}

pub(super) fn toasts(out: &mut dyn Write, messages: &[ToastMessage]) -> io::Result<()> {
    for toast in messages {
        match toast.description() {
            Some(description) => writeln!(
                out,
                "[{}] {}: {description}",
                toast.kind().as_str(),
                toast.title()
            )?,
            None => writeln!(out, "[{}] {}", toast.kind().as_str(), toast.title())?,
        }
    }
    Ok(())
}

pub(super) fn route(out: &mut dyn Write, route: Route) -> io::Result<()> {
    writeln!(out, "-> {route}")
}

pub(super) fn user(out: &mut dyn Write, user: &User) -> io::Result<()> {
    writeln!(out, "{} <{}> ({})", user.name(), user.email(), user.id())
}

pub(super) fn disabled_days(out: &mut dyn Write, days: &[NaiveDate]) -> io::Result<()> {
    if days.is_empty() {
        return writeln!(out, "every day is available");
    }
    for day in days {
        writeln!(out, "{day}")?;
    }
    Ok(())
}

pub(super) fn schedule<Tz>(out: &mut dyn Write, schedule: &DaySchedule, tz: &Tz) -> io::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if schedule.is_empty() {
        return writeln!(out, "no appointments");
    }
    if let Some(next) = &schedule.next {
        write!(out, "next: ")?;
        appointment(out, next, tz)?;
    }
    section(out, "morning", &schedule.morning, tz)?;
    section(out, "afternoon", &schedule.afternoon, tz)
}

fn section<Tz>(out: &mut dyn Write, label: &str, items: &[Appointment], tz: &Tz) -> io::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    writeln!(out, "{label}:")?;
    for item in items {
        write!(out, "  ")?;
        appointment(out, item, tz)?;
    }
    Ok(())
}

fn appointment<Tz>(out: &mut dyn Write, item: &Appointment, tz: &Tz) -> io::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let local = item.date.with_timezone(tz);
    writeln!(out, "{} {}", local.format("%H:%M"), item.user.name)
}
