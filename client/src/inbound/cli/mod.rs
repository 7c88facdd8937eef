//! Command-line front end.
//!
//! Each subcommand fills one form's field set and submits it, or runs a
//! dashboard query. Toasts raised during a command are printed before it
//! exits.

mod app;
mod navigator;
mod render;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub use app::{ClientApp, ClientPorts, CliError, CommandStatus};
pub use navigator::CliNavigator;

/// `barber` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "barber",
    about = "Sign in, manage the account and read the schedule of a GoBarber backend",
    version
)]
pub struct Cli {
    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Profile fields; the password fields stay empty unless a change is wanted.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ProfileArgs {
    /// New display name.
    #[arg(long, default_value = "")]
    pub name: String,
    /// New e-mail address.
    #[arg(long, default_value = "")]
    pub email: String,
    /// Current password; required to change it.
    #[arg(long = "old-password", default_value = "")]
    pub old_password: String,
    /// Replacement password.
    #[arg(long = "new-password", default_value = "")]
    pub new_password: String,
    /// Replacement password, repeated.
    #[arg(long = "password-confirmation", default_value = "")]
    pub password_confirmation: String,
}

/// `barber` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open a session and persist it.
    SignIn {
        /// Account e-mail.
        #[arg(long, default_value = "")]
        email: String,
        /// Account password.
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Create an account.
    SignUp {
        /// Display name.
        #[arg(long, default_value = "")]
        name: String,
        /// Account e-mail.
        #[arg(long, default_value = "")]
        email: String,
        /// Password of at least six characters.
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Ask for a password reset e-mail.
    ForgotPassword {
        /// Account e-mail.
        #[arg(long, default_value = "")]
        email: String,
    },
    /// Set a new password using the link from the reset e-mail.
    ResetPassword {
        /// Full reset link or just its query string, e.g. `?token=...`.
        #[arg(long, value_name = "url")]
        link: String,
        /// New password.
        #[arg(long, default_value = "")]
        password: String,
        /// New password, repeated.
        #[arg(long = "password-confirmation", default_value = "")]
        password_confirmation: String,
    },
    /// Update name, e-mail and optionally the password.
    Profile(ProfileArgs),
    /// Upload a new avatar image.
    Avatar {
        /// Image file to upload.
        #[arg(long, value_name = "path")]
        file: PathBuf,
    },
    /// Forget the persisted session.
    SignOut,
    /// Print the signed-in user.
    Whoami,
    /// List the days of a month a provider cannot be booked.
    Availability {
        /// Provider id; defaults to the signed-in user.
        #[arg(long, value_name = "id")]
        provider: Option<String>,
        /// Calendar year.
        #[arg(long)]
        year: i32,
        /// Month, 1 to 12.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },
    /// Show the signed-in provider's appointments on one day.
    Appointments {
        /// Day as `YYYY-MM-DD`.
        #[arg(long, value_name = "date")]
        date: NaiveDate,
    },
}

#[cfg(test)]
mod tests;
