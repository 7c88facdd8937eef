//! Wiring of adapters, services and forms behind the CLI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use camino::Utf8PathBuf;
use cap_std::{ambient_authority, fs::Dir};
use chrono::Local;
use mockable::{Clock, DefaultClock};
use thiserror::Error;
use tokio::runtime::Handle;
use url::Url;

use super::{Command, CliNavigator, ProfileArgs, render};
use crate::ClientSettings;
use crate::domain::forms::{
    AvatarForm, ForgotPasswordForm, FormServices, ProfileForm, ResetPasswordForm, SignInForm,
    SignUpForm, SubmissionOutcome, fields,
};
use crate::domain::ports::{
    AccountGateway, AuthGateway, KeyValueStorage, Navigator, PasswordGateway, RemovalScheduler,
    ScheduleGateway, StorageError,
};
use crate::domain::{
    AvatarUpload, FieldSet, NotificationQueue, ScheduleError, ScheduleService, SessionError,
    SessionStore, StorageKeys, UserId, UserValidationError, disabled_days,
};
use crate::outbound::http::HttpApiClient;
use crate::outbound::scheduler::TokioRemovalScheduler;
use crate::outbound::storage::FileStorage;

/// Failures that abort a command instead of being reported as toasts.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configured API base URL does not parse.
    #[error("invalid api base url {url}: {source}")]
    InvalidBaseUrl {
        /// Configured value.
        url: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The storage directory cannot be expressed as UTF-8.
    #[error("storage directory {} is not valid UTF-8", .0.display())]
    NonUtf8StorageDir(PathBuf),
    /// The reqwest client could not be built.
    #[error("cannot build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// The storage directory could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Signing out failed.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// A dashboard query failed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    /// `--provider` was blank.
    #[error("invalid provider id: {0}")]
    InvalidProvider(#[from] UserValidationError),
    /// The avatar file could not be read.
    #[error("cannot read avatar {path}: {source}")]
    Avatar {
        /// Path as given.
        path: String,
        /// Read failure.
        source: io::Error,
    },
    /// The command needs a persisted session.
    #[error("no user is signed in")]
    NotSignedIn,
    /// Writing the report failed.
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Whether the command did what was asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Exit with success.
    Succeeded,
    /// Exit with failure; the reason was printed.
    Failed,
}

impl From<CommandStatus> for ExitCode {
    fn from(value: CommandStatus) -> Self {
        match value {
            CommandStatus::Succeeded => Self::SUCCESS,
            CommandStatus::Failed => Self::FAILURE,
        }
    }
}

/// Every driven adapter the client needs.
pub struct ClientPorts {
    /// Session persistence.
    pub storage: Arc<dyn KeyValueStorage>,
    /// `POST sessions`.
    pub auth: Arc<dyn AuthGateway>,
    /// Registration, profile and avatar endpoints.
    pub accounts: Arc<dyn AccountGateway>,
    /// Password recovery endpoints.
    pub passwords: Arc<dyn PasswordGateway>,
    /// Dashboard endpoints.
    pub schedule: Arc<dyn ScheduleGateway>,
    /// Toast expiry timers.
    pub scheduler: Arc<dyn RemovalScheduler>,
    /// Source of "now" for the dashboard.
    pub clock: Arc<dyn Clock>,
    /// Session storage keys.
    pub keys: StorageKeys,
    /// How long toasts stay visible.
    pub toast_duration: Duration,
}

impl ClientPorts {
    /// Build the production adapters. Toast timers run on `runtime`.
    ///
    /// # Errors
    ///
    /// Fails when the base URL is invalid, the HTTP client cannot be built or
    /// the storage directory cannot be opened.
    pub fn from_settings(settings: &ClientSettings, runtime: Handle) -> Result<Self, CliError> {
        let raw_url = settings.api_base_url();
        let base_url = Url::parse(raw_url).map_err(|source| CliError::InvalidBaseUrl {
            url: raw_url.to_owned(),
            source,
        })?;
        let api = Arc::new(HttpApiClient::new(base_url, settings.request_timeout())?);
        let storage_dir = Utf8PathBuf::from_path_buf(settings.storage_dir())
            .map_err(CliError::NonUtf8StorageDir)?;
        let storage = Arc::new(FileStorage::open(&storage_dir)?);

        Ok(Self {
            storage,
            auth: Arc::clone(&api) as Arc<dyn AuthGateway>,
            accounts: Arc::clone(&api) as Arc<dyn AccountGateway>,
            passwords: Arc::clone(&api) as Arc<dyn PasswordGateway>,
            schedule: api,
            scheduler: Arc::new(TokioRemovalScheduler::new(runtime)),
            clock: Arc::new(DefaultClock),
            keys: StorageKeys::with_prefix(settings.storage_prefix()),
            toast_duration: settings.toast_duration(),
        })
    }
}

/// The client's services and forms, ready to run commands.
pub struct ClientApp {
    session: Arc<SessionStore>,
    toasts: Arc<NotificationQueue>,
    navigator: Arc<CliNavigator>,
    sign_in: SignInForm,
    sign_up: SignUpForm,
    forgot_password: ForgotPasswordForm,
    reset_password: ResetPasswordForm,
    profile: ProfileForm,
    avatar: AvatarForm,
    schedule: ScheduleService,
}

impl ClientApp {
    /// Wire the forms and restore any persisted session.
    #[must_use]
    pub fn new(ports: ClientPorts) -> Self {
        let ClientPorts {
            storage,
            auth,
            accounts,
            passwords,
            schedule,
            scheduler,
            clock,
            keys,
            toast_duration,
        } = ports;

        let session = Arc::new(SessionStore::new(storage, auth, keys));
        let toasts = Arc::new(NotificationQueue::with_duration(scheduler, toast_duration));
        let navigator = Arc::new(CliNavigator::new());
        let services =
            FormServices::new(Arc::clone(&toasts), Arc::clone(&navigator) as Arc<dyn Navigator>);

        Self {
            sign_in: SignInForm::new(Arc::clone(&session), services.clone()),
            sign_up: SignUpForm::new(Arc::clone(&accounts), services.clone()),
            forgot_password: ForgotPasswordForm::new(Arc::clone(&passwords), services.clone()),
            reset_password: ResetPasswordForm::new(passwords, services.clone()),
            profile: ProfileForm::new(
                Arc::clone(&session),
                Arc::clone(&accounts),
                services.clone(),
            ),
            avatar: AvatarForm::new(Arc::clone(&session), accounts, services),
            schedule: ScheduleService::new(schedule, Arc::clone(&session), clock),
            session,
            toasts,
            navigator,
        }
    }

    /// Run one command, writing its report to `out`.
    ///
    /// Form failures are reported and yield [`CommandStatus::Failed`]; only
    /// problems outside the forms surface as errors.
    ///
    /// # Errors
    ///
    /// See [`CliError`].
    pub async fn run(
        &self,
        command: Command,
        out: &mut dyn Write,
    ) -> Result<CommandStatus, CliError> {
        match command {
            Command::SignIn { email, password } => {
                let input = FieldSet::new()
                    .with(fields::EMAIL, email)
                    .with(fields::PASSWORD, password);
                let outcome = self.sign_in.submit(&input).await;
                self.report(out, &outcome)
            }
            Command::SignUp {
                name,
                email,
                password,
            } => {
                let input = FieldSet::new()
                    .with(fields::NAME, name)
                    .with(fields::EMAIL, email)
                    .with(fields::PASSWORD, password);
                let outcome = self.sign_up.submit(&input).await;
                self.report(out, &outcome)
            }
            Command::ForgotPassword { email } => {
                let input = FieldSet::new().with(fields::EMAIL, email);
                let outcome = self.forgot_password.submit(&input).await;
                self.report(out, &outcome)
            }
            Command::ResetPassword {
                link,
                password,
                password_confirmation,
            } => {
                let input = FieldSet::new()
                    .with(fields::PASSWORD, password)
                    .with(fields::PASSWORD_CONFIRMATION, password_confirmation);
                let outcome = self.reset_password.submit(&input, &link).await;
                self.report(out, &outcome)
            }
            Command::Profile(args) => {
                let outcome = self.profile.submit(&profile_fields(args)).await;
                self.report(out, &outcome)
            }
            Command::Avatar { file } => {
                let upload = read_avatar(&file)?;
                let outcome = self.avatar.submit(&upload).await;
                self.report(out, &outcome)
            }
            Command::SignOut => {
                self.session.sign_out()?;
                writeln!(out, "signed out")?;
                Ok(CommandStatus::Succeeded)
            }
            Command::Whoami => self.whoami(out),
            Command::Availability {
                provider,
                year,
                month,
            } => self.availability(out, provider, year, month).await,
            Command::Appointments { date } => {
                let schedule = self.schedule.day_schedule(date).await?;
                render::schedule(out, &schedule, &Local)?;
                Ok(CommandStatus::Succeeded)
            }
        }
    }

    fn whoami(&self, out: &mut dyn Write) -> Result<CommandStatus, CliError> {
        if let Some(user) = self.session.user() {
            render::user(out, &user)?;
            Ok(CommandStatus::Succeeded)
        } else {
            writeln!(out, "not signed in")?;
            Ok(CommandStatus::Failed)
        }
    }

    async fn availability(
        &self,
        out: &mut dyn Write,
        provider_arg: Option<String>,
        year: i32,
        month: u32,
    ) -> Result<CommandStatus, CliError> {
        let provider_id = match provider_arg {
            Some(raw) => UserId::new(raw)?,
            None => self
                .session
                .user()
                .map(|user| user.id().clone())
                .ok_or(CliError::NotSignedIn)?,
        };
        let days = self
            .schedule
            .month_availability(&provider_id, year, month)
            .await?;
        render::disabled_days(out, &disabled_days(year, month, &days))?;
        Ok(CommandStatus::Succeeded)
    }

    /// Print field errors, flush displayed toasts and show the destination.
    fn report(
        &self,
        out: &mut dyn Write,
        outcome: &SubmissionOutcome,
    ) -> Result<CommandStatus, CliError> {
        render::field_errors(out, outcome)?;
        let shown = self.toasts.messages();
        render::toasts(out, &shown)?;
        for toast in &shown {
            self.toasts.remove(toast.id());
        }
        if let Some(route) = self.navigator.take() {
            render::route(out, route)?;
        }
        Ok(match outcome {
            SubmissionOutcome::Succeeded => CommandStatus::Succeeded,
            SubmissionOutcome::ValidationFailed(_) | SubmissionOutcome::Failed => {
                CommandStatus::Failed
            }
        })
    }
}

fn profile_fields(args: ProfileArgs) -> FieldSet {
    FieldSet::new()
        .with(fields::NAME, args.name)
        .with(fields::EMAIL, args.email)
        .with(fields::OLD_PASSWORD, args.old_password)
        .with(fields::NEW_PASSWORD, args.new_password)
        .with(fields::PASSWORD_CONFIRMATION, args.password_confirmation)
}

fn read_avatar(path: &Path) -> Result<AvatarUpload, CliError> {
    let avatar_error = |source: io::Error| CliError::Avatar {
        path: path.display().to_string(),
        source,
    };
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name().ok_or_else(|| {
        avatar_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "avatar path must name a file",
        ))
    })?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(avatar_error)?;
    let bytes = directory.read(file_name).map_err(avatar_error)?;
    Ok(AvatarUpload::new(file_name.to_string_lossy(), bytes))
}
