//! Command parsing and end-to-end runs over recording doubles.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::Parser;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{
    AccountGateway, ApiError, KeyValueStorage, RemovalScheduler, ScheduleGateway,
};
use crate::domain::{
    AuthToken, DEFAULT_TOAST_DURATION, DayAvailability, Session, StorageKeys, User, UserId,
};
use crate::test_support::{
    AccountCall, FixtureClock, ManualRemovalScheduler, RecordingStorage, StubAccountGateway,
    StubAuthGateway, StubPasswordGateway, StubScheduleGateway,
};

fn ada() -> User {
    User::new(UserId::new("user-1").expect("id"), "Ada", "ada@example.com")
}

fn session() -> Session {
    Session::new(AuthToken::new("token-123").expect("token"), ada())
}

struct Doubles {
    storage: Arc<RecordingStorage>,
    accounts: Arc<StubAccountGateway>,
    schedule: Arc<StubScheduleGateway>,
    scheduler: Arc<ManualRemovalScheduler>,
}

impl Doubles {
    fn app(&self, auth: StubAuthGateway) -> ClientApp {
        ClientApp::new(ClientPorts {
            storage: Arc::clone(&self.storage) as Arc<dyn KeyValueStorage>,
            auth: Arc::new(auth),
            accounts: Arc::clone(&self.accounts) as Arc<dyn AccountGateway>,
            passwords: Arc::new(StubPasswordGateway::succeeding()),
            schedule: Arc::clone(&self.schedule) as Arc<dyn ScheduleGateway>,
            scheduler: Arc::clone(&self.scheduler) as Arc<dyn RemovalScheduler>,
            clock: Arc::new(FixtureClock::new(
                DateTime::parse_from_rfc3339("2024-05-06T10:00:00Z")
                    .expect("timestamp")
                    .with_timezone(&Utc),
            )),
            keys: StorageKeys::default(),
            toast_duration: DEFAULT_TOAST_DURATION,
        })
    }
}

#[fixture]
fn doubles() -> Doubles {
    Doubles {
        storage: Arc::new(RecordingStorage::new()),
        accounts: Arc::new(StubAccountGateway::succeeding(ada())),
        schedule: Arc::new(StubScheduleGateway::new(
            vec![
                DayAvailability { day: 1, available: true },
                DayAvailability { day: 2, available: false },
            ],
            Vec::new(),
        )),
        scheduler: Arc::new(ManualRemovalScheduler::default()),
    }
}

async fn run(app: &ClientApp, args: &[&str]) -> (CommandStatus, String) {
    let cli = Cli::try_parse_from(std::iter::once("barber").chain(args.iter().copied()))
        .expect("arguments parse");
    let mut out = Vec::new();
    let status = app.run(cli.command, &mut out).await.expect("command runs");
    (status, String::from_utf8(out).expect("utf8 output"))
}

#[rstest]
#[case(&["availability", "--year", "2024", "--month", "13"])]
#[case(&["appointments", "--date", "06/05/2024"])]
#[case(&["reset-password", "--password", "secret"])]
fn rejects_malformed_arguments(#[case] args: &[&str]) {
    let parsed = Cli::try_parse_from(std::iter::once("barber").chain(args.iter().copied()));
    assert!(parsed.is_err());
}

#[test]
fn profile_password_flags_default_to_empty() {
    let cli = Cli::try_parse_from(["barber", "profile", "--name", "Ada", "--email", "a@b.co"])
        .expect("arguments parse");
    let Command::Profile(args) = cli.command else {
        panic!("expected profile command");
    };
    assert!(args.old_password.is_empty());
    assert!(args.new_password.is_empty());
}

#[rstest]
#[tokio::test]
async fn sign_in_prints_toast_and_destination(doubles: Doubles) {
    let app = doubles.app(StubAuthGateway::succeeding(session()));

    let (status, output) = run(
        &app,
        &["sign-in", "--email", "ada@example.com", "--password", "secret"],
    )
    .await;

    assert_eq!(status, CommandStatus::Succeeded);
    assert!(output.contains("[success]"), "{output}");
    assert!(output.ends_with("-> /dashboard\n"), "{output}");
    assert_eq!(
        doubles.storage.value("@GoBarber:token").as_deref(),
        Some("token-123")
    );
}

#[rstest]
#[tokio::test]
async fn invalid_sign_in_prints_field_errors_without_toast(doubles: Doubles) {
    let auth = StubAuthGateway::succeeding(session());
    let app = doubles.app(auth);

    let (status, output) = run(&app, &["sign-in", "--email", "not-an-email"]).await;

    assert_eq!(status, CommandStatus::Failed);
    assert!(output.contains("email: Enter a valid e-mail"), "{output}");
    assert!(output.contains("password: Password is required"), "{output}");
    assert!(!output.contains('['), "{output}");
}

#[rstest]
#[tokio::test]
async fn failed_sign_in_prints_error_toast(doubles: Doubles) {
    let app = doubles.app(StubAuthGateway::failing(ApiError::unauthorized("bad")));

    let (status, output) = run(
        &app,
        &["sign-in", "--email", "ada@example.com", "--password", "secret"],
    )
    .await;

    assert_eq!(status, CommandStatus::Failed);
    assert!(output.starts_with("[error]"), "{output}");
    assert!(!output.contains("->"), "{output}");
}

#[rstest]
#[tokio::test]
async fn toasts_are_dismissed_once_printed(doubles: Doubles) {
    let app = doubles.app(StubAuthGateway::failing(ApiError::unauthorized("bad")));
    let args = ["sign-in", "--email", "ada@example.com", "--password", "secret"];

    let (_, first) = run(&app, &args).await;
    let (_, second) = run(&app, &args).await;

    assert_eq!(first, second);
    assert_eq!(doubles.scheduler.cancelled_count(), 2);
}

#[rstest]
#[tokio::test]
async fn whoami_and_sign_out_follow_the_session(doubles: Doubles) {
    let app = doubles.app(StubAuthGateway::succeeding(session()));
    run(
        &app,
        &["sign-in", "--email", "ada@example.com", "--password", "secret"],
    )
    .await;

    let (status, output) = run(&app, &["whoami"]).await;
    assert_eq!(status, CommandStatus::Succeeded);
    assert_eq!(output, "Ada <ada@example.com> (user-1)\n");

    run(&app, &["sign-out"]).await;
    let (status, output) = run(&app, &["whoami"]).await;
    assert_eq!(status, CommandStatus::Failed);
    assert_eq!(output, "not signed in\n");
    assert_eq!(doubles.storage.value("@GoBarber:token"), None);
}

#[rstest]
#[tokio::test]
async fn availability_defaults_to_the_signed_in_provider(doubles: Doubles) {
    let app = doubles.app(StubAuthGateway::succeeding(session()));
    run(
        &app,
        &["sign-in", "--email", "ada@example.com", "--password", "secret"],
    )
    .await;

    let (status, output) = run(&app, &["availability", "--year", "2024", "--month", "5"]).await;

    assert_eq!(status, CommandStatus::Succeeded);
    assert_eq!(output, "2024-05-02\n");
    assert_eq!(doubles.schedule.providers(), vec!["user-1".to_owned()]);
}

#[rstest]
#[tokio::test]
async fn availability_without_session_is_an_error(doubles: Doubles) {
    let app = doubles.app(StubAuthGateway::failing(ApiError::transport("unused")));
    let cli = Cli::try_parse_from(["barber", "availability", "--year", "2024", "--month", "5"])
        .expect("arguments parse");

    let result = app.run(cli.command, &mut Vec::new()).await;

    assert!(matches!(result, Err(CliError::NotSignedIn)));
}

#[rstest]
#[tokio::test]
async fn empty_day_reports_no_appointments(doubles: Doubles) {
    let app = doubles.app(StubAuthGateway::succeeding(session()));
    run(
        &app,
        &["sign-in", "--email", "ada@example.com", "--password", "secret"],
    )
    .await;

    let (_, output) = run(&app, &["appointments", "--date", "2024-05-06"]).await;

    assert_eq!(output, "no appointments\n");
}

#[rstest]
#[tokio::test]
async fn avatar_file_is_read_and_uploaded(doubles: Doubles) {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("me.png");
    std::fs::write(&path, [0x89, b'P', b'N', b'G']).expect("write avatar");
    let app = doubles.app(StubAuthGateway::succeeding(session()));
    run(
        &app,
        &["sign-in", "--email", "ada@example.com", "--password", "secret"],
    )
    .await;

    let path_arg = path.to_str().expect("utf8 path");
    let (status, output) = run(&app, &["avatar", "--file", path_arg]).await;

    assert_eq!(status, CommandStatus::Succeeded);
    assert!(output.contains("[success] Avatar updated"), "{output}");
    assert_eq!(
        doubles.accounts.calls(),
        vec![AccountCall::UploadAvatar {
            token: "token-123".to_owned(),
            file_name: "me.png".to_owned(),
        }]
    );
}

#[rstest]
#[tokio::test]
async fn missing_avatar_file_is_an_error(doubles: Doubles) {
    let app = doubles.app(StubAuthGateway::succeeding(session()));
    let cli = Cli::try_parse_from(["barber", "avatar", "--file", "/nonexistent/me.png"])
        .expect("arguments parse");

    let result = app.run(cli.command, &mut Vec::new()).await;

    assert!(matches!(result, Err(CliError::Avatar { .. })));
    assert!(doubles.accounts.calls().is_empty());
}

#[rstest]
#[tokio::test]
async fn toast_timers_use_configured_duration(doubles: Doubles) {
    let app = doubles.app(StubAuthGateway::failing(ApiError::unauthorized("bad")));
    run(
        &app,
        &["sign-in", "--email", "ada@example.com", "--password", "secret"],
    )
    .await;

    assert_eq!(
        doubles.scheduler.scheduled_delays(),
        vec![Duration::from_millis(3000)]
    );
}
