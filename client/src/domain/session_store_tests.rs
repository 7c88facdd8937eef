//! Tests for the session store.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::UserId;
use crate::domain::ports::MockAuthGateway;
use crate::test_support::{RecordingStorage, StorageCall};

fn user() -> User {
    User::new(UserId::new("user-1").expect("id"), "Ada", "ada@example.com")
}

fn session() -> Session {
    Session::new(AuthToken::new("token-123").expect("token"), user())
}

fn user_json() -> String {
    serde_json::to_string(&user()).expect("user json")
}

#[fixture]
fn keys() -> StorageKeys {
    StorageKeys::default()
}

fn gateway_returning(result: Result<Session, ApiError>) -> MockAuthGateway {
    let mut gateway = MockAuthGateway::new();
    gateway
        .expect_create_session()
        .times(1)
        .return_once(move |_| result);
    gateway
}

fn idle_gateway() -> MockAuthGateway {
    let mut gateway = MockAuthGateway::new();
    gateway.expect_create_session().never();
    gateway
}

fn store(storage: &Arc<RecordingStorage>, gateway: MockAuthGateway) -> SessionStore {
    SessionStore::new(storage.clone(), Arc::new(gateway), StorageKeys::default())
}

fn credentials() -> SignInCredentials {
    SignInCredentials::new("ada@example.com", "123123")
}

#[rstest]
fn restore_returns_none_when_storage_is_empty(keys: StorageKeys) {
    let storage = RecordingStorage::new();
    assert!(SessionStore::restore(&storage, &keys).is_none());
}

#[rstest]
fn restore_returns_stored_session(keys: StorageKeys) {
    let storage = RecordingStorage::new()
        .with_entry(keys.token(), "token-123")
        .with_entry(keys.user(), &user_json());
    let restored = SessionStore::restore(&storage, &keys).expect("session");
    assert_eq!(restored, session());
}

#[rstest]
#[case::token_only(true, false)]
#[case::user_only(false, true)]
fn restore_requires_both_keys(keys: StorageKeys, #[case] token: bool, #[case] user: bool) {
    let mut storage = RecordingStorage::new();
    if token {
        storage = storage.with_entry(keys.token(), "token-123");
    }
    if user {
        storage = storage.with_entry(keys.user(), &user_json());
    }
    assert!(SessionStore::restore(&storage, &keys).is_none());
}

#[rstest]
fn restore_treats_malformed_user_as_absent(keys: StorageKeys) {
    let storage = RecordingStorage::new()
        .with_entry(keys.token(), "token-123")
        .with_entry(keys.user(), "{not json");
    assert!(SessionStore::restore(&storage, &keys).is_none());
}

#[rstest]
fn restore_treats_read_errors_as_absent(keys: StorageKeys) {
    let storage = RecordingStorage::new()
        .with_entry(keys.token(), "token-123")
        .with_entry(keys.user(), &user_json());
    storage.fail_reads();
    assert!(SessionStore::restore(&storage, &keys).is_none());
}

#[test]
fn construction_restores_without_calling_the_gateway() {
    let keys = StorageKeys::default();
    let storage = Arc::new(
        RecordingStorage::new()
            .with_entry(keys.token(), "token-123")
            .with_entry(keys.user(), &user_json()),
    );
    let store = store(&storage, idle_gateway());
    assert!(store.is_authenticated());
    assert_eq!(store.user(), Some(user()));
    assert!(
        storage
            .calls()
            .iter()
            .all(|call| matches!(call, StorageCall::Get(_)))
    );
}

#[tokio::test]
async fn sign_in_writes_token_before_user() {
    let storage = Arc::new(RecordingStorage::new());
    let store = store(&storage, gateway_returning(Ok(session())));
    storage.clear_calls();

    let signed_in = store.sign_in(&credentials()).await.expect("sign in");

    assert_eq!(signed_in, session());
    assert_eq!(
        storage.calls(),
        vec![
            StorageCall::Set("@GoBarber:token".into(), "token-123".into()),
            StorageCall::Set("@GoBarber:user".into(), user_json()),
        ]
    );
    assert_eq!(store.token().map(|t| t.expose().to_owned()), Some("token-123".into()));
}

#[tokio::test]
async fn sign_in_propagates_gateway_error_without_writing() {
    let storage = Arc::new(RecordingStorage::new());
    let store = store(
        &storage,
        gateway_returning(Err(ApiError::unauthorized("bad credentials"))),
    );
    storage.clear_calls();

    let error = store.sign_in(&credentials()).await.expect_err("sign in fails");

    assert_eq!(error, SessionError::Gateway(ApiError::unauthorized("bad credentials")));
    assert!(storage.calls().is_empty());
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn sign_in_rolls_back_token_when_user_write_fails() {
    let storage = Arc::new(RecordingStorage::new());
    storage.fail_writes_to("@GoBarber:user");
    let store = store(&storage, gateway_returning(Ok(session())));

    let error = store.sign_in(&credentials()).await.expect_err("write fails");

    assert!(matches!(error, SessionError::Storage(StorageError::Write { .. })));
    assert_eq!(storage.value("@GoBarber:token"), None);
    assert_eq!(storage.value("@GoBarber:user"), None);
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn sign_out_removes_both_keys_and_is_idempotent() {
    let storage = Arc::new(RecordingStorage::new());
    let store = store(&storage, gateway_returning(Ok(session())));
    store.sign_in(&credentials()).await.expect("sign in");
    storage.clear_calls();

    store.sign_out().expect("first sign out");
    store.sign_out().expect("second sign out");

    let removal = vec![
        StorageCall::Remove("@GoBarber:token".into()),
        StorageCall::Remove("@GoBarber:user".into()),
    ];
    assert_eq!(storage.calls(), [removal.clone(), removal].concat());
    assert!(store.session().is_none());
    assert_eq!(storage.value("@GoBarber:token"), None);
}

#[test]
fn sign_out_attempts_both_removals_when_first_fails() {
    let storage = Arc::new(RecordingStorage::new());
    storage.fail_removals_of("@GoBarber:token");
    let store = store(&storage, idle_gateway());

    let error = store.sign_out().expect_err("token removal fails");

    assert!(matches!(error, SessionError::Storage(StorageError::Remove { .. })));
    assert!(storage.calls().contains(&StorageCall::Remove("@GoBarber:user".into())));
    assert!(!store.is_authenticated());
}

#[tokio::test]
async fn update_user_rewrites_user_only() {
    let storage = Arc::new(RecordingStorage::new());
    let store = store(&storage, gateway_returning(Ok(session())));
    store.sign_in(&credentials()).await.expect("sign in");
    storage.clear_calls();

    let renamed = User::new(UserId::new("user-1").expect("id"), "Ada L.", "ada@example.com");
    store.update_user(renamed.clone()).expect("update");

    let expected_json = serde_json::to_string(&renamed).expect("json");
    assert_eq!(
        storage.calls(),
        vec![StorageCall::Set("@GoBarber:user".into(), expected_json)]
    );
    assert_eq!(store.user(), Some(renamed));
    assert_eq!(store.token().map(|t| t.expose().to_owned()), Some("token-123".into()));
}

#[test]
fn update_user_without_session_is_rejected() {
    let storage = Arc::new(RecordingStorage::new());
    let store = store(&storage, idle_gateway());
    storage.clear_calls();

    assert_eq!(store.update_user(user()), Err(SessionError::NotSignedIn));
    assert!(storage.calls().is_empty());
}

#[tokio::test]
async fn update_user_failure_keeps_previous_user() {
    let storage = Arc::new(RecordingStorage::new());
    let store = store(&storage, gateway_returning(Ok(session())));
    store.sign_in(&credentials()).await.expect("sign in");
    storage.fail_writes_to("@GoBarber:user");

    let renamed = User::new(UserId::new("user-1").expect("id"), "Other", "o@example.com");
    assert!(store.update_user(renamed).is_err());
    assert_eq!(store.user(), Some(user()));
}

#[rstest]
fn custom_prefix_changes_both_keys() {
    let keys = StorageKeys::with_prefix("@Test");
    assert_eq!(keys.token(), "@Test:token");
    assert_eq!(keys.user(), "@Test:user");
}
