//! Behaviour tests for the sign-in flow and session restore.

use std::cell::RefCell;
use std::sync::Arc;

use barber_client::domain::forms::{FormServices, SignInForm, fields};
use barber_client::domain::ports::{ApiError, KeyValueStorage, Navigator, RemovalScheduler};
use barber_client::domain::{
    AuthToken, FieldSet, NotificationQueue, Route, Session, SessionStore, StorageKeys, ToastKind,
    User, UserId,
};
use barber_client::test_support::{
    ManualRemovalScheduler, RecordingNavigator, RecordingStorage, StubAuthGateway,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

fn returned_user() -> User {
    User::new(UserId::new("user-1").expect("id"), "User", "user@x.com")
}

struct SignInWorld {
    runtime: Runtime,
    storage: Arc<RecordingStorage>,
    navigator: Arc<RecordingNavigator>,
    toasts: Arc<NotificationQueue>,
    gateway: RefCell<Option<Arc<StubAuthGateway>>>,
    store: RefCell<Option<Arc<SessionStore>>>,
    form: RefCell<Option<SignInForm>>,
}

impl SignInWorld {
    fn new() -> Self {
        let scheduler: Arc<dyn RemovalScheduler> = Arc::new(ManualRemovalScheduler::default());
        Self {
            runtime: Runtime::new().expect("tokio runtime should initialize"),
            storage: Arc::new(RecordingStorage::new()),
            navigator: Arc::new(RecordingNavigator::default()),
            toasts: Arc::new(NotificationQueue::new(scheduler)),
            gateway: RefCell::new(None),
            store: RefCell::new(None),
            form: RefCell::new(None),
        }
    }

    fn start_store(&self) -> Arc<SessionStore> {
        let gateway = self
            .gateway
            .borrow()
            .clone()
            .expect("gateway should be configured");
        let store = Arc::new(SessionStore::new(
            Arc::clone(&self.storage) as Arc<dyn KeyValueStorage>,
            gateway,
            StorageKeys::default(),
        ));
        *self.store.borrow_mut() = Some(Arc::clone(&store));
        store
    }

    fn install_form(&self, gateway: StubAuthGateway) {
        *self.gateway.borrow_mut() = Some(Arc::new(gateway));
        let store = self.start_store();
        let services = FormServices::new(
            Arc::clone(&self.toasts),
            Arc::clone(&self.navigator) as Arc<dyn Navigator>,
        );
        *self.form.borrow_mut() = Some(SignInForm::new(store, services));
    }

    fn submit(&self, email: &str, password: &str) {
        let input = FieldSet::new()
            .with(fields::EMAIL, email)
            .with(fields::PASSWORD, password);
        let installed = self.form.borrow();
        let form = installed.as_ref().expect("form should be installed");
        self.runtime.block_on(form.submit(&input));
    }

    fn gateway_calls(&self) -> usize {
        self.gateway
            .borrow()
            .as_ref()
            .map_or(0, |gateway| gateway.call_count())
    }

    fn store(&self) -> Arc<SessionStore> {
        self.store
            .borrow()
            .clone()
            .expect("session store should be started")
    }
}

#[fixture]
fn world() -> SignInWorld {
    SignInWorld::new()
}

#[given("a sign-in form whose gateway accepts every login")]
fn a_sign_in_form_whose_gateway_accepts(world: &SignInWorld) {
    let token = AuthToken::new("token-123").expect("token");
    world.install_form(StubAuthGateway::succeeding(Session::new(
        token,
        returned_user(),
    )));
}

#[given("a sign-in form whose gateway rejects every login")]
fn a_sign_in_form_whose_gateway_rejects(world: &SignInWorld) {
    world.install_form(StubAuthGateway::failing(ApiError::status(
        500_u16,
        "internal error",
    )));
}

#[given("a persisted session with token {token} for {email}")]
fn a_persisted_session(world: &SignInWorld, token: String, email: String) {
    let keys = StorageKeys::default();
    let user = User::new(UserId::new("user-1").expect("id"), "User", email.trim_matches('"'));
    world
        .storage
        .set(keys.token(), token.trim_matches('"'))
        .expect("seed token");
    world
        .storage
        .set(
            keys.user(),
            &serde_json::to_string(&user).expect("user json"),
        )
        .expect("seed user");
    world.storage.clear_calls();
    *world.gateway.borrow_mut() = Some(Arc::new(StubAuthGateway::failing(ApiError::transport(
        "no request expected",
    ))));
}

#[when("the user signs in with {email} and {password}")]
fn the_user_signs_in(world: &SignInWorld, email: String, password: String) {
    world.submit(email.trim_matches('"'), password.trim_matches('"'));
}

#[when("the client starts")]
fn the_client_starts(world: &SignInWorld) {
    world.start_store();
}

#[then("the e-mail field shows {message}")]
fn the_email_field_shows(world: &SignInWorld, message: String) {
    let installed = world.form.borrow();
    let form = installed.as_ref().expect("form should be installed");
    assert_eq!(
        form.state().field_error(fields::EMAIL).as_deref(),
        Some(message.trim_matches('"'))
    );
}

#[then("no sign-in request was sent")]
fn no_sign_in_request_was_sent(world: &SignInWorld) {
    assert_eq!(world.gateway_calls(), 0);
}

#[then("no navigation happened")]
fn no_navigation_happened(world: &SignInWorld) {
    assert!(world.navigator.routes().is_empty());
}

#[then("an error toast titled {title} is shown")]
fn an_error_toast_is_shown(world: &SignInWorld, title: String) {
    let messages = world.toasts.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind(), ToastKind::Error);
    assert_eq!(messages[0].title(), title.trim_matches('"'));
}

#[then("nothing was persisted")]
fn nothing_was_persisted(world: &SignInWorld) {
    let keys = StorageKeys::default();
    assert_eq!(world.storage.value(keys.token()), None);
    assert_eq!(world.storage.value(keys.user()), None);
}

#[then("the persisted token is {token}")]
fn the_persisted_token_is(world: &SignInWorld, token: String) {
    let keys = StorageKeys::default();
    assert_eq!(
        world.storage.value(keys.token()).as_deref(),
        Some(token.trim_matches('"'))
    );
}

#[then("the persisted user matches the signed-in user")]
fn the_persisted_user_matches(world: &SignInWorld) {
    let keys = StorageKeys::default();
    let raw = world.storage.value(keys.user()).expect("user should be stored");
    let stored: User = serde_json::from_str(&raw).expect("stored user json");
    assert_eq!(Some(stored), world.store().user());
}

#[then("the app navigated to {path}")]
fn the_app_navigated_to(world: &SignInWorld, path: String) {
    assert_eq!(
        world.navigator.last().map(Route::path),
        Some(path.trim_matches('"'))
    );
}

#[then("the signed-in user is {email}")]
fn the_signed_in_user_is(world: &SignInWorld, email: String) {
    let user = world.store().user().expect("session should be restored");
    assert_eq!(user.email(), email.trim_matches('"'));
}

#[scenario(
    path = "tests/features/sign_in.feature",
    name = "A malformed e-mail never reaches the API"
)]
fn malformed_email_never_reaches_api(world: SignInWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/sign_in.feature",
    name = "A rejected login shows the error toast"
)]
fn rejected_login_shows_error_toast(world: SignInWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/sign_in.feature",
    name = "A successful login persists the session"
)]
fn successful_login_persists_session(world: SignInWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/sign_in.feature",
    name = "A persisted session is restored without a request"
)]
fn persisted_session_is_restored(world: SignInWorld) {
    drop(world);
}
