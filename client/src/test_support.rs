//! Test utilities for the client crate.
//!
//! Recording doubles shared by unit tests (in `src/`) and integration tests
//! (in `tests/`). Compiled for tests and behind the `test-support` feature.

pub mod gateways;

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::domain::ports::{
    CancelToken, ExpiryCallback, KeyValueStorage, Navigator, RemovalScheduler, StorageError,
};
use crate::domain::{Route, ToastId};

pub use gateways::{
    AccountCall, FixtureClock, PasswordCall, StubAccountGateway, StubAuthGateway,
    StubPasswordGateway, StubScheduleGateway,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One call observed by [`RecordingStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    /// `get(key)`.
    Get(String),
    /// `set(key, value)`.
    Set(String, String),
    /// `remove(key)`.
    Remove(String),
}

#[derive(Default)]
struct RecordingState {
    values: HashMap<String, String>,
    calls: Vec<StorageCall>,
    fail_reads: bool,
    failing_writes: HashSet<String>,
    failing_removals: HashSet<String>,
}

/// In-memory storage that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingStorage {
    state: Mutex<RecordingState>,
}

impl RecordingStorage {
    /// Empty storage with no injected failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without recording a call.
    #[must_use]
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        lock(&self.state)
            .values
            .insert(key.to_owned(), value.to_owned());
        self
    }

    /// Calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<StorageCall> {
        lock(&self.state).calls.clone()
    }

    /// Forget the recorded calls, keeping the values.
    pub fn clear_calls(&self) {
        lock(&self.state).calls.clear();
    }

    /// Current value under `key`, without recording a call.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        lock(&self.state).values.get(key).cloned()
    }

    /// Make every later read fail.
    pub fn fail_reads(&self) {
        lock(&self.state).fail_reads = true;
    }

    /// Make later writes to `key` fail.
    pub fn fail_writes_to(&self, key: &str) {
        lock(&self.state).failing_writes.insert(key.to_owned());
    }

    /// Make later removals of `key` fail.
    pub fn fail_removals_of(&self, key: &str) {
        lock(&self.state).failing_removals.insert(key.to_owned());
    }
}

impl KeyValueStorage for RecordingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut state = lock(&self.state);
        state.calls.push(StorageCall::Get(key.to_owned()));
        if state.fail_reads {
            return Err(StorageError::read(key, "injected read failure"));
        }
        Ok(state.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = lock(&self.state);
        state
            .calls
            .push(StorageCall::Set(key.to_owned(), value.to_owned()));
        if state.failing_writes.contains(key) {
            return Err(StorageError::write(key, "injected write failure"));
        }
        state.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut state = lock(&self.state);
        state.calls.push(StorageCall::Remove(key.to_owned()));
        if state.failing_removals.contains(key) {
            return Err(StorageError::remove(key, "injected remove failure"));
        }
        state.values.remove(key);
        Ok(())
    }
}

struct ScheduledRemoval {
    id: ToastId,
    due: Duration,
    delay: Duration,
    callback: Option<ExpiryCallback>,
    cancelled: Arc<AtomicBool>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    entries: Vec<ScheduledRemoval>,
}

/// Removal scheduler driven by an explicit virtual clock.
#[derive(Default)]
pub struct ManualRemovalScheduler {
    state: Mutex<ManualState>,
    cancellations: Arc<AtomicUsize>,
}

struct ManualCancelToken {
    cancelled: Arc<AtomicBool>,
    cancellations: Arc<AtomicUsize>,
}

impl CancelToken for ManualCancelToken {
    fn cancel(self: Box<Self>) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            self.cancellations.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl ManualRemovalScheduler {
    /// Move virtual time forward and run every live callback now due.
    pub fn advance(&self, by: Duration) {
        let due = {
            let mut state = lock(&self.state);
            state.now += by;
            let now = state.now;
            state
                .entries
                .iter_mut()
                .filter(|entry| entry.due <= now && !entry.cancelled.load(Ordering::SeqCst))
                .filter_map(|entry| entry.callback.take())
                .collect::<Vec<_>>()
        };
        for callback in due {
            callback();
        }
    }

    /// Run the callback for `id` even if it was cancelled, as a late timer would.
    pub fn fire(&self, id: ToastId) {
        let callback = lock(&self.state)
            .entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .and_then(|entry| entry.callback.take());
        if let Some(callback) = callback {
            callback();
        }
    }

    /// Number of removals scheduled so far.
    #[must_use]
    pub fn scheduled_count(&self) -> usize {
        lock(&self.state).entries.len()
    }

    /// Delays requested so far, in order.
    #[must_use]
    pub fn scheduled_delays(&self) -> Vec<Duration> {
        lock(&self.state)
            .entries
            .iter()
            .map(|entry| entry.delay)
            .collect()
    }

    /// Number of distinct tokens cancelled.
    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.cancellations.load(Ordering::SeqCst)
    }
}

impl RemovalScheduler for ManualRemovalScheduler {
    fn schedule_removal(
        &self,
        id: ToastId,
        delay: Duration,
        on_expire: ExpiryCallback,
    ) -> Box<dyn CancelToken> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let mut state = lock(&self.state);
        let due = state.now + delay;
        state.entries.push(ScheduledRemoval {
            id,
            due,
            delay,
            callback: Some(on_expire),
            cancelled: Arc::clone(&cancelled),
        });
        Box::new(ManualCancelToken {
            cancelled,
            cancellations: Arc::clone(&self.cancellations),
        })
    }
}

/// Navigator that remembers every route it was sent to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// Routes in navigation order.
    #[must_use]
    pub fn routes(&self) -> Vec<Route> {
        lock(&self.routes).clone()
    }

    /// Most recent route.
    #[must_use]
    pub fn last(&self) -> Option<Route> {
        lock(&self.routes).last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        lock(&self.routes).push(route);
    }
}
