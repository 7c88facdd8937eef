//! Ordered, auto-expiring toast queue.
//!
//! Each added toast gets exactly one scheduled removal. Dismissing a toast by
//! hand cancels that removal; a timer that fires after the toast is already
//! gone finds nothing to remove and does nothing else.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tracing::debug;

use super::ports::{CancelToken, RemovalScheduler};
use super::{NewToast, ToastId, ToastMessage};

/// How long a toast stays visible unless dismissed.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Default)]
struct QueueState {
    messages: Vec<ToastMessage>,
    pending: HashMap<ToastId, Box<dyn CancelToken>>,
}

impl QueueState {
    fn take(&mut self, id: ToastId) -> Option<ToastMessage> {
        let index = self.messages.iter().position(|message| message.id() == id)?;
        Some(self.messages.remove(index))
    }
}

fn lock(state: &Mutex<QueueState>) -> MutexGuard<'_, QueueState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Toasts currently on screen, in insertion order.
pub struct NotificationQueue {
    state: Arc<Mutex<QueueState>>,
    scheduler: Arc<dyn RemovalScheduler>,
    display_for: Duration,
}

impl NotificationQueue {
    /// Queue that shows each toast for [`DEFAULT_TOAST_DURATION`].
    #[must_use]
    pub fn new(scheduler: Arc<dyn RemovalScheduler>) -> Self {
        Self::with_duration(scheduler, DEFAULT_TOAST_DURATION)
    }

    /// Queue that shows each toast for `display_for`.
    #[must_use]
    pub fn with_duration(scheduler: Arc<dyn RemovalScheduler>, display_for: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            scheduler,
            display_for,
        }
    }

    /// Append a toast and schedule its removal.
    pub fn add(&self, toast: NewToast) -> ToastId {
        let id = ToastId::random();
        lock(&self.state)
            .messages
            .push(ToastMessage::from_new(id, toast));

        let weak: Weak<Mutex<QueueState>> = Arc::downgrade(&self.state);
        let handle = self.scheduler.schedule_removal(
            id,
            self.display_for,
            Box::new(move || {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let mut guard = lock(&state);
                guard.pending.remove(&id);
                if guard.take(id).is_some() {
                    debug!(toast_id = %id, "toast expired");
                }
            }),
        );

        // A scheduler may fire synchronously; only track handles for live toasts.
        let mut guard = lock(&self.state);
        if guard.messages.iter().any(|message| message.id() == id) {
            guard.pending.insert(id, handle);
        }
        id
    }

    /// Dismiss a toast. Unknown ids are ignored.
    pub fn remove(&self, id: ToastId) {
        let handle = {
            let mut guard = lock(&self.state);
            if guard.take(id).is_none() {
                return;
            }
            guard.pending.remove(&id)
        };
        if let Some(handle) = handle {
            handle.cancel();
        }
    }

    /// Snapshot of the visible toasts.
    #[must_use]
    pub fn messages(&self) -> Vec<ToastMessage> {
        lock(&self.state).messages.clone()
    }

    /// `true` when no toast is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        lock(&self.state).messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    //! Queue ordering, expiry and cancellation.
    use super::*;
    use crate::domain::ToastKind;
    use crate::test_support::ManualRemovalScheduler;
    use rstest::{fixture, rstest};

    #[fixture]
    fn scheduler() -> Arc<ManualRemovalScheduler> {
        Arc::new(ManualRemovalScheduler::default())
    }

    fn queue(scheduler: &Arc<ManualRemovalScheduler>) -> NotificationQueue {
        NotificationQueue::new(scheduler.clone())
    }

    #[rstest]
    fn messages_keep_insertion_order(scheduler: Arc<ManualRemovalScheduler>) {
        let queue = queue(&scheduler);
        queue.add(NewToast::success("first"));
        queue.add(NewToast::error("second").with_description("details"));
        let titles: Vec<_> = queue
            .messages()
            .iter()
            .map(|message| message.title().to_owned())
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert_eq!(queue.messages()[1].kind(), ToastKind::Error);
        assert_eq!(queue.messages()[1].description(), Some("details"));
    }

    #[rstest]
    fn ids_are_unique(scheduler: Arc<ManualRemovalScheduler>) {
        let queue = queue(&scheduler);
        let a = queue.add(NewToast::success("a"));
        let b = queue.add(NewToast::success("a"));
        assert_ne!(a, b);
    }

    #[rstest]
    fn each_add_schedules_once_with_default_duration(scheduler: Arc<ManualRemovalScheduler>) {
        let queue = queue(&scheduler);
        queue.add(NewToast::success("a"));
        queue.add(NewToast::success("b"));
        assert_eq!(scheduler.scheduled_count(), 2);
        assert_eq!(
            scheduler.scheduled_delays(),
            vec![DEFAULT_TOAST_DURATION, DEFAULT_TOAST_DURATION]
        );
    }

    #[rstest]
    fn toast_expires_after_duration_only(scheduler: Arc<ManualRemovalScheduler>) {
        let queue = queue(&scheduler);
        queue.add(NewToast::success("a"));
        scheduler.advance(Duration::from_millis(2999));
        assert_eq!(queue.messages().len(), 1);
        scheduler.advance(Duration::from_millis(1));
        assert!(queue.is_empty());
    }

    #[rstest]
    fn expiry_removes_only_its_own_toast(scheduler: Arc<ManualRemovalScheduler>) {
        let queue = queue(&scheduler);
        queue.add(NewToast::success("early"));
        scheduler.advance(Duration::from_millis(1000));
        let late = queue.add(NewToast::success("late"));
        scheduler.advance(Duration::from_millis(2000));
        let remaining = queue.messages();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), late);
    }

    #[rstest]
    fn manual_remove_cancels_timer_once(scheduler: Arc<ManualRemovalScheduler>) {
        let queue = queue(&scheduler);
        let id = queue.add(NewToast::success("a"));
        queue.remove(id);
        queue.remove(id);
        assert!(queue.is_empty());
        assert_eq!(scheduler.cancelled_count(), 1);
        scheduler.advance(Duration::from_millis(5000));
        assert!(queue.is_empty());
    }

    #[rstest]
    fn removing_unknown_id_is_a_no_op(scheduler: Arc<ManualRemovalScheduler>) {
        let queue = queue(&scheduler);
        queue.add(NewToast::success("a"));
        queue.remove(ToastId::random());
        assert_eq!(queue.messages().len(), 1);
        assert_eq!(scheduler.cancelled_count(), 0);
    }

    #[rstest]
    fn timer_firing_after_removal_has_no_effect(scheduler: Arc<ManualRemovalScheduler>) {
        let queue = queue(&scheduler);
        let first = queue.add(NewToast::success("a"));
        queue.add(NewToast::success("b"));
        queue.remove(first);
        scheduler.fire(first);
        assert_eq!(queue.messages().len(), 1);
    }

    #[rstest]
    fn custom_duration_is_passed_to_scheduler(scheduler: Arc<ManualRemovalScheduler>) {
        let queue = NotificationQueue::with_duration(scheduler.clone(), Duration::from_millis(50));
        queue.add(NewToast::success("a"));
        assert_eq!(scheduler.scheduled_delays(), vec![Duration::from_millis(50)]);
    }
}
