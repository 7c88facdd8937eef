//! Port for scheduling toast removal.
//!
//! The notification queue asks for exactly one scheduled removal per toast
//! and cancels it at most once, when the toast is dismissed by hand. Tests
//! substitute a manual clock; the CLI uses tokio timers.

use std::time::Duration;

use crate::domain::ToastId;

/// Callback run when a scheduled removal comes due.
pub type ExpiryCallback = Box<dyn FnOnce() + Send + 'static>;

/// Handle returned by [`RemovalScheduler::schedule_removal`].
pub trait CancelToken: Send {
    /// Prevent the scheduled callback from running. Consumes the token.
    fn cancel(self: Box<Self>);
}

/// Timer service used by the notification queue.
pub trait RemovalScheduler: Send + Sync {
    /// Run `on_expire` once after `delay` unless the returned token is cancelled.
    fn schedule_removal(
        &self,
        id: ToastId,
        delay: Duration,
        on_expire: ExpiryCallback,
    ) -> Box<dyn CancelToken>;
}
