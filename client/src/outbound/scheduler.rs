//! Tokio-backed toast removal timers.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::domain::ToastId;
use crate::domain::ports::{CancelToken, ExpiryCallback, RemovalScheduler};

/// Spawns one sleeping task per toast on a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioRemovalScheduler {
    handle: Handle,
}

impl TokioRemovalScheduler {
    /// Spawn timers on the runtime behind `handle`.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running on.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

struct AbortOnCancel(JoinHandle<()>);

impl CancelToken for AbortOnCancel {
    fn cancel(self: Box<Self>) {
        self.0.abort();
    }
}

impl RemovalScheduler for TokioRemovalScheduler {
    fn schedule_removal(
        &self,
        id: ToastId,
        delay: Duration,
        on_expire: ExpiryCallback,
    ) -> Box<dyn CancelToken> {
        let task = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::trace!(toast_id = %id, "removal timer fired");
            on_expire();
        });
        Box::new(AbortOnCancel(task))
    }
}
