//! Navigator that remembers where a command would have taken the user.

use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::domain::Route;
use crate::domain::ports::Navigator;

/// Holds the last requested route so the command can print it.
#[derive(Debug, Default)]
pub struct CliNavigator {
    last: Mutex<Option<Route>>,
}

impl CliNavigator {
    /// Navigator with no pending route.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending route, leaving none behind.
    #[must_use]
    pub fn take(&self) -> Option<Route> {
        self.last.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

impl Navigator for CliNavigator {
    fn navigate(&self, route: Route) {
        info!(route = %route, "navigate");
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }
}
