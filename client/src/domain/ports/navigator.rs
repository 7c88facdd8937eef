//! Port for moving between screens after a successful submission.

use crate::domain::Route;

/// Router abstraction; the pipelines only ever push fixed routes.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Show the screen for `route`.
    fn navigate(&self, route: Route);
}
