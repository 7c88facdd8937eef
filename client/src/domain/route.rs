//! Navigation destinations used by the form pipelines.

use std::fmt;

/// Fixed screens the pipelines can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in screen.
    Root,
    /// Provider dashboard.
    Dashboard,
    /// Registration screen.
    SignUp,
}

impl Route {
    /// URL path of the screen.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Dashboard => "/dashboard",
            Self::SignUp => "/signup",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
