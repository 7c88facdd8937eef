//! Toast message model.

use std::fmt;

use uuid::Uuid;

/// Visual category of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    /// Neutral information.
    #[default]
    Info,
    /// A completed action.
    Success,
    /// A failed action.
    Error,
}

impl ToastKind {
    /// Lowercase label used when rendering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Unique toast identifier generated on insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(Uuid);

impl ToastId {
    /// Fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A toast before the queue has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToast {
    /// Visual category.
    pub kind: ToastKind,
    /// Headline text.
    pub title: String,
    /// Optional body text.
    pub description: Option<String>,
}

impl NewToast {
    /// Toast of `kind` with a title only.
    #[must_use]
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
        }
    }

    /// Success toast with a title only.
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    /// Error toast with a title only.
    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    /// Attach body text.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A toast owned by the notification queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    id: ToastId,
    kind: ToastKind,
    title: String,
    description: Option<String>,
}

impl ToastMessage {
    pub(crate) fn from_new(id: ToastId, toast: NewToast) -> Self {
        let NewToast {
            kind,
            title,
            description,
        } = toast;
        Self {
            id,
            kind,
            title,
            description,
        }
    }

    /// Identifier assigned by the queue.
    #[must_use]
    pub const fn id(&self) -> ToastId {
        self.id
    }

    /// Visual category.
    #[must_use]
    pub const fn kind(&self) -> ToastKind {
        self.kind
    }

    /// Headline text.
    #[must_use]
    pub const fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Optional body text.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
