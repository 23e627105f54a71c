//! Transient notifications.

use std::time::{Duration, Instant};

/// How long a toast stays visible.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Operation completed.
    Success,
    /// Operation failed.
    Error,
    /// Informational.
    Info,
    /// Needs attention.
    Warning,
}

impl ToastKind {
    /// Short label for rendering.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warn",
        }
    }
}

/// A single notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic identifier.
    pub id: u64,
    /// Severity.
    pub kind: ToastKind,
    /// Text shown to the operator.
    pub message: String,
    /// When the toast was raised.
    pub created_at: Instant,
}

/// Queue of visible notifications.
#[derive(Debug, Default)]
pub struct ToastStore {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastStore {
    /// Raise a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
            created_at: Instant::now(),
        });
        id
    }

    /// Raise a success toast.
    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message)
    }

    /// Raise an error toast.
    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message)
    }

    /// Raise an informational toast.
    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Info, message)
    }

    /// Raise a warning toast.
    pub fn warning(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Warning, message)
    }

    /// Remove a toast; returns whether it was present.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// Drop toasts older than [`TOAST_LIFETIME`] at `now`.
    pub fn expire(&mut self, now: Instant) {
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.created_at) < TOAST_LIFETIME);
    }

    /// Visible toasts, oldest first.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Take every visible toast.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}
