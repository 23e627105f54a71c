//! Process-wide session span.

use tracing::{Span, span::Entered};

use crate::init::build_sha;

/// Keeps the `session` span entered for the lifetime of the CLI process.
///
/// Every event emitted while the guard is alive carries the session id and
/// the build identifier.
pub struct SessionGuard {
    _guard: Entered<'static>,
}

impl SessionGuard {
    /// Enter a `session` span tagged with `session_id` and `command`.
    #[must_use]
    pub fn enter(session_id: &str, command: &str) -> Self {
        let span: &'static Span = Box::leak(Box::new(tracing::info_span!(
            "session",
            session_id = %session_id,
            command = %command,
            build_sha = %build_sha()
        )));
        Self {
            _guard: span.enter(),
        }
    }
}
