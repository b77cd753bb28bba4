//! Execution context passed through recording operations.
use std::time::Instant;

/// An opaque, cancellation-aware token accompanying every recording call.
///
/// The facade never inspects a context. It is handed to the backend verbatim
/// so the backend can honor deadlines or carry correlation state while
/// recording; whether and how it does so is entirely the backend's contract.
#[derive(Clone, Debug, Default)]
pub struct Context {
    deadline: Option<Instant>,
}

impl Context {
    /// The context of the current execution scope.
    pub fn current() -> Self {
        Context::default()
    }

    /// A copy of this context carrying the given deadline.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        Context {
            deadline: Some(deadline),
        }
    }

    /// The deadline after which work on behalf of this context should stop,
    /// if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}
