//! Limits value object - caller-supplied bounds for slow operations

use std::time::Duration;

/// Time bounds for the two operations that may block indefinitely.
///
/// `None` means unbounded: the operation runs on the caller's thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    pub fetch: Option<Duration>,
    pub compile: Option<Duration>,
}

impl Limits {
    /// No bounds at all
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_fetch(mut self, timeout: Duration) -> Self {
        self.fetch = Some(timeout);
        self
    }

    pub fn with_compile(mut self, timeout: Duration) -> Self {
        self.compile = Some(timeout);
        self
    }

    /// Upper bound for waiting on someone else's fetch + compile.
    ///
    /// Only bounded when both halves are bounded.
    pub fn total(&self) -> Option<Duration> {
        match (self.fetch, self.compile) {
            (Some(fetch), Some(compile)) => Some(fetch + compile),
            _ => None,
        }
    }
}
