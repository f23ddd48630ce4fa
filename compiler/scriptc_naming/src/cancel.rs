//! Cooperative cancellation of a naming run.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A shared flag checked between top-level symbol iterations.
///
/// Clones observe the same flag, so a host can keep one clone and cancel a
/// run happening on another thread.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    flag: Arc<AtomicBool>,
}

/// The run was cancelled; nothing it computed was committed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error,
)]
#[error("the naming run was cancelled")]
pub struct Cancelled;

impl Cancellation {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Creates a token nobody else holds, so it is never cancelled.
    #[must_use]
    pub fn never() -> Self { Self::default() }

    /// Requests cancellation.
    pub fn cancel(&self) { self.flag.store(true, Ordering::Relaxed); }

    /// Checks if cancellation was requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool { self.flag.load(Ordering::Relaxed) }

    /// Returns `Err(Cancelled)` if cancellation was requested.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}
