//! Contains the [`Handler`] trait, the sink through which every phase of the
//! naming pass reports its diagnostics without aborting the run.

use derive_more::{Deref, DerefMut};
use parking_lot::{RwLock, RwLockReadGuard};

/// Represents a trait responsible for receiving diagnostics produced while the
/// script names are being computed.
///
/// The handler is shared across the worker threads that discover symbols in
/// parallel, hence the `Send + Sync` bound.
pub trait Handler<T>: Send + Sync {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);
}

/// Implements [`Handler`] by collecting every diagnostic into a vector.
#[derive(Debug, Deref, DerefMut)]
pub struct Storage<T: Send + Sync> {
    diagnostics: RwLock<Vec<T>>,
}

impl<T: Send + Sync> Storage<T> {
    /// Creates a new empty [`Storage`].
    #[must_use]
    pub const fn new() -> Self { Self { diagnostics: RwLock::new(Vec::new()) } }

    /// Consumes the [`Storage`] and returns the collected diagnostics in the
    /// order they were received.
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner() }

    /// Returns a read guard over the collected diagnostics.
    pub fn as_vec(&self) -> RwLockReadGuard<Vec<T>> { self.diagnostics.read() }

    /// Returns the number of diagnostics received so far.
    pub fn len(&self) -> usize { self.diagnostics.read().len() }

    /// Returns `true` if no diagnostic has been received.
    pub fn is_empty(&self) -> bool { self.diagnostics.read().is_empty() }
}

impl<T: Send + Sync> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, diagnostic: U) {
        self.diagnostics.write().push(diagnostic.into());
    }
}

/// Handles a diagnostic by panicking with its debug representation.
///
/// Used by tests that expect the input to be free of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Panic;

impl<T: std::fmt::Debug> Handler<T> for Panic {
    fn receive(&self, diagnostic: T) {
        panic!("unexpected diagnostic: {diagnostic:?}");
    }
}
