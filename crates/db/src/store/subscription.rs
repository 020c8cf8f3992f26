//! Scoped change-stream subscriptions.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

use super::{Snapshot, StoreError};

/// Counts live subscriptions.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    active: Arc<AtomicUsize>,
}

impl ListenerRegistry {
    /// Registers a listener; it is released when the guard drops.
    #[must_use]
    pub fn register(&self) -> ListenerGuard {
        self.active.fetch_add(1, Ordering::SeqCst);
        ListenerGuard {
            active: Arc::clone(&self.active),
        }
    }

    /// Number of listeners currently registered.
    #[must_use]
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Keeps one listener registered for its lifetime.
#[derive(Debug)]
pub struct ListenerGuard {
    active: Arc<AtomicUsize>,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A live view of one collection.
///
/// The first call to [`next`](Self::next) yields the snapshot current at
/// subscription time; each later call waits for the next change. Dropping
/// the subscription unregisters it.
#[derive(Debug)]
pub struct Subscription {
    receiver: watch::Receiver<Snapshot>,
    primed: bool,
    _guard: ListenerGuard,
}

impl Subscription {
    /// Wraps a snapshot channel and its registration.
    #[must_use]
    pub const fn new(receiver: watch::Receiver<Snapshot>, guard: ListenerGuard) -> Self {
        Self {
            receiver,
            primed: true,
            _guard: guard,
        }
    }

    /// The most recent snapshot, without waiting.
    #[must_use]
    pub fn current(&self) -> Snapshot {
        Arc::clone(&self.receiver.borrow())
    }

    /// Waits for the next snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SubscriptionClosed` if the store dropped the stream.
    pub async fn next(&mut self) -> Result<Snapshot, StoreError> {
        if std::mem::take(&mut self.primed) {
            return Ok(Arc::clone(&self.receiver.borrow_and_update()));
        }
        self.receiver
            .changed()
            .await
            .map_err(|_| StoreError::SubscriptionClosed)?;
        Ok(Arc::clone(&self.receiver.borrow_and_update()))
    }
}
