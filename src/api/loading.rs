//! In-flight request counter backing the global loading indicator.
//!
//! Every foreground API request holds a [`LoadingGuard`] for its whole
//! lifetime, so the counter drops back even when the request fails or the
//! future is cancelled. Observers subscribe to a `watch` channel and react
//! to the count.

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct LoadingTracker {
    tx: Arc<watch::Sender<usize>>,
}

impl Default for LoadingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingTracker {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    /// Count one request as active until the returned guard drops.
    #[must_use]
    pub fn begin(&self) -> LoadingGuard {
        self.increment();
        LoadingGuard { tracker: self.clone() }
    }

    pub fn increment(&self) {
        self.tx.send_modify(|n| *n += 1);
    }

    /// Never goes below zero.
    pub fn decrement(&self) {
        self.tx.send_modify(|n| *n = n.saturating_sub(1));
    }

    #[must_use]
    pub fn active(&self) -> usize {
        *self.tx.borrow()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.active() > 0
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.tx.subscribe()
    }
}

/// Decrements its tracker on drop.
#[derive(Debug)]
pub struct LoadingGuard {
    tracker: LoadingTracker,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.tracker.decrement();
    }
}

#[cfg(test)]
#[path = "loading_test.rs"]
mod tests;
