// crates/mht-layout/src/metrics.rs
//! Screen metrics change notifications.
//!
//! Views subscribe to a [`MetricsWatcher`] and hold the returned
//! [`Subscription`] for as long as they are mounted. Dropping the
//! subscription unregisters the callback, so a torn-down view is never
//! called back.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use tracing::debug;

use crate::device::ScreenMetrics;

type Listener = Arc<dyn Fn(ScreenMetrics) + Send + Sync>;

struct WatcherShared {
    current: RwLock<ScreenMetrics>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

impl WatcherShared {
    fn remove(&self, id: u64) {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

#[derive(Clone)]
pub struct MetricsWatcher {
    shared: Arc<WatcherShared>,
}

impl MetricsWatcher {
    pub fn new(initial: ScreenMetrics) -> Self {
        Self {
            shared: Arc::new(WatcherShared {
                current: RwLock::new(initial),
                listeners: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn current(&self) -> ScreenMetrics {
        *self.shared.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `listener` for future changes. It is not called with the
    /// current metrics; read [`MetricsWatcher::current`] for that.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(ScreenMetrics) + Send + Sync + 'static,
    {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        let listener: Listener = Arc::new(listener);
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));

        Subscription {
            id,
            watcher: Arc::downgrade(&self.shared),
        }
    }

    /// Publish new metrics (rotation, window resize). Listeners run only when
    /// the metrics actually changed.
    pub fn update(&self, metrics: ScreenMetrics) {
        {
            let mut current = self.shared.current.write().unwrap_or_else(PoisonError::into_inner);
            if *current == metrics {
                return;
            }
            *current = metrics;
        }

        // Snapshot so listeners may subscribe or unsubscribe while running.
        let listeners: Vec<Listener> = self
            .shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        debug!(
            "Screen metrics changed to {}x{}, notifying {} listeners",
            metrics.width,
            metrics.height,
            listeners.len()
        );
        for listener in listeners {
            (*listener)(metrics);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Registration handle. The listener is released on drop.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    id: u64,
    watcher: Weak<WatcherShared>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.watcher.upgrade() {
            shared.remove(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_listeners_receive_changes() {
        let watcher = MetricsWatcher::new(ScreenMetrics::new(834.0, 1194.0));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let _subscription = watcher.subscribe(move |metrics| {
            assert_eq!(metrics, ScreenMetrics::new(1194.0, 834.0));
            counter.fetch_add(1, Ordering::SeqCst);
        });

        watcher.update(ScreenMetrics::new(1194.0, 834.0));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(watcher.current(), ScreenMetrics::new(1194.0, 834.0));
    }

    #[test]
    fn test_unchanged_metrics_do_not_notify() {
        let watcher = MetricsWatcher::new(ScreenMetrics::new(390.0, 844.0));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let _subscription = watcher.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        watcher.update(ScreenMetrics::new(390.0, 844.0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_releases_listener() {
        let watcher = MetricsWatcher::new(ScreenMetrics::new(390.0, 844.0));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let subscription = watcher.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(watcher.listener_count(), 1);

        subscription.unsubscribe();
        assert_eq!(watcher.listener_count(), 0);

        watcher.update(ScreenMetrics::new(844.0, 390.0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscription_outliving_watcher() {
        let watcher = MetricsWatcher::new(ScreenMetrics::new(390.0, 844.0));
        let subscription = watcher.subscribe(|_| {});
        drop(watcher);
        drop(subscription);
    }
}
