//! Live collection subscriptions.
//!
//! A repository owns one [`ChangeFeed`] per collection. After every committed
//! write it re-reads the affected user's collection and pushes the full
//! snapshot to each listener registered for that user. Listeners are released
//! through the [`Subscription`] handle returned at registration.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use flashy_core::model::UserId;

use crate::repository::StorageError;

/// Callback receiving the latest snapshot of a collection, or a read failure.
pub type Listener<T> = Arc<dyn Fn(Result<Vec<T>, StorageError>) + Send + Sync>;

struct Entry<T> {
    user: UserId,
    listener: Listener<T>,
}

struct FeedInner<T> {
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, Entry<T>>>,
}

/// Listener registry for one collection, partitioned by user.
pub struct ChangeFeed<T> {
    inner: Arc<FeedInner<T>>,
}

impl<T> Clone for ChangeFeed<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for ChangeFeed<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(FeedInner {
                next_id: AtomicU64::new(1),
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> ChangeFeed<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for changes in `user`'s collection.
    #[must_use]
    pub fn register(&self, user: &UserId, listener: Listener<T>) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut entries) = self.inner.entries.lock() {
            entries.insert(
                id,
                Entry {
                    user: user.clone(),
                    listener,
                },
            );
        }

        let weak: Weak<FeedInner<T>> = Arc::downgrade(&self.inner);
        Subscription::new(id, move || {
            if let Some(inner) = weak.upgrade() {
                if let Ok(mut entries) = inner.entries.lock() {
                    entries.remove(&id);
                }
            }
        })
    }

    /// Push a fresh snapshot to every listener of `user`.
    pub fn publish(&self, user: &UserId, snapshot: &[T]) {
        for listener in self.listeners_for(user) {
            listener(Ok(snapshot.to_vec()));
        }
    }

    /// Report a read failure to every listener of `user`.
    pub fn publish_error(&self, user: &UserId, err: &StorageError) {
        for listener in self.listeners_for(user) {
            listener(Err(err.clone()));
        }
    }

    /// Number of live listeners for `user`.
    #[must_use]
    pub fn listener_count(&self, user: &UserId) -> usize {
        self.inner
            .entries
            .lock()
            .map(|entries| entries.values().filter(|e| &e.user == user).count())
            .unwrap_or(0)
    }

    // Listeners are cloned out so callbacks run without the registry lock held;
    // a callback may drop its own subscription.
    fn listeners_for(&self, user: &UserId) -> Vec<Listener<T>> {
        self.inner
            .entries
            .lock()
            .map(|entries| {
                entries
                    .values()
                    .filter(|e| &e.user == user)
                    .map(|e| Arc::clone(&e.listener))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Handle for a registered listener. Dropping it releases the listener.
pub struct Subscription {
    id: u64,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(id: u64, release: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop receiving updates.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}
