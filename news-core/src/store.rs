use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

/// Anything a [`Store`] can hold: it must expose its own identifier.
pub trait Keyed {
    fn key(&self) -> u64;
}

/// In-memory keyed collection shared between request handlers and background
/// tasks. Every mutation happens under the write lock; ids come from a
/// monotonic counter so concurrent inserts never collide.
#[derive(Debug)]
pub struct Store<T> {
    inner: Arc<RwLock<HashMap<u64, T>>>,
    next_id: Arc<AtomicU64>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<T: Keyed + Clone> Store<T> {
    pub fn empty() -> Self {
        Self::seeded(Vec::new())
    }

    /// Build a store from seed records. The id counter starts one past the
    /// largest seeded key.
    pub fn seeded(items: Vec<T>) -> Self {
        let next = items.iter().map(Keyed::key).max().unwrap_or(0) + 1;
        let map: HashMap<u64, T> = items.into_iter().map(|item| (item.key(), item)).collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
            next_id: Arc::new(AtomicU64::new(next)),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Allocate an id, build the record from it and insert it.
    pub async fn insert_with(&self, build: impl FnOnce(u64) -> T) -> T {
        let item = build(self.next_id());
        self.insert(item.clone()).await;
        item
    }

    pub async fn insert(&self, item: T) {
        let key = item.key();
        let mut inner = self.inner.write().await;
        if inner.insert(key, item).is_some() {
            debug!(id = key, "replaced existing record");
        }
    }

    pub async fn get(&self, id: u64) -> Option<T> {
        self.inner.read().await.get(&id).cloned()
    }

    /// Mutate a record in place and return the updated copy.
    pub async fn update(&self, id: u64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut inner = self.inner.write().await;
        let item = inner.get_mut(&id)?;
        apply(item);
        Some(item.clone())
    }

    /// Unordered snapshot of every record.
    pub async fn values(&self) -> Vec<T> {
        self.inner.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
