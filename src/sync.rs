//! Thread-safe wrapper for concurrent store access.
//!
//! The stores themselves never synchronize: inserts take `&mut self`, so a
//! store can only be mutated from one place at a time. `SyncStore` wraps any
//! [`TimeStore`] in `Arc<RwLock<_>>` so it can be cloned across threads.
//!
//! Enable the `sync` feature to use this module:
//!
//! ```toml
//! [dependencies]
//! timestore = { version = "0.1", features = ["sync"] }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use timestore::{OrderedSamples, SyncStore};
//! use std::thread;
//! use std::time::{Duration, UNIX_EPOCH};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SyncStore::new(OrderedSamples::new());
//!
//! let writer = store.clone();
//! let handle = thread::spawn(move || {
//!     writer.insert(UNIX_EPOCH + Duration::from_secs(2), 2u32).unwrap();
//! });
//!
//! store.insert(UNIX_EPOCH + Duration::from_secs(1), 1u32)?;
//! handle.join().unwrap();
//!
//! assert_eq!(store.len(), 2);
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use crate::storage::TimeStore;
use crate::types::{Sample, StoreStats};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;
use std::time::SystemTime;

/// Thread-safe wrapper around a store using `Arc<RwLock<S>>`.
///
/// Lookups clone matching samples out of the lock. Use [`SyncStore::read`]
/// to borrow without cloning while holding the read guard.
#[derive(Debug)]
pub struct SyncStore<S> {
    inner: Arc<RwLock<S>>,
}

impl<S> Clone for SyncStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: TimeStore> SyncStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Acquire shared access to the wrapped store.
    pub fn read(&self) -> RwLockReadGuard<'_, S> {
        self.inner.read()
    }

    /// Acquire exclusive access to the wrapped store.
    pub fn write(&self) -> RwLockWriteGuard<'_, S> {
        self.inner.write()
    }

    /// Unwrap the store if this is the last handle to it.
    pub fn try_into_inner(self) -> std::result::Result<S, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }

    pub fn insert(&self, timestamp: SystemTime, value: S::Value) -> Result<()> {
        self.inner.write().insert(timestamp, value)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        self.inner.read().stats()
    }
}

impl<S> SyncStore<S>
where
    S: TimeStore,
    S::Value: Clone,
{
    pub fn closest_before(&self, t: SystemTime) -> Option<Sample<S::Value>> {
        self.inner.read().closest_before(t).map(Sample::cloned)
    }

    pub fn closest_after(&self, t: SystemTime) -> Option<Sample<S::Value>> {
        self.inner.read().closest_after(t).map(Sample::cloned)
    }

    pub fn range_before(&self, t: SystemTime) -> Vec<Sample<S::Value>> {
        self.inner.read().range_before(t).map(Sample::cloned).collect()
    }

    pub fn range_after(&self, t: SystemTime) -> Vec<Sample<S::Value>> {
        self.inner.read().range_after(t).map(Sample::cloned).collect()
    }
}
