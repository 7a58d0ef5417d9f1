//! Shared store handle
//!
//! [`Store`] does no locking of its own. `SharedStore` puts one behind a
//! `parking_lot::Mutex` so several threads can use the same settings.
//! Every call takes the lock for its whole duration, including file I/O.

use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::error::Result;
use crate::store::{LoadStats, Store};

/// Cloneable, thread-safe handle to a [`Store`]
#[derive(Clone, Debug)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the store for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, Store> {
        self.inner.lock()
    }

    /// Run `f` with the store locked
    pub fn with<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Owned copy of `key`'s value, or of `default` if absent
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.inner.lock().get_string(key, default).to_string()
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.inner.lock().get_int(key, default)
    }

    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.inner.lock().get_float(key, default)
    }

    pub fn set_string(&self, key: &str, value: &str) -> Result<()> {
        self.inner.lock().set_string(key, value)
    }

    pub fn set_int(&self, key: &str, value: i64) -> Result<()> {
        self.inner.lock().set_int(key, value)
    }

    pub fn set_float(&self, key: &str, value: f64) -> Result<()> {
        self.inner.lock().set_float(key, value)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.inner.lock().remove(key)
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadStats> {
        self.inner.lock().load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.lock().save(path)
    }

    /// Take the store back if this is the last handle
    pub fn try_unwrap(self) -> std::result::Result<Store, Self> {
        Arc::try_unwrap(self.inner)
            .map(|mutex| mutex.into_inner())
            .map_err(|inner| Self { inner })
    }
}
