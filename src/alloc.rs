//! Allocation capability
//!
//! Every buffer the store creates or grows is requested through a
//! [`BufferAllocator`] first. Production code uses [`SystemAllocator`];
//! tests swap in a [`FailingAllocator`] to exercise out-of-memory paths
//! without touching store logic.
//!
//! The actual reservation always goes through `try_reserve_exact`, so a
//! genuine allocation failure is reported as [`ConfError::OutOfMemory`]
//! instead of aborting the process.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use crate::error::{ConfError, Result};

/// Gatekeeper consulted before each buffer allocation
pub trait BufferAllocator: Send + Sync {
    /// Grant or refuse a request for `bytes` more bytes.
    fn allocate(&self, bytes: usize) -> Result<()>;
}

/// Grants every request
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAllocator;

impl BufferAllocator for SystemAllocator {
    fn allocate(&self, _bytes: usize) -> Result<()> {
        Ok(())
    }
}

/// Fault-injecting allocator
///
/// Grants the next `n` requests after [`fail_after(n)`](Self::fail_after),
/// then refuses everything until re-armed. A fresh instance grants all
/// requests.
#[derive(Debug)]
pub struct FailingAllocator {
    /// Requests left before failing; negative means never fail
    remaining: AtomicI64,
    /// Total requests seen, granted or not
    requests: AtomicU64,
}

impl FailingAllocator {
    pub fn new() -> Self {
        Self {
            remaining: AtomicI64::new(-1),
            requests: AtomicU64::new(0),
        }
    }

    /// Grant the next `n` requests, then refuse
    pub fn fail_after(&self, n: u32) {
        self.remaining.store(i64::from(n), Ordering::SeqCst);
    }

    /// Refuse every request
    pub fn disable(&self) {
        self.fail_after(0);
    }

    /// Grant every request
    pub fn enable(&self) {
        self.remaining.store(-1, Ordering::SeqCst);
    }

    /// Number of requests seen so far
    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }
}

impl Default for FailingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferAllocator for FailingAllocator {
    fn allocate(&self, bytes: usize) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let granted = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                l if l < 0 => Some(l),
                0 => None,
                l => Some(l - 1),
            })
            .is_ok();

        if granted {
            Ok(())
        } else {
            tracing::debug!(bytes, "allocation refused by fault injector");
            Err(ConfError::OutOfMemory(format!(
                "allocation of {} bytes refused",
                bytes
            )))
        }
    }
}

// =============================================================================
// Buffer Helpers
// =============================================================================

/// Copy `text` into a new `String` sized exactly to fit it
pub fn copy_text(alloc: &dyn BufferAllocator, text: &str) -> Result<String> {
    alloc.allocate(text.len())?;

    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}

/// Grow `buf` so it can hold `additional` more bytes
pub fn grow(alloc: &dyn BufferAllocator, buf: &mut Vec<u8>, additional: usize) -> Result<()> {
    alloc.allocate(additional)?;
    buf.try_reserve_exact(additional)?;
    Ok(())
}

/// Make room for one more element in `slots`
pub fn reserve_slot<T>(alloc: &dyn BufferAllocator, slots: &mut Vec<T>) -> Result<()> {
    alloc.allocate(std::mem::size_of::<T>())?;
    slots.try_reserve(1)?;
    Ok(())
}
