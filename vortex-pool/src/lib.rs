//! # vortex-pool
//!
//! A bounded pool of heavyweight handles (DB client + model handles bundled
//! into one "manager" value). The pool is the sole owner of those handles:
//! callers acquire through a semaphore and get an RAII guard that returns
//! the handle on every exit path. Pool size is fixed at startup; when all
//! handles are checked out, callers wait — no unpooled handle is ever
//! created.

use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::{Semaphore, TryAcquireError};
use tracing::debug;

/// Pool occupancy snapshot for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    pub size: usize,
    pub in_use: usize,
    pub available: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("resource pool exhausted: no handle freed within {waited_ms}ms")]
    Exhausted { waited_ms: u64 },

    #[error("resource pool is shut down")]
    Closed,
}

struct Inner<T> {
    semaphore: Semaphore,
    idle: Mutex<Vec<T>>,
    size: usize,
    in_use: AtomicUsize,
}

/// Bounded pool over any handle type.
pub struct ResourcePool<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ResourcePool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Send + 'static> ResourcePool<T> {
    /// Build a pool owning the given handles. The handle count fixes the
    /// concurrency bound for the pool's lifetime.
    pub fn new(handles: Vec<T>) -> Self {
        let size = handles.len();
        Self {
            inner: Arc::new(Inner {
                semaphore: Semaphore::new(size),
                idle: Mutex::new(handles),
                size,
                in_use: AtomicUsize::new(0),
            }),
        }
    }

    /// Acquire a handle, waiting until one frees up.
    pub async fn acquire(&self) -> Result<PoolGuard<T>, PoolError> {
        let permit = self
            .inner
            .semaphore
            .acquire()
            .await
            .map_err(|_| PoolError::Closed)?;
        permit.forget();
        Ok(self.checkout())
    }

    /// Acquire a handle, giving up after `timeout`.
    pub async fn acquire_timeout(&self, timeout: Duration) -> Result<PoolGuard<T>, PoolError> {
        match tokio::time::timeout(timeout, self.inner.semaphore.acquire()).await {
            Ok(Ok(permit)) => {
                permit.forget();
                Ok(self.checkout())
            }
            Ok(Err(_)) => Err(PoolError::Closed),
            Err(_) => Err(PoolError::Exhausted {
                waited_ms: timeout.as_millis() as u64,
            }),
        }
    }

    /// Acquire without waiting; `None` when every handle is checked out.
    pub fn try_acquire(&self) -> Result<Option<PoolGuard<T>>, PoolError> {
        match self.inner.semaphore.try_acquire() {
            Ok(permit) => {
                permit.forget();
                Ok(Some(self.checkout()))
            }
            Err(TryAcquireError::NoPermits) => Ok(None),
            Err(TryAcquireError::Closed) => Err(PoolError::Closed),
        }
    }

    fn checkout(&self) -> PoolGuard<T> {
        let handle = {
            let mut idle = self
                .inner
                .idle
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            // A permit guarantees at least one idle handle.
            idle.pop().expect("permit held without an idle handle")
        };
        self.inner.in_use.fetch_add(1, Ordering::SeqCst);
        debug!(in_use = self.inner.in_use.load(Ordering::SeqCst), "pool handle acquired");
        PoolGuard {
            handle: Some(handle),
            inner: self.inner.clone(),
        }
    }

    pub fn status(&self) -> PoolStatus {
        let in_use = self.inner.in_use.load(Ordering::SeqCst);
        PoolStatus {
            size: self.inner.size,
            in_use,
            available: self.inner.size.saturating_sub(in_use),
        }
    }
}

/// Scoped handle. Dropping it — on any path, including panics unwinding —
/// returns the handle to the pool and releases the permit.
pub struct PoolGuard<T> {
    handle: Option<T>,
    inner: Arc<Inner<T>>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for PoolGuard<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolGuard")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl<T> Deref for PoolGuard<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.handle.as_ref().expect("handle present until drop")
    }
}

impl<T> DerefMut for PoolGuard<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.handle.as_mut().expect("handle present until drop")
    }
}

impl<T> Drop for PoolGuard<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.inner
                .idle
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(handle);
            self.inner.in_use.fetch_sub(1, Ordering::SeqCst);
            self.inner.semaphore.add_permits(1);
            debug!("pool handle released");
        }
    }
}
