//! Per-entity locks.
//!
//! The pipeline holds one lock per `collection:id` key from locate to
//! persist, so two mutations of the same entity never interleave between
//! reading and writing it. In-memory locks use `Mutex` + `Condvar`;
//! distributed implementations might use Redis, Postgres advisory locks,
//! etcd leases, etc.

mod in_memory;

use std::sync::Arc;

use thiserror::Error;

pub use in_memory::{InMemoryLock, InMemoryLockManager};

/// Error type for lock operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LockError {
    /// The underlying lock primitive was poisoned (a thread panicked while holding it).
    #[error("lock poisoned: {0}")]
    Poisoned(String),
    /// Failed to acquire the lock.
    #[error("lock acquire failed: {0}")]
    AcquireFailed(String),
    /// Failed to release the lock.
    #[error("lock release failed: {0}")]
    ReleaseFailed(String),
}

/// A single lock instance.
pub trait Lock: Send + Sync {
    /// Acquire the lock, blocking until it becomes available.
    fn lock(&self) -> Result<(), LockError>;

    /// Try to acquire the lock without blocking.
    /// Returns `Ok(true)` if acquired, `Ok(false)` if already held.
    fn try_lock(&self) -> Result<bool, LockError>;

    /// Release the lock.
    fn unlock(&self) -> Result<(), LockError>;
}

/// Factory for per-key locks.
pub trait LockManager: Send + Sync {
    /// The concrete lock type returned by this manager.
    type Lock: Lock;

    /// Get (or create) the lock for `key`.
    ///
    /// Repeated calls with the same key must return the same logical lock.
    fn get_lock(&self, key: &str) -> Result<Arc<Self::Lock>, LockError>;

    /// Block until the lock for `key` is held; released when the guard drops.
    fn acquire(&self, key: &str) -> Result<LockGuard<Self::Lock>, LockError> {
        let lock = self.get_lock(key)?;
        lock.lock()?;
        Ok(LockGuard {
            key: key.to_string(),
            lock,
        })
    }

    /// Forget the lock for `key` if nobody holds or waits on it. Returns
    /// true if an entry was dropped.
    ///
    /// Managers without per-key state keep the default no-op.
    fn release_idle(&self, _key: &str) -> Result<bool, LockError> {
        Ok(false)
    }
}

impl<M: LockManager> LockManager for Arc<M> {
    type Lock = M::Lock;

    fn get_lock(&self, key: &str) -> Result<Arc<Self::Lock>, LockError> {
        (**self).get_lock(key)
    }

    fn release_idle(&self, key: &str) -> Result<bool, LockError> {
        (**self).release_idle(key)
    }
}

/// Holds a lock until dropped.
pub struct LockGuard<L: Lock> {
    key: String,
    lock: Arc<L>,
}

impl<L: Lock> LockGuard<L> {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<L: Lock> Drop for LockGuard<L> {
    fn drop(&mut self) {
        if let Err(err) = self.lock.unlock() {
            tracing::warn!(key = %self.key, error = %err, "failed to release entity lock");
        }
    }
}

/// Key used for an entity's lock.
pub fn entity_key(collection: &str, id: &str) -> String {
    format!("{}:{}", collection, id)
}
