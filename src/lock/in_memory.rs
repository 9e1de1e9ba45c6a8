use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use super::{Lock, LockError, LockManager};

/// In-memory lock backed by `Mutex<bool>` + `Condvar`.
pub struct InMemoryLock {
    state: Mutex<bool>,
    wake: Condvar,
}

impl InMemoryLock {
    pub fn new() -> Self {
        InMemoryLock {
            state: Mutex::new(false),
            wake: Condvar::new(),
        }
    }

    fn is_held(&self) -> Result<bool, LockError> {
        self.state
            .lock()
            .map(|locked| *locked)
            .map_err(|e| LockError::Poisoned(e.to_string()))
    }
}

impl Default for InMemoryLock {
    fn default() -> Self {
        Self::new()
    }
}

impl Lock for InMemoryLock {
    fn lock(&self) -> Result<(), LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        while *locked {
            locked = self
                .wake
                .wait(locked)
                .map_err(|e| LockError::Poisoned(e.to_string()))?;
        }
        *locked = true;
        Ok(())
    }

    fn try_lock(&self) -> Result<bool, LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if *locked {
            Ok(false)
        } else {
            *locked = true;
            Ok(true)
        }
    }

    fn unlock(&self) -> Result<(), LockError> {
        let mut locked = self
            .state
            .lock()
            .map_err(|e| LockError::Poisoned(e.to_string()))?;
        if *locked {
            *locked = false;
            self.wake.notify_one();
        }
        Ok(())
    }
}

/// In-memory lock manager: one `InMemoryLock` per key, created lazily.
#[derive(Default)]
pub struct InMemoryLockManager {
    locks: Mutex<HashMap<String, Arc<InMemoryLock>>>,
}

impl InMemoryLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> Result<MutexGuard<'_, HashMap<String, Arc<InMemoryLock>>>, LockError> {
        self.locks
            .lock()
            .map_err(|_| LockError::Poisoned("lock manager map poisoned".into()))
    }

    // Only the table references it and nobody holds it.
    fn is_idle(lock: &Arc<InMemoryLock>) -> Result<bool, LockError> {
        Ok(Arc::strong_count(lock) == 1 && !lock.is_held()?)
    }

    /// Drop every idle lock. Returns how many were removed.
    pub fn prune(&self) -> Result<usize, LockError> {
        let mut locks = self.table()?;
        let before = locks.len();

        let mut idle = Vec::new();
        for (key, lock) in locks.iter() {
            if Self::is_idle(lock)? {
                idle.push(key.clone());
            }
        }
        for key in idle {
            locks.remove(&key);
        }

        Ok(before - locks.len())
    }

    /// Number of keys currently tracked.
    pub fn tracked(&self) -> Result<usize, LockError> {
        Ok(self.table()?.len())
    }
}

impl LockManager for InMemoryLockManager {
    type Lock = InMemoryLock;

    fn get_lock(&self, key: &str) -> Result<Arc<InMemoryLock>, LockError> {
        let mut locks = self.table()?;
        Ok(locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(InMemoryLock::new()))
            .clone())
    }

    fn release_idle(&self, key: &str) -> Result<bool, LockError> {
        let mut locks = self.table()?;
        let idle = match locks.get(key) {
            Some(lock) => Self::is_idle(lock)?,
            None => false,
        };
        if idle {
            locks.remove(key);
        }
        Ok(idle)
    }
}
