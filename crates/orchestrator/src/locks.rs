//! Per-identity mutual exclusion.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Serializes work per chat identity.
///
/// Deliveries for different identities never wait on each other. Entries are
/// removed once nobody holds or waits for them.
#[derive(Clone, Default)]
pub struct IdentityLocks {
    inner: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

/// Held while one message for an identity is being handled.
pub struct IdentityGuard {
    key: String,
    locks: IdentityLocks,
    guard: Option<OwnedMutexGuard<()>>,
}

impl IdentityLocks {
    /// Create an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `identity`.
    pub async fn lock(&self, identity: &str) -> IdentityGuard {
        let mutex = {
            let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(map.entry(identity.to_string()).or_default())
        };

        let guard = mutex.lock_owned().await;
        IdentityGuard {
            key: identity.to_string(),
            locks: self.clone(),
            guard: Some(guard),
        }
    }

    /// Number of identities currently tracked.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether no identity is tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for IdentityGuard {
    fn drop(&mut self) {
        let mut map = self.locks.inner.lock().unwrap_or_else(|e| e.into_inner());
        // One reference in the map, one in our guard: nobody else is waiting.
        let idle = map
            .get(&self.key)
            .is_some_and(|entry| Arc::strong_count(entry) <= 2);
        if idle {
            map.remove(&self.key);
        }
        self.guard.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_identity_is_serialized() {
        let locks = IdentityLocks::new();
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let tasks = (0..5).map(|_| {
            let locks = locks.clone();
            let inside = Arc::clone(&inside);
            let max_seen = Arc::clone(&max_seen);
            tokio::spawn(async move {
                let _guard = locks.lock("42").await;
                let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            })
        });
        futures::future::join_all(tasks).await;

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_different_identities_do_not_block() {
        let locks = IdentityLocks::new();
        let _a = locks.lock("a").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.lock("b")).await;
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_entries_are_pruned() {
        let locks = IdentityLocks::new();
        {
            let _guard = locks.lock("x").await;
            assert_eq!(locks.len(), 1);
        }
        assert!(locks.is_empty());
    }
}
