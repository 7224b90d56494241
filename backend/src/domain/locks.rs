//! Per-account write serialization.
//!
//! Every mutating operation takes the account's lock for the duration of its
//! load-mutate-save cycle, so two concurrent requests for the same user can
//! never interleave and lose an update. Reads skip the lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;

/// Registry handing out one async mutex per account name.
#[derive(Clone, Default)]
pub struct AccountLocks {
    inner: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for `name`, created on first use and shared thereafter.
    pub fn for_account(&self, name: &str) -> Arc<AsyncMutex<()>> {
        let mut map = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        map.entry(name.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_yields_same_lock() {
        let locks = AccountLocks::new();
        let a = locks.for_account("jisoo");
        let b = locks.for_account("jisoo");
        assert!(Arc::ptr_eq(&a, &b));

        let c = locks.for_account("minho");
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[tokio::test]
    async fn lock_serializes_critical_sections() {
        let locks = AccountLocks::new();
        let counter = Arc::new(Mutex::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let locks = locks.clone();
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                let lock = locks.for_account("jisoo");
                let _guard = lock.lock().await;
                let value = *counter.lock().unwrap();
                tokio::task::yield_now().await;
                *counter.lock().unwrap() = value + 1;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(*counter.lock().unwrap(), 16);
    }
}
