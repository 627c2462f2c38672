use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use stonedesk_core::{DomainError, DomainResult, Entity};

/// Keyed record store abstraction.
///
/// `list` returns records in key order. Ids are time-ordered, so that is
/// creation order.
pub trait Store<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    /// Insert or replace. Returns the previous record, if any.
    fn upsert(&self, key: K, value: V) -> Option<V>;
    fn remove(&self, key: &K) -> Option<V>;
    fn list(&self) -> Vec<V>;
    fn len(&self) -> usize;
    fn clear(&self);

    /// Mutate an existing record under the write lock.
    ///
    /// `apply` works on a copy; the stored record is only replaced when it
    /// returns `Ok`. A missing key is `DomainError::NotFound`.
    fn update<F>(&self, key: &K, apply: F) -> DomainResult<V>
    where
        F: FnOnce(&mut V) -> DomainResult<()>;

    /// Replace an existing record. Never inserts.
    fn replace(&self, key: &K, value: V) -> DomainResult<V> {
        self.update(key, |current| {
            *current = value;
            Ok(())
        })
    }

    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, S> Store<K, V> for Arc<S>
where
    S: Store<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) -> Option<V> {
        (**self).upsert(key, value)
    }

    fn remove(&self, key: &K) -> Option<V> {
        (**self).remove(key)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn update<F>(&self, key: &K, apply: F) -> DomainResult<V>
    where
        F: FnOnce(&mut V) -> DomainResult<()>,
    {
        (**self).update(key, apply)
    }
}

/// In-memory store for the dashboard records.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> InMemoryStore<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Entity<Id = K> + Clone + Send + Sync + 'static,
{
    /// Upsert keyed by the record's own id.
    pub fn save(&self, record: V) -> Option<V> {
        let key = record.id().clone();
        self.upsert(key, record)
    }
}

impl<K, V> Store<K, V> for InMemoryStore<K, V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn upsert(&self, key: K, value: V) -> Option<V> {
        match self.inner.write() {
            Ok(mut map) => map.insert(key, value),
            Err(_) => {
                tracing::error!("record store lock poisoned; write dropped");
                None
            }
        }
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut map = self.inner.write().ok()?;
        map.remove(key)
    }

    fn list(&self) -> Vec<V> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    fn clear(&self) {
        if let Ok(mut map) = self.inner.write() {
            map.clear();
        }
    }

    fn update<F>(&self, key: &K, apply: F) -> DomainResult<V>
    where
        F: FnOnce(&mut V) -> DomainResult<()>,
    {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::invariant("record store lock poisoned"))?;
        let current = map.get_mut(key).ok_or(DomainError::NotFound)?;

        let mut next = current.clone();
        apply(&mut next)?;
        *current = next.clone();
        Ok(next)
    }
}
