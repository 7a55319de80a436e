use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Slot<V> = Arc<Mutex<Option<V>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Memoized values keyed by tileset, each slot initialized at most once.
///
/// The outer map is locked only long enough to fetch a slot; loading holds
/// the slot's own lock, so slow loads of one key never block other keys.
/// A failed load leaves the slot empty.
#[derive(Debug)]
pub(crate) struct LazySlots<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> Default for LazySlots<K, V> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash + Copy, V: Clone> LazySlots<K, V> {
    fn slot(&self, key: K) -> Slot<V> {
        lock(&self.slots).entry(key).or_default().clone()
    }

    /// Cached value for `key`, if it has been loaded.
    pub fn get(&self, key: K) -> Option<V> {
        let slot = lock(&self.slots).get(&key).cloned()?;
        let value = lock(&slot).clone();
        value
    }

    pub fn get_or_try_init<E>(&self, key: K, init: impl FnOnce() -> Result<V, E>) -> Result<V, E> {
        let slot = self.slot(key);
        let mut value = lock(&slot);
        if let Some(cached) = value.as_ref() {
            return Ok(cached.clone());
        }
        let loaded = init()?;
        *value = Some(loaded.clone());
        Ok(loaded)
    }
}
