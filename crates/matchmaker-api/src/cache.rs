//! A small in-process TTL cache.
//!
//! Advisory only: a miss (or an expired entry) falls back to the store, so
//! dropping the cache never changes an answer, only its latency.

use std::{
  collections::HashMap,
  hash::Hash,
  sync::{Mutex, PoisonError},
  time::{Duration, Instant},
};

pub struct TtlCache<K, V> {
  ttl:     Duration,
  entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K, V> TtlCache<K, V>
where
  K: Eq + Hash,
  V: Clone,
{
  pub fn new(ttl: Duration) -> Self {
    Self { ttl, entries: Mutex::new(HashMap::new()) }
  }

  /// The live value for `key`, evicting it if it has expired.
  pub fn get(&self, key: &K) -> Option<V> {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    let live = entries
      .get(key)
      .filter(|(stored, _)| stored.elapsed() < self.ttl)
      .map(|(_, value)| value.clone());
    if live.is_none() {
      entries.remove(key);
    }
    live
  }

  /// Store `value` under `key`, sweeping every expired entry first.
  pub fn insert(&self, key: K, value: V) {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.retain(|_, (stored, _)| stored.elapsed() < self.ttl);
    entries.insert(key, (Instant::now(), value));
  }

  pub fn remove(&self, key: &K) {
    let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
    entries.remove(key);
  }

  pub fn len(&self) -> usize {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn entries_expire() {
    let cache = TtlCache::new(Duration::ZERO);
    cache.insert("k", 1);
    assert_eq!(cache.get(&"k"), None);

    let cache = TtlCache::new(Duration::from_secs(60));
    cache.insert("k", 1);
    assert_eq!(cache.get(&"k"), Some(1));
  }

  #[test]
  fn insert_sweeps_expired_entries() {
    let cache = TtlCache::new(Duration::ZERO);
    for n in 0..1000 {
      cache.insert(n, n);
    }
    assert_eq!(cache.len(), 1);

    let cache = TtlCache::new(Duration::from_secs(60));
    cache.insert("a", 1);
    cache.insert("b", 2);
    assert_eq!(cache.len(), 2);
  }

  #[test]
  fn removed_entries_are_gone() {
    let cache = TtlCache::new(Duration::from_secs(60));
    cache.insert("k", 1);
    cache.remove(&"k");
    assert_eq!(cache.get(&"k"), None);
    assert!(cache.is_empty());
  }
}
