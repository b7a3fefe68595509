/*!

A weak map over real weak references. Entries are indexed by key address and hold a `WeakObjectRef` to the key, so
the map never keeps a key alive. An entry whose key has been dropped is treated as absent.

Dead entries still occupy the table (and keep their values alive) until the next purge. Purges happen when the table
grows past a threshold that doubles with the live population, which keeps their cost amortized constant per insert.
Without ephemerons, a value that refers to its own key keeps that key alive for as long as the entry exists.

*/

use std::collections::HashMap;

use crate::{
  api::{
    object::{ObjectRef, WeakObjectRef},
    value::Value
  },
  core::{
    backend::WeakMapBackend,
    registry::ShimConfig
  },
  log::trace
};

/// The table size that triggers the first purge.
const INITIAL_PURGE_THRESHOLD: usize = 64;

pub struct NativeWeakMap {
  entries : HashMap<usize, (WeakObjectRef, Value)>,
  purge_at: usize,
}

impl NativeWeakMap {
  pub fn new() -> NativeWeakMap {
    NativeWeakMap {
      entries : HashMap::new(),
      purge_at: INITIAL_PURGE_THRESHOLD,
    }
  }

  /// Drops every entry whose key is gone.
  pub fn purge(&mut self) {
    let before = self.entries.len();
    self.entries.retain(|_, (owner, _)| owner.is_live());
    trace!(5, "native weak map purged {} of {} entries", before - self.entries.len(), before);
  }

  /// Entries currently held, including ones whose key has been dropped but not yet purged.
  pub fn tracked(&self) -> usize {
    self.entries.len()
  }

  fn live_entry(&self, key: &ObjectRef) -> Option<&Value> {
    // A live key at an address rules out a stale entry there: the stale entry's weak reference would have kept the
    // old allocation, and so the address, from being reused.
    self.entries
        .get(&key.address())
        .filter(|(owner, _)| owner.is_reference_to(key))
        .map(|(_, value)| value)
  }
}

impl Default for NativeWeakMap {
  fn default() -> Self {
    NativeWeakMap::new()
  }
}

impl WeakMapBackend for NativeWeakMap {
  fn set(&mut self, key: &ObjectRef, value: Value) {
    self.entries.insert(key.address(), (key.downgrade(), value));

    if self.entries.len() >= self.purge_at {
      self.purge();
      self.purge_at = (self.entries.len() * 2).max(INITIAL_PURGE_THRESHOLD);
    }
  }

  fn get(&self, key: &ObjectRef) -> Option<Value> {
    self.live_entry(key).cloned()
  }

  fn has(&self, key: &ObjectRef) -> bool {
    self.live_entry(key).is_some()
  }

  fn delete(&mut self, key: &ObjectRef) -> bool {
    if self.live_entry(key).is_none() {
      return false;
    }
    self.entries.remove(&key.address()).is_some()
  }
}

pub fn factory(_config: &ShimConfig) -> Box<dyn WeakMapBackend> {
  Box::new(NativeWeakMap::new())
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_get_delete() {
    let mut weak_map = NativeWeakMap::new();
    let key          = ObjectRef::new();

    weak_map.set(&key, Value::from(1));
    weak_map.set(&key, Value::from(2));
    assert_eq!(weak_map.get(&key), Some(Value::from(2)));
    assert_eq!(weak_map.tracked(), 1);

    assert!(weak_map.delete(&key));
    assert!(!weak_map.has(&key));
    assert!(!weak_map.delete(&key));
  }

  #[test]
  fn keys_are_held_weakly_and_never_tagged() {
    let mut weak_map = NativeWeakMap::new();
    let key          = ObjectRef::new();
    weak_map.set(&key, Value::from("x"));

    assert_eq!(key.strong_count(), 1);
    assert!(key.own_property_names().is_empty());
  }

  #[test]
  fn dead_keys_are_purged_as_the_table_grows() {
    let mut weak_map = NativeWeakMap::new();
    for n in 0..INITIAL_PURGE_THRESHOLD {
      let transient = ObjectRef::new();
      weak_map.set(&transient, Value::from(n as i32));
    }
    // The last insert reached the threshold and purged every entry except its own, whose key was still alive.
    assert_eq!(weak_map.tracked(), 1);

    let survivor = ObjectRef::new();
    weak_map.set(&survivor, Value::from("alive"));
    assert_eq!(weak_map.tracked(), 2);
    weak_map.purge();
    assert_eq!(weak_map.tracked(), 1);
    assert_eq!(weak_map.get(&survivor), Some(Value::from("alive")));
  }
}
