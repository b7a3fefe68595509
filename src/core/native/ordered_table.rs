/*!

An insertion-ordered hash table. Entries live in a vector in insertion order; a hash index maps each key to its slot.
Removing an entry vacates its slot (recorded in a bit set) instead of shifting the vector, and the vector is
compacted once more than half of it is vacated. Iteration skips vacated slots.

*/

use std::{
  collections::HashMap,
  mem
};

use bit_set::BitSet;

use crate::{
  api::value::Value,
  core::shim::normalize_zero
};
use super::hash_key::HashKey;

/// Compact once vacated slots exceed this fraction of the vector.
const COMPACTION_RATIO: f64 = 0.5;

#[derive(Default)]
pub(crate) struct OrderedTable {
  entries: Vec<(Value, Value)>,
  index  : HashMap<HashKey, usize>,
  vacated: BitSet,
}

impl OrderedTable {
  pub(crate) fn new() -> OrderedTable {
    OrderedTable::default()
  }

  #[inline(always)]
  pub(crate) fn len(&self) -> usize {
    self.index.len()
  }

  pub(crate) fn get(&self, key: &Value) -> Option<&Value> {
    self.index.get(&HashKey::of(key)).map(|&slot| &self.entries[slot].1)
  }

  #[inline(always)]
  pub(crate) fn contains(&self, key: &Value) -> bool {
    self.index.contains_key(&HashKey::of(key))
  }

  /// Inserts or overwrites in place. Returns whether the key is new.
  pub(crate) fn insert(&mut self, key: Value, value: Value) -> bool {
    let hash_key = HashKey::of(&key);
    match self.index.get(&hash_key) {
      Some(&slot) => {
        self.entries[slot].1 = value;
        false
      }
      None => {
        self.index.insert(hash_key, self.entries.len());
        self.entries.push((normalize_zero(key), value));
        true
      }
    }
  }

  pub(crate) fn remove(&mut self, key: &Value) -> bool {
    let Some(slot) = self.index.remove(&HashKey::of(key)) else {
      return false;
    };
    self.vacated.insert(slot);
    // Release the entry's references now rather than at compaction.
    let removed = mem::take(&mut self.entries[slot]);
    drop(removed);

    let vacated_count = self.entries.len() - self.index.len();
    if vacated_count as f64 > self.entries.len() as f64 * COMPACTION_RATIO {
      self.compact();
    }
    true
  }

  pub(crate) fn clear(&mut self) {
    self.entries.clear();
    self.index.clear();
    self.vacated.clear();
  }

  /// Occupied entries in insertion order.
  pub(crate) fn iter(&self) -> impl Iterator<Item = &(Value, Value)> + '_ {
    self.entries
        .iter()
        .enumerate()
        .filter(|(slot, _)| !self.vacated.contains(*slot))
        .map(|(_, entry)| entry)
  }

  fn compact(&mut self) {
    let entries = mem::take(&mut self.entries);
    self.entries = entries
        .into_iter()
        .enumerate()
        .filter(|(slot, _)| !self.vacated.contains(*slot))
        .map(|(_, entry)| entry)
        .collect();
    self.vacated.clear();

    self.index.clear();
    for (slot, (key, _)) in self.entries.iter().enumerate() {
      self.index.insert(HashKey::of(key), slot);
    }
  }

  /// Slots in the backing vector, vacated ones included.
  #[cfg(test)]
  pub(crate) fn capacity_used(&self) -> usize {
    self.entries.len()
  }
}
