/*!

The public ordered map. A `Map` is a handle: clones share one backing collection, which is whatever the
[`CapabilityRegistry`](crate::core::registry::CapabilityRegistry) bound for `Map`.

Keys are compared with SameValueZero, so `NaN` finds `NaN` and `-0` finds `+0`. Iteration follows first insertion;
overwriting a key does not move it.

*/

use std::{
  cell::RefCell,
  fmt::{Debug, Display, Formatter},
  rc::Rc
};

use crate::{
  api::value::Value,
  core::{
    backend::MapBackend,
    format::{FormatStyle, Formattable},
    registry::process_registry
  }
};

#[derive(Clone)]
pub struct Map {
  backend: Rc<RefCell<Box<dyn MapBackend>>>,
}

impl Map {
  // region Constructors

  /// An empty map from the process registry's binding.
  pub fn new() -> Map {
    process_registry().new_map()
  }

  /// A map seeded with `entries`, in order. Later duplicates overwrite earlier ones.
  pub fn from_entries<I, K, V>(entries: I) -> Map
    where I: IntoIterator<Item = (K, V)>,
          K: Into<Value>,
          V: Into<Value>
  {
    process_registry().map_from_entries(entries.into_iter().map(|(key, value)| (key.into(), value.into())))
  }

  /// A map over an explicitly chosen backend, bypassing the registry.
  pub fn with_backend(backend: Box<dyn MapBackend>) -> Map {
    Map { backend: Rc::new(RefCell::new(backend)) }
  }

  // endregion Constructors

  /// Inserts or overwrites. Returns the map for chaining.
  pub fn set(&self, key: impl Into<Value>, value: impl Into<Value>) -> &Map {
    self.backend.borrow_mut().set(key.into(), value.into());
    self
  }

  /// `None` if `key` is absent. A present key whose value is `undefined` yields `Some(Value::Undefined)`.
  pub fn get(&self, key: &Value) -> Option<Value> {
    self.backend.borrow().get(key)
  }

  pub fn has(&self, key: &Value) -> bool {
    self.backend.borrow().has(key)
  }

  /// Returns whether `key` was present.
  pub fn delete(&self, key: &Value) -> bool {
    self.backend.borrow_mut().delete(key)
  }

  pub fn clear(&self) {
    self.backend.borrow_mut().clear();
  }

  pub fn size(&self) -> usize {
    self.backend.borrow().size()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.size() == 0
  }

  /// Calls `callback(value, key, map)` for each entry, in order. The entries are snapshotted before the first call, so
  /// the callback may freely mutate the map; entries it adds are not visited.
  pub fn for_each<F>(&self, mut callback: F)
    where F: FnMut(&Value, &Value, &Map)
  {
    let entries = self.backend.borrow().entries();
    for (key, value) in entries.iter() {
      callback(value, key, self);
    }
  }

  // region Iterators

  /// The entries as of now, in order.
  pub fn entries(&self) -> MapIterator {
    MapIterator { entries: self.backend.borrow().entries().into_iter() }
  }

  pub fn keys(&self) -> impl Iterator<Item = Value> {
    self.entries().map(|(key, _)| key)
  }

  pub fn values(&self) -> impl Iterator<Item = Value> {
    self.entries().map(|(_, value)| value)
  }

  // endregion Iterators

  /// Do both handles share one collection?
  pub fn ptr_eq(&self, other: &Map) -> bool {
    Rc::ptr_eq(&self.backend, &other.backend)
  }
}

impl Default for Map {
  fn default() -> Self {
    Map::new()
  }
}

/// An iterator over a snapshot of a map's entries. Later changes to the map do not affect it.
pub struct MapIterator {
  entries: std::vec::IntoIter<(Value, Value)>,
}

impl Iterator for MapIterator {
  type Item = (Value, Value);

  fn next(&mut self) -> Option<Self::Item> {
    self.entries.next()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.entries.size_hint()
  }
}

impl ExactSizeIterator for MapIterator {}

impl IntoIterator for &Map {
  type Item     = (Value, Value);
  type IntoIter = MapIterator;

  fn into_iter(self) -> Self::IntoIter {
    self.entries()
  }
}

impl Formattable for Map {
  fn repr(&self, style: FormatStyle) -> String {
    let entries = self.entries().collect::<Vec<_>>();
    match style {

      FormatStyle::Input => {
        let pairs = entries.iter()
                           .map(|(key, value)| format!("[{}, {}]", key.repr(style), value.repr(style)))
                           .collect::<Vec<_>>();
        format!("new Map([{}])", pairs.join(", "))
      }

      FormatStyle::Simple => format!("Map({})", entries.len()),

      _ => {
        let pairs = entries.iter()
                           .map(|(key, value)| format!("{} => {}", key.repr(style), value.repr(style)))
                           .collect::<Vec<_>>();
        if pairs.is_empty() {
          "Map(0) {}".to_string()
        } else {
          format!("Map({}) {{ {} }}", pairs.len(), pairs.join(", "))
        }
      }

    }
  }
}

impl Display for Map {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Default))
  }
}

impl Debug for Map {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Debug))
  }
}
