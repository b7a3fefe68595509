/*!

The seam between the public collection handles and whatever implements them. The
[`CapabilityRegistry`](crate::core::registry::CapabilityRegistry) binds each collection type to a factory producing
one of these backends: a native one if the platform declares it, the shim otherwise.

Backends are plain single-owner data structures. Sharing, interior mutability, and re-entrancy from callbacks are
the handles' business; a backend never calls out to client code.

The [`Abstract`] placeholder implements every backend trait and fails loudly on every operation. It stands in where a
backend is required before one has been resolved.

*/

use crate::{
  api::{
    object::ObjectRef,
    value::Value
  },
  core::{
    error::CollectionError,
    registry::ShimConfig
  },
  log::critical
};

pub trait MapBackend {
  /// Inserts or overwrites. Overwriting keeps the entry's position.
  fn set(&mut self, key: Value, value: Value);
  fn get(&self, key: &Value) -> Option<Value>;
  fn has(&self, key: &Value) -> bool;
  fn delete(&mut self, key: &Value) -> bool;
  fn clear(&mut self);
  fn size(&self) -> usize;
  /// A snapshot of the entries in insertion order.
  fn entries(&self) -> Vec<(Value, Value)>;
}

pub trait SetBackend {
  /// Appends `value` unless an equal value is present.
  fn add(&mut self, value: Value);
  fn has(&self, value: &Value) -> bool;
  fn delete(&mut self, value: &Value) -> bool;
  fn clear(&mut self);
  fn size(&self) -> usize;
  /// A snapshot of the elements in insertion order.
  fn values(&self) -> Vec<Value>;
}

/// Keys are objects; rejecting primitives happens before a backend is reached.
pub trait WeakMapBackend {
  fn set(&mut self, key: &ObjectRef, value: Value);
  fn get(&self, key: &ObjectRef) -> Option<Value>;
  fn has(&self, key: &ObjectRef) -> bool;
  fn delete(&mut self, key: &ObjectRef) -> bool;
}

pub type MapFactory     = fn(&ShimConfig) -> Box<dyn MapBackend>;
pub type SetFactory     = fn(&ShimConfig) -> Box<dyn SetBackend>;
pub type WeakMapFactory = fn(&ShimConfig) -> Box<dyn WeakMapBackend>;

/// The pre-resolution stand-in for a collection type. Every operation reports
/// [`CollectionError::NotImplemented`] and panics.
#[derive(Copy, Clone, Debug)]
pub struct Abstract {
  feature: &'static str
}

impl Abstract {
  pub fn new(feature: &'static str) -> Abstract {
    Abstract { feature }
  }

  pub fn feature(&self) -> &'static str {
    self.feature
  }

  fn not_implemented(&self, operation: &'static str) -> ! {
    let error = CollectionError::NotImplemented { feature: self.feature, operation };
    critical!("{}", error);
    panic!("{}", error);
  }
}

impl MapBackend for Abstract {
  fn set(&mut self, _key: Value, _value: Value) {
    self.not_implemented("set")
  }

  fn get(&self, _key: &Value) -> Option<Value> {
    self.not_implemented("get")
  }

  fn has(&self, _key: &Value) -> bool {
    self.not_implemented("has")
  }

  fn delete(&mut self, _key: &Value) -> bool {
    self.not_implemented("delete")
  }

  fn clear(&mut self) {
    self.not_implemented("clear")
  }

  fn size(&self) -> usize {
    self.not_implemented("size")
  }

  fn entries(&self) -> Vec<(Value, Value)> {
    self.not_implemented("entries")
  }
}

impl SetBackend for Abstract {
  fn add(&mut self, _value: Value) {
    self.not_implemented("add")
  }

  fn has(&self, _value: &Value) -> bool {
    self.not_implemented("has")
  }

  fn delete(&mut self, _value: &Value) -> bool {
    self.not_implemented("delete")
  }

  fn clear(&mut self) {
    self.not_implemented("clear")
  }

  fn size(&self) -> usize {
    self.not_implemented("size")
  }

  fn values(&self) -> Vec<Value> {
    self.not_implemented("values")
  }
}

impl WeakMapBackend for Abstract {
  fn set(&mut self, _key: &ObjectRef, _value: Value) {
    self.not_implemented("set")
  }

  fn get(&self, _key: &ObjectRef) -> Option<Value> {
    self.not_implemented("get")
  }

  fn has(&self, _key: &ObjectRef) -> bool {
    self.not_implemented("has")
  }

  fn delete(&mut self, _key: &ObjectRef) -> bool {
    self.not_implemented("delete")
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  #[should_panic(expected = "Map.get is not implemented")]
  fn abstract_map_fails_loudly() {
    let placeholder = Abstract::new("Map");
    MapBackend::get(&placeholder, &Value::from(1));
  }

  #[test]
  #[should_panic(expected = "Set.add is not implemented")]
  fn abstract_set_fails_loudly() {
    let mut placeholder = Abstract::new("Set");
    SetBackend::add(&mut placeholder, Value::from(1));
  }

  #[test]
  #[should_panic(expected = "WeakMap.set is not implemented")]
  fn abstract_weak_map_fails_loudly() {
    let mut placeholder = Abstract::new("WeakMap");
    WeakMapBackend::set(&mut placeholder, &ObjectRef::new(), Value::Null);
  }
}
