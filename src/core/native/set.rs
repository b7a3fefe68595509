use crate::{
  api::value::Value,
  core::{
    backend::SetBackend,
    registry::ShimConfig
  }
};
use super::ordered_table::OrderedTable;

/// A hash-indexed ordered set. Elements are compared with SameValueZero; the shim's strict mode has no native
/// counterpart.
#[derive(Default)]
pub struct NativeSet {
  table: OrderedTable,
}

impl NativeSet {
  pub fn new() -> NativeSet {
    NativeSet { table: OrderedTable::new() }
  }
}

impl SetBackend for NativeSet {
  fn add(&mut self, value: Value) {
    if !self.table.contains(&value) {
      self.table.insert(value, Value::Undefined);
    }
  }

  fn has(&self, value: &Value) -> bool {
    self.table.contains(value)
  }

  fn delete(&mut self, value: &Value) -> bool {
    self.table.remove(value)
  }

  fn clear(&mut self) {
    self.table.clear();
  }

  fn size(&self) -> usize {
    self.table.len()
  }

  fn values(&self) -> Vec<Value> {
    self.table.iter().map(|(value, _)| value.clone()).collect()
  }
}

pub fn factory(_config: &ShimConfig) -> Box<dyn SetBackend> {
  Box::new(NativeSet::new())
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn behaves_like_an_ordered_set() {
    let mut set = NativeSet::new();
    for value in [Value::from(1), Value::from(-0.0), Value::from(1), Value::from(0), Value::from("1")] {
      set.add(value);
    }

    assert_eq!(set.size(), 3);
    assert_eq!(set.values(), [Value::from(1), Value::from(0), Value::from("1")]);
    assert!(set.values()[1].as_number().is_some_and(|zero| zero.is_sign_positive()));

    assert!(set.delete(&Value::from(1)));
    assert_eq!(set.values(), [Value::from(0), Value::from("1")]);
  }
}
