use crate::{
  api::value::Value,
  core::{
    backend::MapBackend,
    registry::ShimConfig
  }
};
use super::ordered_table::OrderedTable;

/// A hash-indexed ordered map.
#[derive(Default)]
pub struct NativeMap {
  table: OrderedTable,
}

impl NativeMap {
  pub fn new() -> NativeMap {
    NativeMap { table: OrderedTable::new() }
  }
}

impl MapBackend for NativeMap {
  fn set(&mut self, key: Value, value: Value) {
    self.table.insert(key, value);
  }

  fn get(&self, key: &Value) -> Option<Value> {
    self.table.get(key).cloned()
  }

  fn has(&self, key: &Value) -> bool {
    self.table.contains(key)
  }

  fn delete(&mut self, key: &Value) -> bool {
    self.table.remove(key)
  }

  fn clear(&mut self) {
    self.table.clear();
  }

  fn size(&self) -> usize {
    self.table.len()
  }

  fn entries(&self) -> Vec<(Value, Value)> {
    self.table.iter().cloned().collect()
  }
}

pub fn factory(_config: &ShimConfig) -> Box<dyn MapBackend> {
  Box::new(NativeMap::new())
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn behaves_like_an_ordered_map() {
    let mut map = NativeMap::new();
    map.set(Value::from("b"), Value::from(1));
    map.set(Value::from("a"), Value::from(2));
    map.set(Value::from("b"), Value::from(3));
    map.set(Value::from(f64::NAN), Value::from(4));

    assert_eq!(map.size(), 3);
    assert_eq!(map.get(&Value::from(f64::NAN)), Some(Value::from(4)));
    assert_eq!(
      map.entries(),
      [
        (Value::from("b"), Value::from(3)),
        (Value::from("a"), Value::from(2)),
        (Value::from(f64::NAN), Value::from(4)),
      ]
    );

    assert!(map.delete(&Value::from("b")));
    assert!(!map.has(&Value::from("b")));
    assert_eq!(map.get(&Value::from("b")), None);
  }
}
