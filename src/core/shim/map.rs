/*!

An ordered map as two index-aligned vectors, `keys[i]` mapping to `values[i]`. Keys are compared with SameValueZero.
Overwriting a key keeps its position; deleting one shifts every later entry down by one.

*/

use crate::{
  api::value::Value,
  core::{
    backend::MapBackend,
    equality::is,
    registry::ShimConfig,
    shim::normalize_zero
  }
};

#[derive(Default)]
pub struct MapShim {
  keys  : Vec<Value>,
  values: Vec<Value>,
}

impl MapShim {
  pub fn new() -> MapShim {
    MapShim::default()
  }

  #[inline(always)]
  fn index_of(&self, key: &Value) -> Option<usize> {
    self.keys.iter().position(|candidate| is(candidate, key))
  }
}

impl MapBackend for MapShim {
  fn set(&mut self, key: Value, value: Value) {
    match self.index_of(&key) {
      Some(index) => {
        self.values[index] = value;
      }
      None => {
        self.keys.push(normalize_zero(key));
        self.values.push(value);
      }
    }
  }

  fn get(&self, key: &Value) -> Option<Value> {
    self.index_of(key).map(|index| self.values[index].clone())
  }

  fn has(&self, key: &Value) -> bool {
    self.index_of(key).is_some()
  }

  fn delete(&mut self, key: &Value) -> bool {
    match self.index_of(key) {
      Some(index) => {
        self.keys.remove(index);
        self.values.remove(index);
        true
      }
      None => false
    }
  }

  fn clear(&mut self) {
    self.keys.clear();
    self.values.clear();
  }

  #[inline(always)]
  fn size(&self) -> usize {
    debug_assert_eq!(self.keys.len(), self.values.len());
    self.keys.len()
  }

  fn entries(&self) -> Vec<(Value, Value)> {
    self.keys.iter().cloned().zip(self.values.iter().cloned()).collect()
  }
}

pub fn factory(_config: &ShimConfig) -> Box<dyn MapBackend> {
  Box::new(MapShim::new())
}
