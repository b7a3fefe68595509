/*!

An ordered set as a single vector. Elements are compared with the configured [`KeyEquality`], SameValueZero unless
the registry was configured for strict comparison.

*/

use crate::{
  api::value::Value,
  core::{
    backend::SetBackend,
    equality::KeyEquality,
    registry::ShimConfig,
    shim::normalize_zero
  }
};

#[derive(Default)]
pub struct SetShim {
  values  : Vec<Value>,
  equality: KeyEquality,
}

impl SetShim {
  pub fn new() -> SetShim {
    SetShim::default()
  }

  pub fn with_equality(equality: KeyEquality) -> SetShim {
    SetShim { values: Vec::new(), equality }
  }

  pub fn equality(&self) -> KeyEquality {
    self.equality
  }

  #[inline(always)]
  fn index_of(&self, value: &Value) -> Option<usize> {
    let equality = self.equality;
    self.values.iter().position(|candidate| equality.compare(candidate, value))
  }
}

impl SetBackend for SetShim {
  fn add(&mut self, value: Value) {
    if self.index_of(&value).is_none() {
      self.values.push(normalize_zero(value));
    }
  }

  fn has(&self, value: &Value) -> bool {
    self.index_of(value).is_some()
  }

  fn delete(&mut self, value: &Value) -> bool {
    match self.index_of(value) {
      Some(index) => {
        self.values.remove(index);
        true
      }
      None => false
    }
  }

  fn clear(&mut self) {
    self.values.clear();
  }

  #[inline(always)]
  fn size(&self) -> usize {
    self.values.len()
  }

  fn values(&self) -> Vec<Value> {
    self.values.clone()
  }
}

pub fn factory(config: &ShimConfig) -> Box<dyn SetBackend> {
  Box::new(SetShim::with_equality(config.set_equality))
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn duplicates_collapse_and_order_is_kept() {
    let mut set = SetShim::new();
    for n in [1, 2, 2, 3, 1] {
      set.add(Value::from(n));
    }
    assert_eq!(set.size(), 3);
    assert_eq!(set.values(), [1, 2, 3].map(Value::from));
  }

  #[test]
  fn delete_removes_the_only_occurrence() {
    let mut set = SetShim::new();
    set.add(Value::from("x"));
    set.add(Value::from("y"));

    assert!(set.delete(&Value::from("x")));
    assert!(!set.delete(&Value::from("x")));
    assert_eq!(set.values(), [Value::from("y")]);
  }

  #[test]
  fn nan_collapses_by_default() {
    let mut set = SetShim::new();
    set.add(Value::from(f64::NAN));
    set.add(Value::from(f64::NAN));
    assert_eq!(set.size(), 1);
    assert!(set.has(&Value::from(f64::NAN)));
  }

  #[test]
  fn strict_mode_keeps_every_nan_and_finds_none() {
    let mut set = SetShim::with_equality(KeyEquality::Strict);
    set.add(Value::from(f64::NAN));
    set.add(Value::from(f64::NAN));
    set.add(Value::from(0.0));
    set.add(Value::from(-0.0));

    assert_eq!(set.size(), 3);
    assert!(!set.has(&Value::from(f64::NAN)));
    assert!(!set.delete(&Value::from(f64::NAN)));
    assert!(set.has(&Value::from(-0.0)));
  }
}
