use std::rc::Rc;

use total_float_wrap::TotalF64;

use crate::{
  abstractions::IString,
  api::value::Value
};

/// A hashable stand-in for a `Value` such that two values have equal keys exactly when they are equal under
/// SameValueZero. Numbers are canonicalized first (every `NaN` to one `NaN`, `-0` to `+0`) because `TotalF64`
/// distinguishes both. Objects and opaque values are keyed by address; the table holds the value itself, which keeps
/// the address from being reused while the key exists.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) enum HashKey {
  Undefined,
  Null,
  Boolean(bool),
  Number(TotalF64),
  String(IString),
  Object(usize),
  Opaque(usize),
}

impl HashKey {
  pub(crate) fn of(value: &Value) -> HashKey {
    match value {
      Value::Undefined      => HashKey::Undefined,
      Value::Null           => HashKey::Null,
      Value::Boolean(b)     => HashKey::Boolean(*b),
      Value::Number(n)      => HashKey::Number(TotalF64::from(canonical_number(*n))),
      Value::String(s)      => HashKey::String(s.clone()),
      Value::Object(object) => HashKey::Object(object.address()),
      Value::Opaque(data)   => HashKey::Opaque(Rc::as_ptr(data) as *const () as usize),
    }
  }
}

#[inline(always)]
fn canonical_number(n: f64) -> f64 {
  if n.is_nan() {
    f64::NAN
  } else if n == 0.0 {
    0.0
  } else {
    n
  }
}
