/*!

Key equality. Two rules exist:

| rule            | `NaN` vs `NaN` | `+0` vs `-0` | objects     |
|:----------------|:---------------|:-------------|:------------|
| SameValueZero   | equal          | equal        | by identity |
| strict equality | unequal        | equal        | by identity |

SameValueZero ([`is`]) is the only rule `Map` uses and the default for `Set`. Strict equality exists for a `Set`
configured for exact parity with implementations that compare set elements strictly (see
[`ShimConfig`](crate::core::registry::ShimConfig)).

*/

use std::rc::Rc;

use crate::api::value::Value;

/// SameValueZero: strict equality, except that `NaN` equals itself.
pub fn is(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
    _                                    => strict_equals(a, b)
  }
}

/// Strict equality: primitives by value, objects and opaque values by identity. `NaN` is unequal to everything,
/// itself included, and the two zeros are equal.
pub fn strict_equals(a: &Value, b: &Value) -> bool {
  match (a, b) {
    (Value::Undefined, Value::Undefined)   => true,
    (Value::Null, Value::Null)             => true,
    (Value::Boolean(x), Value::Boolean(y)) => x == y,
    (Value::Number(x), Value::Number(y))   => x == y,
    (Value::String(x), Value::String(y))   => x == y,
    (Value::Object(x), Value::Object(y))   => x.ptr_eq(y),
    (Value::Opaque(x), Value::Opaque(y))   => std::ptr::addr_eq(Rc::as_ptr(x), Rc::as_ptr(y)),
    _                                      => false
  }
}

/// Selects an equality rule for collection elements.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
pub enum KeyEquality {
  #[default]
  SameValueZero,
  Strict,
}

impl KeyEquality {
  #[inline(always)]
  pub fn compare(self, a: &Value, b: &Value) -> bool {
    match self {
      KeyEquality::SameValueZero => is(a, b),
      KeyEquality::Strict        => strict_equals(a, b),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::object::ObjectRef;

  #[test]
  fn nan_is_itself_only_under_same_value_zero() {
    let nan = Value::from(f64::NAN);
    assert!(is(&nan, &nan));
    assert!(is(&nan, &Value::from(-f64::NAN)));
    assert!(!strict_equals(&nan, &nan));
  }

  #[test]
  fn zeros_are_equal_under_both_rules() {
    let (pos, neg) = (Value::from(0.0), Value::from(-0.0));
    assert!(is(&pos, &neg));
    assert!(strict_equals(&pos, &neg));
  }

  #[test]
  fn no_coercion_between_types() {
    assert!(!is(&Value::from(1), &Value::from("1")));
    assert!(!is(&Value::from(0), &Value::from(false)));
    assert!(!is(&Value::Null, &Value::Undefined));
  }

  #[test]
  fn objects_compare_by_identity() {
    let a = ObjectRef::new();
    assert!(is(&Value::from(&a), &Value::from(&a)));
    assert!(!is(&Value::from(&a), &Value::from(ObjectRef::new())));
  }

  #[test]
  fn key_equality_dispatches() {
    let nan = Value::from(f64::NAN);
    assert!(KeyEquality::SameValueZero.compare(&nan, &nan));
    assert!(!KeyEquality::Strict.compare(&nan, &nan));
    assert!(KeyEquality::Strict.compare(&Value::from("k"), &Value::from("k")));
  }
}
