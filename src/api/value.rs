/*!

The values collections hold. A `Value` is one of the primitives (`Undefined`, `Null`, `Boolean`, `Number`,
`String`), an object or function (`Object`), or a piece of host data that scripts can hold but never inspect
(`Opaque`).

Objects and opaque values are compared by identity; primitives by value. `PartialEq` on `Value` is SameValueZero
(see [`is`](crate::core::equality::is)), which is the rule `Map` keys use.

*/

use std::{
  any::Any,
  fmt::{Debug, Display, Formatter},
  rc::Rc
};

use crate::{
  abstractions::IString,
  api::object::{ObjectKind, ObjectRef},
  core::{
    equality,
    format::{FormatStyle, Formattable}
  }
};

#[derive(Clone, Default)]
pub enum Value {
  #[default]
  Undefined,
  Null,
  Boolean(bool),
  Number(f64),
  String(IString),
  Object(ObjectRef),
  Opaque(Rc<dyn Any>),
}

impl Value {
  /// Wraps arbitrary host data.
  pub fn opaque<T: Any>(data: T) -> Value {
    Value::Opaque(Rc::new(data))
  }

  /// Objects and functions. Only these may key a `WeakMap`.
  #[inline(always)]
  pub fn is_object_like(&self) -> bool {
    matches!(self, Value::Object(_))
  }

  #[inline(always)]
  pub fn is_undefined(&self) -> bool {
    matches!(self, Value::Undefined)
  }

  pub fn as_object(&self) -> Option<&ObjectRef> {
    match self {
      Value::Object(object) => Some(object),
      _                     => None
    }
  }

  pub fn as_number(&self) -> Option<f64> {
    match self {
      Value::Number(n) => Some(*n),
      _                => None
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _                => None
    }
  }

  /// Borrows the host data of an opaque value, if it is a `T`.
  pub fn downcast_opaque<T: Any>(&self) -> Option<&T> {
    match self {
      Value::Opaque(data) => data.downcast_ref::<T>(),
      _                   => None
    }
  }

  /// The name of the value's type, as `typeof` would report it. Opaque values report `"opaque"`.
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Undefined  => "undefined",
      Value::Null       => "object",
      Value::Boolean(_) => "boolean",
      Value::Number(_)  => "number",
      Value::String(_)  => "string",
      Value::Object(object) => match object.kind() {
        ObjectKind::Plain    => "object",
        ObjectKind::Function => "function",
      },
      Value::Opaque(_)  => "opaque",
    }
  }
}

// region Conversions

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Boolean(b)
  }
}

impl From<i32> for Value {
  fn from(n: i32) -> Self {
    Value::Number(n as f64)
  }
}

impl From<f64> for Value {
  fn from(n: f64) -> Self {
    Value::Number(n)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::String(IString::from(s))
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::String(IString::from(s))
  }
}

impl From<IString> for Value {
  fn from(s: IString) -> Self {
    Value::String(s)
  }
}

impl From<ObjectRef> for Value {
  fn from(object: ObjectRef) -> Self {
    Value::Object(object)
  }
}

impl From<&ObjectRef> for Value {
  fn from(object: &ObjectRef) -> Self {
    Value::Object(object.clone())
  }
}

impl From<()> for Value {
  fn from(_: ()) -> Self {
    Value::Undefined
  }
}

// endregion Conversions

impl PartialEq for Value {
  fn eq(&self, other: &Self) -> bool {
    equality::is(self, other)
  }
}

impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Default))
  }
}

impl Debug for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Debug))
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_objects_and_functions_are_object_like() {
    assert!(Value::from(ObjectRef::new()).is_object_like());
    assert!(Value::from(ObjectRef::function()).is_object_like());

    for primitive in [
      Value::Undefined,
      Value::Null,
      Value::from(false),
      Value::from(5),
      Value::from("five"),
      Value::opaque(5u8),
    ] {
      assert!(!primitive.is_object_like(), "{:?}", primitive);
    }
  }

  #[test]
  fn type_names() {
    assert_eq!(Value::Undefined.type_name(), "undefined");
    assert_eq!(Value::Null.type_name(), "object");
    assert_eq!(Value::from(1.5).type_name(), "number");
    assert_eq!(Value::from(ObjectRef::function()).type_name(), "function");
  }

  #[test]
  fn opaque_values_downcast_to_their_host_type() {
    let value = Value::opaque(String::from("host"));
    assert_eq!(value.downcast_opaque::<String>().map(String::as_str), Some("host"));
    assert!(value.downcast_opaque::<u32>().is_none());
    assert_eq!(value, value.clone());
    assert_ne!(value, Value::opaque(String::from("host")));
  }
}
