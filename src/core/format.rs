/*!

There are different text representations possible for values and collections depending on the context. This module
provides a unified API for formatting them across the project.

*/

use std::{
  fmt::Display,
  rc::Rc
};

use crate::api::{
  object::ObjectKind,
  value::Value
};

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum FormatStyle {
  #[default]
  Default, // How the value converts to a string
  Simple,  // Abbreviate nested structure
  Input,   // Format as a valid input expression, if possible.
  Debug,   // Format with extra debugging information
}

pub trait Formattable {
  /// Writes a text representation of `self` according to the given `FormatStyle`.
  /// Use `format!` and friends to create a string.
  fn repr(&self, style: FormatStyle) -> String;
}

impl Display for dyn Formattable {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", Formattable::repr(self, FormatStyle::Default))
  }
}

fn number_repr(n: f64, style: FormatStyle) -> String {
  if n.is_nan() {
    "NaN".to_string()
  } else if n.is_infinite() {
    if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
  } else if n == 0.0 {
    // Only the debugging representation distinguishes negative zero.
    if style == FormatStyle::Debug && n.is_sign_negative() { "-0" } else { "0" }.to_string()
  } else {
    format!("{}", n)
  }
}

impl Formattable for Value {
  fn repr(&self, style: FormatStyle) -> String {
    match self {
      Value::Undefined  => "undefined".to_string(),
      Value::Null       => "null".to_string(),
      Value::Boolean(b) => b.to_string(),
      Value::Number(n)  => number_repr(*n, style),

      Value::String(s) => match style {
        FormatStyle::Input | FormatStyle::Debug => format!("\"{}\"", s.escape_debug()),
        _                                       => s.to_string(),
      },

      Value::Object(object) => match (style, object.kind()) {
        (FormatStyle::Debug, _)                  => format!("{:?}", object),
        (FormatStyle::Simple, _)                 => "{…}".to_string(),
        (_, ObjectKind::Plain)                   => "[object Object]".to_string(),
        (_, ObjectKind::Function)                => "function () { [native code] }".to_string(),
      },

      Value::Opaque(data) => match style {
        FormatStyle::Debug => format!("[opaque@{:p}]", Rc::as_ptr(data) as *const ()),
        _                  => "[opaque]".to_string(),
      },
    }
  }
}

/// Joins the representations of `items` with `", "`.
pub(crate) fn join_repr<'a, T, I>(items: I, style: FormatStyle) -> String
  where T: Formattable + 'a,
        I: IntoIterator<Item = &'a T>
{
  items.into_iter()
       .map(|item| item.repr(style))
       .collect::<Vec<_>>()
       .join(", ")
}


#[cfg(test)]
mod tests {
  use super::*;
  use crate::api::object::ObjectRef;

  #[test]
  fn numbers_print_like_script_numbers() {
    assert_eq!(Value::from(1).repr(FormatStyle::Default), "1");
    assert_eq!(Value::from(1.5).repr(FormatStyle::Default), "1.5");
    assert_eq!(Value::from(f64::NAN).repr(FormatStyle::Default), "NaN");
    assert_eq!(Value::from(f64::NEG_INFINITY).repr(FormatStyle::Default), "-Infinity");
    assert_eq!(Value::from(-0.0).repr(FormatStyle::Default), "0");
    assert_eq!(Value::from(-0.0).repr(FormatStyle::Debug), "-0");
  }

  #[test]
  fn strings_are_quoted_only_for_input_and_debug() {
    let s = Value::from("a\"b");
    assert_eq!(s.repr(FormatStyle::Default), "a\"b");
    assert_eq!(s.repr(FormatStyle::Input), "\"a\\\"b\"");
    assert_eq!(format!("{}", Value::from("x")), "x");
    assert_eq!(format!("{:?}", Value::from("x")), "\"x\"");
  }

  #[test]
  fn objects() {
    assert_eq!(Value::from(ObjectRef::new()).repr(FormatStyle::Default), "[object Object]");
    assert_eq!(Value::from(ObjectRef::new()).repr(FormatStyle::Simple), "{…}");
    let values = [Value::from(1), Value::Null, Value::from("s")];
    assert_eq!(join_repr(&values, FormatStyle::Input), "1, null, \"s\"");
  }
}
