/*!

The iteration helper collection constructors use to drain their initial contents. A source is anything iterable, or
an [`ArrayLike`] object: one with a numeric `length` property and elements under the property names `"0"`, `"1"`,
and so on.

*/

use crate::api::{
  object::ObjectRef,
  value::Value
};

/// Calls `callback` once per element of `source`, in order.
pub fn for_each_of<I, F>(source: I, mut callback: F)
  where I: IntoIterator,
        F: FnMut(I::Item)
{
  for item in source {
    callback(item);
  }
}

/// As `for_each_of`, but stops at the first error and returns it.
pub fn try_for_each_of<I, F, E>(source: I, mut callback: F) -> Result<(), E>
  where I: IntoIterator,
        F: FnMut(I::Item) -> Result<(), E>
{
  for item in source {
    callback(item)?;
  }
  Ok(())
}

/// Views an object as an array-like source. Elements are read at the time each is reached; missing elements are
/// `undefined`. A missing or non-numeric `length` reads as 0.
pub struct ArrayLike(pub ObjectRef);

impl ArrayLike {
  pub fn len(&self) -> usize {
    match self.0.get("length").and_then(|length| length.as_number()) {
      Some(n) if n.is_finite() && n > 0.0 => n.trunc() as usize,
      _                                   => 0
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl IntoIterator for ArrayLike {
  type Item     = Value;
  type IntoIter = ArrayLikeIter;

  fn into_iter(self) -> Self::IntoIter {
    let length = self.len();
    ArrayLikeIter { object: self.0, index: 0, length }
  }
}

pub struct ArrayLikeIter {
  object: ObjectRef,
  index : usize,
  length: usize,
}

impl Iterator for ArrayLikeIter {
  type Item = Value;

  fn next(&mut self) -> Option<Self::Item> {
    if self.index >= self.length {
      return None;
    }
    let element = self.object.get(&self.index.to_string()).unwrap_or_default();
    self.index += 1;
    Some(element)
  }
}
