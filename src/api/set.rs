/*!

The public ordered set. Like [`Map`](crate::api::map::Map), a `Set` is a handle whose clones share one backing
collection bound by the registry.

Each iterator ([`Set::values`], [`Set::keys`], [`Set::entries`]) walks a snapshot of the elements taken when it was
created. It is finite, cannot be restarted, and is unaffected by later changes to the set. Iterating a `&Set` is the
same as iterating `values()`.

*/

use std::{
  cell::RefCell,
  fmt::{Debug, Display, Formatter},
  rc::Rc
};

use crate::{
  api::value::Value,
  core::{
    backend::SetBackend,
    format::{join_repr, FormatStyle, Formattable},
    registry::process_registry
  }
};

#[derive(Clone)]
pub struct Set {
  backend: Rc<RefCell<Box<dyn SetBackend>>>,
}

impl Set {
  // region Constructors

  /// An empty set from the process registry's binding.
  pub fn new() -> Set {
    process_registry().new_set()
  }

  /// A set holding the distinct elements of `values`, in first-occurrence order.
  pub fn from_values<I, V>(values: I) -> Set
    where I: IntoIterator<Item = V>,
          V: Into<Value>
  {
    process_registry().set_from(values.into_iter().map(Into::into))
  }

  /// A set over an explicitly chosen backend, bypassing the registry.
  pub fn with_backend(backend: Box<dyn SetBackend>) -> Set {
    Set { backend: Rc::new(RefCell::new(backend)) }
  }

  // endregion Constructors

  /// Appends `value` unless an equal value is present. Returns the set for chaining.
  pub fn add(&self, value: impl Into<Value>) -> &Set {
    self.backend.borrow_mut().add(value.into());
    self
  }

  pub fn has(&self, value: &Value) -> bool {
    self.backend.borrow().has(value)
  }

  /// Returns whether `value` was present.
  pub fn delete(&self, value: &Value) -> bool {
    self.backend.borrow_mut().delete(value)
  }

  pub fn clear(&self) {
    self.backend.borrow_mut().clear();
  }

  pub fn size(&self) -> usize {
    self.backend.borrow().size()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.size() == 0
  }

  /// Calls `callback(value, value, set)` for each element, in order. A value is its own key, hence the repetition.
  /// The elements are snapshotted before the first call.
  pub fn for_each<F>(&self, mut callback: F)
    where F: FnMut(&Value, &Value, &Set)
  {
    let values = self.backend.borrow().values();
    for value in values.iter() {
      callback(value, value, self);
    }
  }

  // region Iterators

  pub fn values(&self) -> SetIterator {
    SetIterator { values: self.backend.borrow().values().into_iter() }
  }

  /// Identical to `values()`.
  pub fn keys(&self) -> SetIterator {
    self.values()
  }

  /// `(value, value)` pairs over a snapshot.
  pub fn entries(&self) -> impl Iterator<Item = (Value, Value)> {
    self.values().map(|value| (value.clone(), value))
  }

  // endregion Iterators

  /// Do both handles share one collection?
  pub fn ptr_eq(&self, other: &Set) -> bool {
    Rc::ptr_eq(&self.backend, &other.backend)
  }
}

impl Default for Set {
  fn default() -> Self {
    Set::new()
  }
}

/// An iterator over a snapshot of a set's elements.
pub struct SetIterator {
  values: std::vec::IntoIter<Value>,
}

impl Iterator for SetIterator {
  type Item = Value;

  fn next(&mut self) -> Option<Self::Item> {
    self.values.next()
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.values.size_hint()
  }
}

impl ExactSizeIterator for SetIterator {}

impl IntoIterator for &Set {
  type Item     = Value;
  type IntoIter = SetIterator;

  fn into_iter(self) -> Self::IntoIter {
    self.values()
  }
}

impl Formattable for Set {
  fn repr(&self, style: FormatStyle) -> String {
    let values = self.values().collect::<Vec<_>>();
    match style {
      FormatStyle::Input  => format!("new Set([{}])", join_repr(&values, style)),
      FormatStyle::Simple => format!("Set({})", values.len()),
      _ if values.is_empty() => "Set(0) {}".to_string(),
      _                   => format!("Set({}) {{ {} }}", values.len(), join_repr(&values, style)),
    }
  }
}

impl Display for Set {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Default))
  }
}

impl Debug for Set {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.repr(FormatStyle::Debug))
  }
}
