/*!

The public weak map: associations from objects (and functions) to values that are neither enumerable nor counted,
and that never keep their key alive. Primitive keys are rejected by `set` and are simply absent for every other
operation.

Which implementation backs a `WeakMap` is up to the registry: the native one holds weak references; the shim tags
each key with a hidden property (see [`crate::core::shim::weak_map`]).

*/

use std::{
  cell::RefCell,
  rc::Rc
};

use crate::{
  api::{
    object::ObjectRef,
    value::Value
  },
  core::{
    backend::WeakMapBackend,
    error::CollectionError,
    registry::process_registry
  },
  log::warning
};

#[derive(Clone)]
pub struct WeakMap {
  backend: Rc<RefCell<Box<dyn WeakMapBackend>>>,
}

impl WeakMap {
  // region Constructors

  /// An empty weak map from the process registry's binding.
  pub fn new() -> WeakMap {
    process_registry().new_weak_map()
  }

  /// A weak map seeded with `entries`. Fails on the first primitive key.
  pub fn from_entries<I, V>(entries: I) -> Result<WeakMap, CollectionError>
    where I: IntoIterator<Item = (Value, V)>,
          V: Into<Value>
  {
    process_registry().weak_map_from(entries.into_iter().map(|(key, value)| (key, value.into())))
  }

  /// A weak map over an explicitly chosen backend, bypassing the registry.
  pub fn with_backend(backend: Box<dyn WeakMapBackend>) -> WeakMap {
    WeakMap { backend: Rc::new(RefCell::new(backend)) }
  }

  // endregion Constructors

  /// Associates `value` with `key`. A primitive key is an invalid argument, and the map is left untouched.
  pub fn set(&self, key: &Value, value: impl Into<Value>) -> Result<&WeakMap, CollectionError> {
    let Some(object) = key.as_object() else {
      warning!(2, "rejected a weak map key of type {}", key.type_name());
      return Err(CollectionError::InvalidKey { found: key.type_name() });
    };
    self.set_object(object, value);
    Ok(self)
  }

  /// `set` for a key statically known to be an object. Cannot fail.
  pub fn set_object(&self, key: &ObjectRef, value: impl Into<Value>) -> &WeakMap {
    self.backend.borrow_mut().set(key, value.into());
    self
  }

  pub fn get(&self, key: &Value) -> Option<Value> {
    key.as_object().and_then(|object| self.backend.borrow().get(object))
  }

  pub fn has(&self, key: &Value) -> bool {
    key.as_object().is_some_and(|object| self.backend.borrow().has(object))
  }

  /// Returns whether `key` had an association.
  pub fn delete(&self, key: &Value) -> bool {
    key.as_object().is_some_and(|object| self.backend.borrow_mut().delete(object))
  }

  /// Do both handles share one collection?
  pub fn ptr_eq(&self, other: &WeakMap) -> bool {
    Rc::ptr_eq(&self.backend, &other.backend)
  }
}

impl Default for WeakMap {
  fn default() -> Self {
    WeakMap::new()
  }
}

impl std::fmt::Debug for WeakMap {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    // Weak maps have no enumeration.
    write!(f, "WeakMap {{ <items unknown> }}")
  }
}
