/*!

# Weak Associations by Property Tagging

The weak map shim keeps no table. Each association lives on its key object, as a hidden (non-enumerable) property
named by the shim's [`InstanceToken`]. The property's value is an opaque record:

```text
key object
  ├── ...ordinary properties...
  └── "__weak_map:<time>:<count>:<random>"  (hidden)
        └── Association { owner: weak ref to key object, payload: Some(value) | None }
```

A record is valid for a lookup only if its owner is the key being looked up. A record copied onto another object
(by client code reading the hidden property and defining it elsewhere) is therefore ignored, and a `set` through the
copy attaches a fresh record rather than writing into the original's.

## Lifetime

Because the record hangs off the key, it lives exactly as long as the key object and is dropped with it. The shim
itself holds nothing, so a key the weak map knows about is not kept alive by the weak map. The owner back-reference
is weak for the same reason; a strong one would make every tagged key own itself.

The association cannot be reclaimed *before* its key. A payload that refers back to its own key forms a reference
cycle the shim cannot break; that key is then never dropped.

## Deletion

`delete` tombstones the record: the payload is dropped and replaced with `None`, but the hidden property stays on the
key. A later `set` revives the same record.

## Independence of Instances

Two weak maps tag the same key under different token names, so neither ever reads or writes the other's record.

## Not Capability-Secure

The hidden property is hidden only from `keys()`. Any code holding the key can list it with `own_property_names()`,
read the record, or overwrite or remove the property, which destroys the association. This is a disclosed limitation
of property tagging, not something the shim defends against.

*/

use std::{
  any::Any,
  cell::RefCell,
  mem,
  rc::Rc
};

use crate::{
  api::{
    object::{ObjectRef, PropertyAttribute, WeakObjectRef},
    value::Value
  },
  core::{
    backend::WeakMapBackend,
    registry::ShimConfig,
    shim::token::InstanceToken
  },
  log::{trace, warning}
};

/// The record stored under the token property.
struct Association {
  owner  : WeakObjectRef,
  /// `None` after deletion.
  payload: Option<Value>,
}

type AssociationRef = Rc<RefCell<Association>>;

pub struct WeakMapShim {
  token: InstanceToken,
}

impl WeakMapShim {
  pub fn new() -> WeakMapShim {
    let token = InstanceToken::generate();
    trace!(4, "weak map shim created with token {}", token);
    WeakMapShim { token }
  }

  /// The record under this shim's token, if there is one and it belongs to `key`. Tombstoned records are returned.
  fn record_for(&self, key: &ObjectRef) -> Option<AssociationRef> {
    let Some(Value::Opaque(data)) = key.get(self.token.as_str()) else {
      return None;
    };
    let record: AssociationRef = Rc::downcast::<RefCell<Association>>(data).ok()?;

    if record.borrow().owner.is_reference_to(key) {
      Some(record)
    } else {
      None
    }
  }

  fn attach(&self, key: &ObjectRef, value: Value) {
    let record: Rc<dyn Any> = Rc::new(RefCell::new(Association {
      owner  : key.downgrade(),
      payload: Some(value),
    }));

    if !key.define_property(self.token.as_str(), Value::Opaque(record), PropertyAttribute::Hidden) {
      warning!(2, "could not attach a weak map record to {:?}: its tag property was made non-configurable", key);
    }
  }
}

impl Default for WeakMapShim {
  fn default() -> Self {
    WeakMapShim::new()
  }
}

impl WeakMapBackend for WeakMapShim {
  fn set(&mut self, key: &ObjectRef, value: Value) {
    match self.record_for(key) {

      Some(record) => {
        let previous = mem::replace(&mut record.borrow_mut().payload, Some(value));
        drop(previous);
      }

      None => self.attach(key, value),

    }
  }

  fn get(&self, key: &ObjectRef) -> Option<Value> {
    self.record_for(key).and_then(|record| record.borrow().payload.clone())
  }

  fn has(&self, key: &ObjectRef) -> bool {
    self.record_for(key).is_some_and(|record| record.borrow().payload.is_some())
  }

  fn delete(&mut self, key: &ObjectRef) -> bool {
    let Some(record) = self.record_for(key) else {
      return false;
    };
    let previous = record.borrow_mut().payload.take();
    previous.is_some()
  }
}

pub fn factory(_config: &ShimConfig) -> Box<dyn WeakMapBackend> {
  Box::new(WeakMapShim::new())
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_get_overwrite_delete() {
    let mut weak_map = WeakMapShim::new();
    let key          = ObjectRef::new();

    weak_map.set(&key, Value::from(1));
    assert_eq!(weak_map.get(&key), Some(Value::from(1)));

    weak_map.set(&key, Value::from(2));
    assert_eq!(weak_map.get(&key), Some(Value::from(2)));
    // Overwriting reuses the record rather than attaching a second one.
    assert_eq!(key.own_property_names().len(), 1);

    assert!(weak_map.delete(&key));
    assert!(!weak_map.has(&key));
    assert_eq!(weak_map.get(&key), None);
    assert!(!weak_map.delete(&key));
  }

  #[test]
  fn delete_tombstones_in_place_and_set_revives() {
    let mut weak_map = WeakMapShim::new();
    let key          = ObjectRef::function();

    weak_map.set(&key, Value::from("first"));
    weak_map.delete(&key);
    assert!(key.has_own(weak_map.token.as_str()));

    weak_map.set(&key, Value::from("second"));
    assert_eq!(weak_map.get(&key), Some(Value::from("second")));
    assert_eq!(key.own_property_names().len(), 1);
  }

  #[test]
  fn the_tag_is_hidden_from_enumeration() {
    let mut weak_map = WeakMapShim::new();
    let key          = ObjectRef::new();
    key.set("visible", Value::from(1));

    weak_map.set(&key, Value::from(2));
    assert_eq!(key.keys().len(), 1);
    assert_eq!(key.own_property_names().len(), 2);
    assert_eq!(key.attributes_of(weak_map.token.as_str()), Some(PropertyAttribute::Hidden));
  }

  #[test]
  fn copied_records_are_not_trusted() {
    let mut weak_map = WeakMapShim::new();
    let key          = ObjectRef::new();
    let impostor     = ObjectRef::new();
    weak_map.set(&key, Value::from("mine"));

    // Borrow the record from `key` and plant it on `impostor`.
    let record = key.get(weak_map.token.as_str()).unwrap();
    impostor.define_property(weak_map.token.as_str(), record, PropertyAttribute::Hidden);

    assert!(!weak_map.has(&impostor));
    assert_eq!(weak_map.get(&impostor), None);
    assert!(!weak_map.delete(&impostor));

    weak_map.set(&impostor, Value::from("theirs"));
    assert_eq!(weak_map.get(&impostor), Some(Value::from("theirs")));
    assert_eq!(weak_map.get(&key), Some(Value::from("mine")));
  }

  #[test]
  fn foreign_values_under_the_token_are_ignored() {
    let mut weak_map = WeakMapShim::new();
    let key          = ObjectRef::new();
    key.set(weak_map.token.as_str(), Value::from("not a record"));

    assert!(!weak_map.has(&key));
    weak_map.set(&key, Value::from(1));
    assert_eq!(weak_map.get(&key), Some(Value::from(1)));
  }

  #[test]
  fn the_key_is_not_kept_alive() {
    let mut weak_map = WeakMapShim::new();
    let key          = ObjectRef::new();
    let payload      = ObjectRef::new();
    let watch        = payload.downgrade();

    weak_map.set(&key, Value::from(&payload));
    drop(payload);
    assert!(watch.is_live());
    assert_eq!(key.strong_count(), 1);

    // The payload goes with the key.
    drop(key);
    assert!(!watch.is_live());
  }

  #[test]
  fn removing_the_tag_destroys_the_association() {
    let mut weak_map = WeakMapShim::new();
    let key          = ObjectRef::new();
    weak_map.set(&key, Value::from(1));

    let tag = key.own_property_names().remove(0);
    assert!(key.remove(&tag));
    assert!(!weak_map.has(&key));
  }
}
