/*!

Objects of the hosting environment's value model. An object is an ordered table of named properties, each carrying a
set of [`PropertyAttributes`]. Objects are shared by reference ([`ObjectRef`]) and compared by identity.

Two views of an object's properties exist, and the difference matters to the weak map shim:

 - [`ObjectRef::keys`] enumerates only properties with the `Enumerable` attribute. This is what ordinary client code
   sees.
 - [`ObjectRef::own_property_names`] lists everything, including non-enumerable properties. Nothing is truly hidden;
   any code holding the object can list, read, or overwrite every property on it.

## Lifecycle and Ownership

An `Object` is owned jointly by every `ObjectRef` to it and is dropped, together with all of its properties, when the
last `ObjectRef` goes away. A [`WeakObjectRef`] observes an object without keeping it alive.

*/

use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::{Rc, Weak}
};

use enumflags2::{bitflags, make_bitflags, BitFlags};

use crate::{
  abstractions::IString,
  api::value::Value
};

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Hash)]
pub enum ObjectKind {
  #[default]
  Plain,
  Function,
}

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PropertyAttribute {
  /// Ordinary assignment may replace the value.
  Writable,
  /// Listed by `keys()`.
  Enumerable,
  /// May be redefined or removed.
  Configurable,
}

pub type PropertyAttributes = BitFlags<PropertyAttribute, u8>;

impl PropertyAttribute {
  #![allow(non_upper_case_globals)]

  /// The attributes of a property created by ordinary assignment.
  pub const Ordinary: PropertyAttributes = make_bitflags!(
    PropertyAttribute::{
      Writable | Enumerable | Configurable
    }
  );

  /// Writable and configurable, but absent from `keys()`.
  pub const Hidden: PropertyAttributes = make_bitflags!(
    PropertyAttribute::{
      Writable | Configurable
    }
  );
}

struct Property {
  name      : IString,
  value     : Value,
  attributes: PropertyAttributes,
}

#[derive(Default)]
pub struct Object {
  kind      : ObjectKind,
  properties: Vec<Property>,
}

impl Object {
  fn position(&self, name: &str) -> Option<usize> {
    self.properties.iter().position(|property| &*property.name == name)
  }
}

/// A shared reference to an `Object`. Cloning the reference does not clone the object.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
  // region Constructors

  /// A new plain object with no properties.
  pub fn new() -> ObjectRef {
    ObjectRef::with_kind(ObjectKind::Plain)
  }

  /// A new function object with no properties.
  pub fn function() -> ObjectRef {
    ObjectRef::with_kind(ObjectKind::Function)
  }

  pub fn with_kind(kind: ObjectKind) -> ObjectRef {
    ObjectRef(Rc::new(RefCell::new(Object { kind, properties: Vec::new() })))
  }

  // endregion Constructors

  // region Identity

  pub fn kind(&self) -> ObjectKind {
    self.0.borrow().kind
  }

  /// Identity comparison.
  #[inline(always)]
  pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }

  /// The address of the object, stable for as long as any strong or weak reference to it exists.
  #[inline(always)]
  pub fn address(&self) -> usize {
    Rc::as_ptr(&self.0) as *const () as usize
  }

  pub fn downgrade(&self) -> WeakObjectRef {
    WeakObjectRef(Rc::downgrade(&self.0))
  }

  /// The number of `ObjectRef`s to this object, this one included.
  pub fn strong_count(&self) -> usize {
    Rc::strong_count(&self.0)
  }

  // endregion Identity

  // region Properties

  /// The value of the own property `name`, if there is one.
  pub fn get(&self, name: &str) -> Option<Value> {
    let object = self.0.borrow();
    object.position(name).map(|index| object.properties[index].value.clone())
  }

  pub fn has_own(&self, name: &str) -> bool {
    self.0.borrow().position(name).is_some()
  }

  pub fn attributes_of(&self, name: &str) -> Option<PropertyAttributes> {
    let object = self.0.borrow();
    object.position(name).map(|index| object.properties[index].attributes)
  }

  /// Ordinary assignment. Creates an ordinary property if `name` is absent and overwrites the value of a writable
  /// property otherwise. Returns whether the write happened.
  pub fn set(&self, name: &str, value: Value) -> bool {
    let mut object = self.0.borrow_mut();
    match object.position(name) {

      Some(index) => {
        let property = &mut object.properties[index];
        if property.attributes.contains(PropertyAttribute::Writable) {
          property.value = value;
          true
        } else {
          false
        }
      }

      None => {
        object.properties.push(Property {
          name      : IString::from(name),
          value,
          attributes: PropertyAttribute::Ordinary,
        });
        true
      }

    }
  }

  /// Creates or replaces the property `name` with the given value and attributes. An existing property keeps its
  /// position. Redefining a non-configurable property is refused and returns `false`.
  pub fn define_property(&self, name: &str, value: Value, attributes: PropertyAttributes) -> bool {
    let mut object = self.0.borrow_mut();
    match object.position(name) {

      Some(index) => {
        let property = &mut object.properties[index];
        if !property.attributes.contains(PropertyAttribute::Configurable) {
          return false;
        }
        property.value      = value;
        property.attributes = attributes;
      }

      None => {
        object.properties.push(Property { name: IString::from(name), value, attributes });
      }

    }
    true
  }

  /// Removes the property `name`. Returns `false` if the property is non-configurable; removing an absent property
  /// succeeds.
  pub fn remove(&self, name: &str) -> bool {
    // The removed value is dropped after the borrow ends, since dropping it may drop objects that refer back here.
    let removed = {
      let mut object = self.0.borrow_mut();
      match object.position(name) {
        Some(index) if !object.properties[index].attributes.contains(PropertyAttribute::Configurable) => {
          return false;
        }
        Some(index) => Some(object.properties.remove(index)),
        None        => None,
      }
    };
    drop(removed);
    true
  }

  /// Names of enumerable own properties in creation order.
  pub fn keys(&self) -> Vec<IString> {
    self.0
        .borrow()
        .properties
        .iter()
        .filter(|property| property.attributes.contains(PropertyAttribute::Enumerable))
        .map(|property| property.name.clone())
        .collect()
  }

  /// Names of all own properties, enumerable or not, in creation order.
  pub fn own_property_names(&self) -> Vec<IString> {
    self.0.borrow().properties.iter().map(|property| property.name.clone()).collect()
  }

  // endregion Properties
}

impl Default for ObjectRef {
  fn default() -> Self {
    ObjectRef::new()
  }
}

impl PartialEq for ObjectRef {
  fn eq(&self, other: &Self) -> bool {
    self.ptr_eq(other)
  }
}

impl Eq for ObjectRef {}

impl Debug for ObjectRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.kind() {
      ObjectKind::Plain    => write!(f, "[object Object@{:#x}]", self.address()),
      ObjectKind::Function => write!(f, "[function@{:#x}]", self.address()),
    }
  }
}

/// A non-owning reference to an `Object`.
#[derive(Clone)]
pub struct WeakObjectRef(Weak<RefCell<Object>>);

impl WeakObjectRef {
  pub fn upgrade(&self) -> Option<ObjectRef> {
    self.0.upgrade().map(ObjectRef)
  }

  /// Is `object` the object this reference was made from? Never true once that object is gone.
  pub fn is_reference_to(&self, object: &ObjectRef) -> bool {
    std::ptr::eq(self.0.as_ptr(), Rc::as_ptr(&object.0))
  }

  pub fn is_live(&self) -> bool {
    self.0.strong_count() > 0
  }
}

impl Debug for WeakObjectRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self.upgrade() {
      Some(object) => write!(f, "Weak({:?})", object),
      None         => write!(f, "Weak(<dropped>)"),
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ordinary_assignment_creates_enumerable_properties() {
    let object = ObjectRef::new();
    assert!(object.set("a", Value::from(1)));
    assert!(object.set("b", Value::from(2)));
    assert!(object.set("a", Value::from(3)));

    assert_eq!(object.get("a"), Some(Value::from(3)));
    assert_eq!(object.keys(), vec![IString::from("a"), IString::from("b")]);
    assert_eq!(object.attributes_of("a"), Some(PropertyAttribute::Ordinary));
  }

  #[test]
  fn hidden_properties_are_listed_but_not_enumerated() {
    let object = ObjectRef::new();
    object.set("visible", Value::from(true));
    object.define_property("tag", Value::Null, PropertyAttribute::Hidden);

    assert!(object.has_own("tag"));
    assert_eq!(object.keys(), vec![IString::from("visible")]);
    assert_eq!(
      object.own_property_names(),
      vec![IString::from("visible"), IString::from("tag")]
    );
  }

  #[test]
  fn frozen_properties_refuse_writes() {
    let object = ObjectRef::new();
    object.define_property("fixed", Value::from(1), PropertyAttributes::empty());

    assert!(!object.set("fixed", Value::from(2)));
    assert!(!object.define_property("fixed", Value::from(3), PropertyAttribute::Ordinary));
    assert!(!object.remove("fixed"));
    assert_eq!(object.get("fixed"), Some(Value::from(1)));

    assert!(object.remove("absent"));
  }

  #[test]
  fn weak_references_do_not_keep_objects_alive() {
    let object = ObjectRef::function();
    let weak   = object.downgrade();

    assert!(weak.is_reference_to(&object));
    assert!(weak.upgrade().is_some_and(|o| o.ptr_eq(&object)));
    assert_eq!(object.strong_count(), 1);

    drop(object);
    assert!(!weak.is_live());
    assert!(weak.upgrade().is_none());
  }

  #[test]
  fn identity_not_structure() {
    let a = ObjectRef::new();
    let b = ObjectRef::new();
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_ne!(a.address(), b.address());
  }
}
