/*!

Collection operations are total except in two places:

 1. `WeakMap::set` with a primitive key is an invalid argument. Nothing is mutated.
 2. Calling an operation of the [`Abstract`](crate::core::backend::Abstract) placeholder instead of a resolved
    implementation. This is a wiring defect in the hosting code, not something a caller can trigger through the
    public constructors.

Absence is never an error: it is `None` or `false`.

*/

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, PartialEq, Eq)]
pub enum CollectionError {
  InvalidKey {
    /// The type name of the rejected key.
    found: &'static str
  },
  NotImplemented {
    feature  : &'static str,
    operation: &'static str
  }
}

impl Display for CollectionError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      CollectionError::InvalidKey { found } => {
        write!(f, "invalid value used as weak map key: expected an object or function, found {}", found)
      }

      CollectionError::NotImplemented { feature, operation } => {
        write!(
          f,
          "{}.{} is not implemented: the abstract placeholder was invoked instead of a resolved implementation",
          feature,
          operation
        )
      }

    } // end match on `CollectionError`
  }
}

impl Debug for CollectionError {
  fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl Error for CollectionError {}
