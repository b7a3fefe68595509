/*!

The public API of the library: the value model collections hold, and the collection handles themselves.

*/

pub mod map;
pub mod object;
pub mod set;
pub mod value;
pub mod weak_map;


pub use map::{Map, MapIterator};
pub use object::{ObjectKind, ObjectRef, PropertyAttribute, PropertyAttributes, WeakObjectRef};
pub use set::{Set, SetIterator};
pub use value::Value;
pub use weak_map::WeakMap;
