/*!

Keyed collections (`Map`, `Set`, `WeakMap`) for a dynamically typed value model, with each collection type backed
by either a native implementation the hosting platform declares, or a hand-written fallback ("shim").

The choice between the two is made exactly once per collection type by the
[`CapabilityRegistry`](crate::core::registry::CapabilityRegistry), and every collection constructed afterward goes
through whichever implementation was bound. Callers never see the difference.

```
use keyed_shim::api::{Map, Set, Value};

let map = Map::new();
map.set("a", 1).set("b", 2);
assert_eq!(map.size(), 2);
assert_eq!(map.get(&Value::from("a")), Some(Value::from(1)));

let set = Set::from_values([1, 2, 2, 3].map(Value::from));
assert_eq!(set.values().collect::<Vec<_>>(), [1, 2, 3].map(Value::from));
```

*/

pub mod api;
pub mod abstractions;
pub mod core;

// We re-export abstractions that are meant to be used publicly.
pub use abstractions::{
  log,
  IString
};

pub use crate::core::{
  equality::is,
  error::CollectionError,
  registry::{
    process_registry,
    CapabilityRegistry,
    Capability,
    Platform,
    ShimConfig
  }
};
