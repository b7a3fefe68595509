/*!

The hand-written fallbacks bound when a platform does not declare a native collection.

All three shims favor an obviously correct equality contract over speed: every lookup is a linear scan. The weak map
shim has no weak table at all. It stores each association on the key object itself, under a property name unique to
the weak map instance (see [`weak_map`]).

*/

pub mod map;
pub mod set;
pub mod token;
pub mod weak_map;


pub use map::MapShim;
pub use set::SetShim;
pub use token::InstanceToken;
pub use weak_map::WeakMapShim;

use crate::api::value::Value;

/// Collections store `-0` as `+0`. The two are the same key, and the stored one is what iteration reports.
#[inline(always)]
pub(crate) fn normalize_zero(value: Value) -> Value {
  match value {
    Value::Number(n) if n == 0.0 => Value::Number(0.0),
    other                        => other
  }
}
