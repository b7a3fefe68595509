/*!

The native collections a platform may declare. These are what a conforming host provides: hash-indexed, amortized
constant-time collections with the same observable behavior as the shims. The native weak map holds real weak
references to its keys (`std::rc::Weak`) instead of tagging them.

*/

mod hash_key;
mod ordered_table;
pub mod map;
pub mod set;
pub mod weak_map;

pub use map::NativeMap;
pub use set::NativeSet;
pub use weak_map::NativeWeakMap;
