/*!

The machinery behind the public collections: the key equality rules, the capability registry that binds each
collection type to an implementation, the backend seam, and the two families of implementations, shims and natives.

*/

pub mod backend;
pub mod equality;
pub mod error;
pub mod format;
pub mod iteration;
pub mod native;
pub mod registry;
pub mod shim;
