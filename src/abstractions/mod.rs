/*!

Types/type aliases that abstract over the implementing backing type, plus the ambient machinery (logging) shared by
the rest of the crate.

*/

// Logging
pub mod log;

// Interned string. Feature names, property names, and instance tokens are all interned.
pub use string_cache::DefaultAtom as IString;
