/*!

The capability registry decides, once per collection type, whether `Map`, `Set`, and `WeakMap` are backed by a
native implementation the hosting platform provides or by this crate's shim.

## Probing

Probing is *shallow*: a platform that declares a capability is trusted to provide a conformant implementation. No
structural or behavioral check is made. The declaration is an explicit input (a [`Platform`]), which makes probing
a pure function of that input, so tests can supply any combination of present and absent natives.

## Resolution

[`resolve`] picks the native candidate if there is one and the shim otherwise. It cannot fail, because the shim is
always available. [`CapabilityRegistry::probe`] resolves all three collection types eagerly and the resulting
registry is immutable: a binding is never reconsidered. Code that constructs collections takes a registry (or uses
[`process_registry`]) rather than probing again.

## The Process Registry

[`process_registry`] is probed from [`Platform::host`] the first time it is used and lives for the rest of the
process. `Map::new()`, `Set::new()`, and `WeakMap::new()` construct through it.

*/

use std::fmt::{Debug, Formatter};

use enumflags2::{bitflags, BitFlags};
use once_cell::sync::Lazy;

use crate::{
  abstractions::IString,
  api::{
    map::Map,
    set::Set,
    value::Value,
    weak_map::WeakMap
  },
  core::{
    backend::{MapFactory, SetFactory, WeakMapFactory},
    equality::KeyEquality,
    error::CollectionError,
    iteration::{for_each_of, try_for_each_of},
    native,
    shim
  },
  log::{debug, info}
};

pub const MAP_FEATURE     : &str = "Map";
pub const SET_FEATURE     : &str = "Set";
pub const WEAK_MAP_FEATURE: &str = "WeakMap";

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Capability {
  NativeMap,
  NativeSet,
  NativeWeakMap,
}

pub type Capabilities = BitFlags<Capability, u8>;

/// Behavior switches for the shims. Natives ignore it.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct ShimConfig {
  /// The element equality of the `Set` shim. SameValueZero unless exact parity with strictly compared sets is
  /// required.
  pub set_equality: KeyEquality,
}

/// The capabilities a hosting platform declares, and the accessor for the native implementations behind them.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Platform {
  capabilities: Capabilities,
}

impl Platform {
  pub fn new(capabilities: Capabilities) -> Platform {
    Platform { capabilities }
  }

  /// A platform with no native collections.
  pub fn bare() -> Platform {
    Platform::new(Capabilities::empty())
  }

  /// A platform providing every native collection.
  pub fn full() -> Platform {
    Platform::new(Capabilities::all())
  }

  /// The platform this crate was built for, as declared by the `native_map`, `native_set`, and `native_weak_map`
  /// cargo features.
  pub fn host() -> Platform {
    let mut capabilities = Capabilities::empty();
    if cfg!(feature = "native_map") {
      capabilities |= Capability::NativeMap;
    }
    if cfg!(feature = "native_set") {
      capabilities |= Capability::NativeSet;
    }
    if cfg!(feature = "native_weak_map") {
      capabilities |= Capability::NativeWeakMap;
    }
    Platform::new(capabilities)
  }

  #[inline(always)]
  pub fn capabilities(&self) -> Capabilities {
    self.capabilities
  }

  #[inline(always)]
  pub fn provides(&self, capability: Capability) -> bool {
    self.capabilities.contains(capability)
  }

  pub fn native_map(&self) -> Option<MapFactory> {
    self.provides(Capability::NativeMap).then_some(native::map::factory as MapFactory)
  }

  pub fn native_set(&self) -> Option<SetFactory> {
    self.provides(Capability::NativeSet).then_some(native::set::factory as SetFactory)
  }

  pub fn native_weak_map(&self) -> Option<WeakMapFactory> {
    self.provides(Capability::NativeWeakMap).then_some(native::weak_map::factory as WeakMapFactory)
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum BindingSource {
  Native,
  Shim,
}

/// The outcome of probing for one collection type: its name and the one implementation that backs it.
#[derive(Clone)]
pub struct CollectionBinding<F> {
  feature: IString,
  source : BindingSource,
  factory: F,
}

impl<F: Copy> CollectionBinding<F> {
  #[inline(always)]
  pub fn feature(&self) -> &IString {
    &self.feature
  }

  #[inline(always)]
  pub fn source(&self) -> BindingSource {
    self.source
  }

  #[inline(always)]
  pub fn factory(&self) -> F {
    self.factory
  }
}

impl<F> Debug for CollectionBinding<F> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} => {:?}", self.feature, self.source)
  }
}

/// Binds `feature` to `native_candidate` if it is present, and to `shim` otherwise.
pub fn resolve<F>(feature: &str, native_candidate: Option<F>, shim: F) -> CollectionBinding<F> {
  let (source, factory) = match native_candidate {
    Some(native) => (BindingSource::Native, native),
    None         => (BindingSource::Shim, shim),
  };
  info!(1, "{} bound to the {:?} implementation", feature, source);

  CollectionBinding {
    feature: IString::from(feature),
    source,
    factory
  }
}

/// The frozen set of bindings, one per collection type.
#[derive(Debug)]
pub struct CapabilityRegistry {
  map     : CollectionBinding<MapFactory>,
  set     : CollectionBinding<SetFactory>,
  weak_map: CollectionBinding<WeakMapFactory>,
  config  : ShimConfig,
}

impl CapabilityRegistry {
  /// Resolves every collection type against `platform`.
  pub fn probe(platform: &Platform, config: ShimConfig) -> CapabilityRegistry {
    debug!(2, "probing platform {:?}", platform.capabilities());

    CapabilityRegistry {
      map     : resolve(MAP_FEATURE, platform.native_map(), shim::map::factory as MapFactory),
      set     : resolve(SET_FEATURE, platform.native_set(), shim::set::factory as SetFactory),
      weak_map: resolve(WEAK_MAP_FEATURE, platform.native_weak_map(), shim::weak_map::factory as WeakMapFactory),
      config,
    }
  }

  // region Accessors

  pub fn map_binding(&self) -> &CollectionBinding<MapFactory> {
    &self.map
  }

  pub fn set_binding(&self) -> &CollectionBinding<SetFactory> {
    &self.set
  }

  pub fn weak_map_binding(&self) -> &CollectionBinding<WeakMapFactory> {
    &self.weak_map
  }

  /// Which implementation backs the named collection type, if it is one this registry knows.
  pub fn source_of(&self, feature: &str) -> Option<BindingSource> {
    match feature {
      MAP_FEATURE      => Some(self.map.source),
      SET_FEATURE      => Some(self.set.source),
      WEAK_MAP_FEATURE => Some(self.weak_map.source),
      _                => None
    }
  }

  pub fn config(&self) -> &ShimConfig {
    &self.config
  }

  // endregion Accessors

  // region Construction

  pub fn new_map(&self) -> Map {
    Map::with_backend((self.map.factory)(&self.config))
  }

  pub fn map_from_entries<I>(&self, entries: I) -> Map
    where I: IntoIterator<Item = (Value, Value)>
  {
    let map = self.new_map();
    for_each_of(entries, |(key, value)| {
      map.set(key, value);
    });
    map
  }

  pub fn new_set(&self) -> Set {
    Set::with_backend((self.set.factory)(&self.config))
  }

  pub fn set_from<I>(&self, values: I) -> Set
    where I: IntoIterator<Item = Value>
  {
    let set = self.new_set();
    for_each_of(values, |value| {
      set.add(value);
    });
    set
  }

  pub fn new_weak_map(&self) -> WeakMap {
    WeakMap::with_backend((self.weak_map.factory)(&self.config))
  }

  /// Fails on the first primitive key. Entries before it have been added to a map that is then discarded.
  pub fn weak_map_from<I>(&self, entries: I) -> Result<WeakMap, CollectionError>
    where I: IntoIterator<Item = (Value, Value)>
  {
    let weak_map = self.new_weak_map();
    try_for_each_of(entries, |(key, value)| {
      weak_map.set(&key, value).map(|_| ())
    })?;
    Ok(weak_map)
  }

  // endregion Construction
}

static PROCESS_REGISTRY: Lazy<CapabilityRegistry> = Lazy::new(|| {
  CapabilityRegistry::probe(&Platform::host(), ShimConfig::default())
});

/// The registry probed from the host platform on first use.
#[inline(always)]
pub fn process_registry() -> &'static CapabilityRegistry {
  &PROCESS_REGISTRY
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolve_prefers_a_present_native() {
    let binding = resolve("Thing", Some("native"), "shim");
    assert_eq!(binding.source(), BindingSource::Native);
    assert_eq!(binding.factory(), "native");
    assert_eq!(&**binding.feature(), "Thing");

    let binding = resolve("Thing", None, "shim");
    assert_eq!(binding.source(), BindingSource::Shim);
    assert_eq!(binding.factory(), "shim");
  }

  #[test]
  fn bare_platform_binds_every_shim() {
    let registry = CapabilityRegistry::probe(&Platform::bare(), ShimConfig::default());
    assert_eq!(registry.source_of(MAP_FEATURE), Some(BindingSource::Shim));
    assert_eq!(registry.source_of(SET_FEATURE), Some(BindingSource::Shim));
    assert_eq!(registry.source_of(WEAK_MAP_FEATURE), Some(BindingSource::Shim));
    assert_eq!(registry.source_of("Promise"), None);
  }

  #[test]
  fn declared_capabilities_bind_natives_independently() {
    let platform = Platform::new(Capability::NativeSet | Capability::NativeWeakMap);
    let registry = CapabilityRegistry::probe(&platform, ShimConfig::default());

    assert_eq!(registry.map_binding().source(), BindingSource::Shim);
    assert_eq!(registry.set_binding().source(), BindingSource::Native);
    assert_eq!(registry.weak_map_binding().source(), BindingSource::Native);
  }

  #[test]
  fn host_platform_follows_cargo_features() {
    let host = Platform::host();
    assert_eq!(host.provides(Capability::NativeMap), cfg!(feature = "native_map"));
    assert_eq!(host.provides(Capability::NativeSet), cfg!(feature = "native_set"));
    assert_eq!(host.provides(Capability::NativeWeakMap), cfg!(feature = "native_weak_map"));
  }

  #[test]
  fn process_registry_is_probed_once() {
    let first  = process_registry() as *const CapabilityRegistry;
    let second = process_registry() as *const CapabilityRegistry;
    assert_eq!(first, second);

    let expected = if cfg!(feature = "native_map") { BindingSource::Native } else { BindingSource::Shim };
    assert_eq!(process_registry().map_binding().source(), expected);
  }

  #[test]
  fn registries_construct_through_their_bindings() {
    for platform in [Platform::bare(), Platform::full()] {
      let registry = CapabilityRegistry::probe(&platform, ShimConfig::default());

      let map = registry.map_from_entries([
        (Value::from("a"), Value::from(1)),
        (Value::from("b"), Value::from(2)),
      ]);
      assert_eq!(map.size(), 2);

      let set = registry.set_from([1, 2, 2, 3].map(Value::from));
      assert_eq!(set.size(), 3);

      let weak_map = registry.new_weak_map();
      assert!(!weak_map.has(&Value::from(crate::api::object::ObjectRef::new())));
    }
  }

  #[test]
  fn weak_map_construction_rejects_primitive_keys() {
    let registry = CapabilityRegistry::probe(&Platform::bare(), ShimConfig::default());
    let result   = registry.weak_map_from([(Value::from(5), Value::from(1))]);
    assert_eq!(result.err(), Some(CollectionError::InvalidKey { found: "number" }));
  }

  #[test]
  fn config_reaches_the_set_shim() {
    let config   = ShimConfig { set_equality: KeyEquality::Strict };
    let registry = CapabilityRegistry::probe(&Platform::bare(), config);
    let nan      = Value::from(f64::NAN);

    let set = registry.set_from([nan.clone(), nan.clone()]);
    assert_eq!(set.size(), 2);
    assert!(!set.has(&nan));
  }
}
