// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide registries: the active codec and name-based type factories.
//!
//! Both registries replace open-ended runtime discovery with explicit
//! registration calls at process startup. They are plain structs so tests
//! can run against private instances; production code goes through the
//! `global()` singletons.

use crate::api::FieldMap;
use crate::codec::Codec;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

// ---------------------------------------------------------------------------
// Codec registry
// ---------------------------------------------------------------------------

/// Holds the registered codecs and resolves the active one.
///
/// The first registered codec wins, in registration order. Resolution is
/// memoized on first use: exactly one resolve pass runs even under
/// concurrent first use, and later registrations cannot change the active
/// codec (no hot-swap). An empty registry is not an error until a caller
/// actually attempts a transform.
#[derive(Default)]
pub struct CodecRegistry {
    codecs: Mutex<Vec<Arc<dyn Codec>>>,
    active: OnceLock<Option<Arc<dyn Codec>>>,
}

impl CodecRegistry {
    /// Create an empty registry (tests; production code uses [`global`](Self::global)).
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry instance.
    pub fn global() -> &'static CodecRegistry {
        static REGISTRY: OnceLock<CodecRegistry> = OnceLock::new();
        REGISTRY.get_or_init(CodecRegistry::new)
    }

    /// Append a codec to the registration list.
    ///
    /// Call at process startup, before the first transform; once the active
    /// codec has been resolved, additional registrations are recorded but
    /// never selected.
    pub fn register(&self, codec: Arc<dyn Codec>) {
        log::debug!("registering codec '{}'", codec.name());
        self.codecs.lock().push(codec);
    }

    /// The active codec: first registered, memoized for the process life.
    ///
    /// # Errors
    ///
    /// [`Error::NoCodec`] when nothing was registered before first use.
    pub fn active(&self) -> Result<Arc<dyn Codec>> {
        let resolved = self.active.get_or_init(|| {
            let codec = self.codecs.lock().first().cloned();
            match &codec {
                Some(c) => log::debug!("resolved active codec '{}'", c.name()),
                None => log::debug!("codec resolution found no registered codec"),
            }
            codec
        });
        resolved.clone().ok_or(Error::NoCodec)
    }
}

// ---------------------------------------------------------------------------
// Type registry
// ---------------------------------------------------------------------------

/// Factory constructing a default-initialized instance of a registered type.
///
/// Factories registered via [`TypeRegistry::register`] never fail; custom
/// factories installed with [`TypeRegistry::register_factory`] may decline
/// with [`Error::Instantiation`].
pub type Factory = fn() -> Result<Box<dyn FieldMap>>;

/// Maps fully-qualified type names to construction factories.
///
/// The explicit registration call replaces dynamic class loading: only
/// types registered at startup can be constructed by name.
#[derive(Default)]
pub struct TypeRegistry {
    factories: Mutex<HashMap<&'static str, Factory>>,
}

impl TypeRegistry {
    /// Create an empty registry (tests; production code uses [`global`](Self::global)).
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry instance.
    pub fn global() -> &'static TypeRegistry {
        static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
        REGISTRY.get_or_init(TypeRegistry::new)
    }

    /// Register `T` under its fully-qualified descriptor name.
    ///
    /// Re-registering the same name replaces the factory (last one wins);
    /// the descriptor name is `'static`, so the entry never dangles.
    pub fn register<T: FieldMap + Default>(&self) {
        let name = T::default().type_descriptor().type_name;
        log::debug!("registering type '{}'", name);
        self.factories
            .lock()
            .insert(name, || Ok(Box::new(T::default()) as Box<dyn FieldMap>));
    }

    /// Register a custom factory under an explicit name.
    pub fn register_factory(&self, name: &'static str, factory: Factory) {
        log::debug!("registering factory for type '{}'", name);
        self.factories.lock().insert(name, factory);
    }

    /// Construct a default-initialized instance by type name.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownType`] when the name was never registered;
    /// [`Error::Instantiation`] when a custom factory declines.
    pub fn create(&self, name: &str) -> Result<Box<dyn FieldMap>> {
        let factory = self
            .factories
            .lock()
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownType(name.to_string()))?;
        factory()
    }

    /// `true` if `name` has a registered factory.
    pub fn contains(&self, name: &str) -> bool {
        self.factories.lock().contains_key(name)
    }
}
