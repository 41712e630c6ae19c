// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The object transformer: bidirectional conversion between a struct and a
//! flat string map.
//!
//! Per-field failures are never propagated to the caller. Both directions
//! collect them into [`FieldFault`] records on the result (and log them),
//! so a single bad field costs one map entry, not the whole conversion.
//! Only construction and resolution failures (no codec registered,
//! unresolvable type name) fail a call outright.

use crate::api::FieldMap;
use crate::catalog::FieldCatalog;
use crate::codec::Codec;
use crate::descriptor::TypeDescriptor;
use crate::error::{AccessError, CodecError, Result};
use crate::registry::{CodecRegistry, TypeRegistry};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Flat, order-irrelevant field-name → string-value representation.
///
/// The sole external representation of a transformed object.
pub type StringMap = HashMap<String, String>;

/// Where in the per-field pipeline a fault occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum FaultCause {
    /// Reading the field value failed.
    Read(AccessError),
    /// The codec could not encode the value.
    Encode(CodecError),
    /// The codec could not decode the map entry.
    Decode(CodecError),
    /// Writing the decoded value into the instance failed.
    Write(AccessError),
    /// The map key has no corresponding field; the entry was skipped.
    /// Not an error; recorded so callers can see what was ignored.
    UnknownKey,
}

/// One skipped field, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFault {
    pub field: String,
    pub cause: FaultCause,
}

impl fmt::Display for FieldFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            FaultCause::Read(e) => write!(f, "read '{}': {}", self.field, e),
            FaultCause::Encode(e) => write!(f, "encode '{}': {}", self.field, e),
            FaultCause::Decode(e) => write!(f, "decode '{}': {}", self.field, e),
            FaultCause::Write(e) => write!(f, "write '{}': {}", self.field, e),
            FaultCause::UnknownKey => write!(f, "unknown key '{}'", self.field),
        }
    }
}

/// Result of [`Transformer::to_map`]: the map plus any skipped fields.
#[derive(Debug, Default)]
pub struct TransformOutcome {
    pub map: StringMap,
    pub faults: Vec<FieldFault>,
}

impl TransformOutcome {
    /// `true` when every field made it into the map.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Result of the `from_map` family: the instance plus any skipped entries.
#[derive(Debug)]
pub struct Transformed<T> {
    pub value: T,
    pub faults: Vec<FieldFault>,
}

impl<T> Transformed<T> {
    /// `true` when every map entry was applied.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// The core conversion engine.
///
/// Stateless apart from the registries it borrows; a `Transformer` is
/// cheap to construct and safe to share across threads. Production code
/// normally uses [`Transformer::global`] (or the crate-level free
/// functions); tests build one over private registries.
#[derive(Clone, Copy)]
pub struct Transformer<'r> {
    codecs: &'r CodecRegistry,
    types: &'r TypeRegistry,
}

impl Transformer<'static> {
    /// Transformer over the process-wide registries.
    pub fn global() -> Self {
        Self::new(CodecRegistry::global(), TypeRegistry::global())
    }
}

impl<'r> Transformer<'r> {
    /// Transformer over explicit registries.
    pub fn new(codecs: &'r CodecRegistry, types: &'r TypeRegistry) -> Self {
        Self { codecs, types }
    }

    /// Convert an object into a string map.
    ///
    /// Produces one entry per catalog field; a `None` in an optional field
    /// still produces an entry (the codec's null literal). Fields that fail
    /// to read or encode are omitted from the map and recorded in
    /// [`TransformOutcome::faults`].
    ///
    /// # Errors
    ///
    /// [`Error::NoCodec`](crate::Error::NoCodec) is the only total failure.
    pub fn to_map(&self, data: &dyn FieldMap) -> Result<TransformOutcome> {
        let codec = self.codecs.active()?;
        let descriptor = data.type_descriptor();
        let catalog = FieldCatalog::global().fields_of(descriptor);

        let mut map = StringMap::with_capacity(catalog.len());
        let mut faults = Vec::new();
        for field in catalog.iter() {
            let value = match data.get_field(field.name) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!(
                        "failed to read field '{}' of {}: {}",
                        field.name,
                        descriptor.type_name,
                        e
                    );
                    faults.push(FieldFault {
                        field: field.name.to_string(),
                        cause: FaultCause::Read(e),
                    });
                    continue;
                }
            };
            match codec.encode(&value, field.kind) {
                Ok(encoded) => {
                    map.insert(field.name.to_string(), encoded);
                }
                Err(e) => {
                    log::warn!(
                        "failed to encode field '{}' of {}: {}",
                        field.name,
                        descriptor.type_name,
                        e
                    );
                    faults.push(FieldFault {
                        field: field.name.to_string(),
                        cause: FaultCause::Encode(e),
                    });
                }
            }
        }
        Ok(TransformOutcome { map, faults })
    }

    /// Build a `T` from a string map.
    ///
    /// Starts from `T::default()`; map entries overwrite fields one by one.
    /// Unknown keys are tolerated (recorded as [`FaultCause::UnknownKey`]),
    /// and fields without a map entry stay at their default. Decode/write
    /// failures leave the field at its default and processing continues.
    ///
    /// # Errors
    ///
    /// [`Error::NoCodec`](crate::Error::NoCodec) is the only total failure
    /// on this typed path.
    pub fn from_map<T: FieldMap + Default>(&self, data: &StringMap) -> Result<Transformed<T>> {
        let codec = self.codecs.active()?;
        let mut value = T::default();
        let faults = self.apply(codec.as_ref(), &mut value, data);
        Ok(Transformed { value, faults })
    }

    /// Build an instance from a string map, resolving the target type by
    /// its fully-qualified name through the type registry.
    ///
    /// # Errors
    ///
    /// [`Error::NoCodec`](crate::Error::NoCodec),
    /// [`Error::UnknownType`](crate::Error::UnknownType), or
    /// [`Error::Instantiation`](crate::Error::Instantiation), all total;
    /// per-field problems are faults as in [`from_map`](Self::from_map).
    pub fn from_map_named(
        &self,
        data: &StringMap,
        type_name: &str,
    ) -> Result<Transformed<Box<dyn FieldMap>>> {
        let codec = self.codecs.active()?;
        let mut value = self.types.create(type_name)?;
        let faults = self.apply(codec.as_ref(), value.as_mut(), data);
        Ok(Transformed { value, faults })
    }

    /// Construct a default-initialized instance by type name.
    ///
    /// # Errors
    ///
    /// See [`TypeRegistry::create`].
    pub fn create_instance(&self, type_name: &str) -> Result<Box<dyn FieldMap>> {
        self.types.create(type_name)
    }

    /// Shared `from_map` loop: decode and write each entry, best effort.
    fn apply(
        &self,
        codec: &dyn Codec,
        target: &mut dyn FieldMap,
        data: &StringMap,
    ) -> Vec<FieldFault> {
        let descriptor = target.type_descriptor();
        let catalog = FieldCatalog::global().fields_of(descriptor);

        let mut faults = Vec::new();
        for (key, raw) in data {
            let Some(field) = catalog.field(key) else {
                log::debug!(
                    "map key '{}' has no field on {}, skipping",
                    key,
                    descriptor.type_name
                );
                faults.push(FieldFault {
                    field: key.clone(),
                    cause: FaultCause::UnknownKey,
                });
                continue;
            };
            let value = match codec.decode(raw, field.kind) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!(
                        "failed to decode field '{}' of {}: {}",
                        field.name,
                        descriptor.type_name,
                        e
                    );
                    faults.push(FieldFault {
                        field: field.name.to_string(),
                        cause: FaultCause::Decode(e),
                    });
                    continue;
                }
            };
            if let Err(e) = target.set_field(field.name, value) {
                log::warn!(
                    "failed to set field '{}' of {}: {}",
                    field.name,
                    descriptor.type_name,
                    e
                );
                faults.push(FieldFault {
                    field: field.name.to_string(),
                    cause: FaultCause::Write(e),
                });
            }
        }
        faults
    }
}

/// Field names of `T`, as recorded in its descriptor.
///
/// Idempotent: repeated calls return the same set.
pub fn field_names<T: FieldMap + Default>() -> BTreeSet<String> {
    field_names_of(T::default().type_descriptor())
}

/// Field names for an explicit descriptor.
pub fn field_names_of(descriptor: &'static TypeDescriptor) -> BTreeSet<String> {
    descriptor
        .fields
        .iter()
        .map(|f| f.name.to_string())
        .collect()
}
