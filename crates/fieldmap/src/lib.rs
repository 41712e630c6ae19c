// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # fieldmap: flat object ↔ string-map transformation
//!
//! Converts any `#[derive(FieldMap)]` struct to and from a flat
//! `HashMap<String, String>` using a pluggable value codec, without
//! hand-writing per-type converters. The string map is the sole
//! interchange format, useful for form encoding, key-value stores, and
//! property-bag protocols.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fieldmap::{FieldMap, Transformer};
//! use std::sync::Arc;
//!
//! #[derive(FieldMap, Default, Debug, PartialEq)]
//! struct Account {
//!     id: u64,
//!     active: bool,
//!     label: String,
//! }
//!
//! // Startup: pick the value codec and register name-constructible types.
//! fieldmap_json::install();
//! fieldmap::register_type::<Account>();
//!
//! let account = Account { id: 100, active: true, label: "x".into() };
//! let outcome = fieldmap::to_map(&account)?;
//! assert_eq!(outcome.map["id"], "100");
//!
//! let back = fieldmap::from_map::<Account>(&outcome.map)?;
//! assert_eq!(back.value, account);
//! # Ok::<(), fieldmap::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! caller
//!   -> Transformer        (to_map / from_map / from_map_named)
//!        -> FieldCatalog  (per-type field index, cached)
//!        -> CodecRegistry (active codec, resolved once)
//!             -> Codec    (per-field encode/decode; adapter crates)
//! ```
//!
//! ## Failure policy
//!
//! Per-field problems never abort a conversion: they are logged and
//! collected as [`FieldFault`]s on the result, and the field is skipped
//! (left at its `Default` on the way in). Only `NoCodec`, `UnknownType`,
//! and `Instantiation` fail a whole call.
//!
//! ## Scope
//!
//! Flat maps only: leaf field types are primitives, `char`, `String`,
//! `Vec<u8>`, and `Option` of those. Nested structs, schema validation,
//! and map versioning are out of scope.

// Allow the derive macro to work inside this crate's tests
extern crate self as fieldmap;

/// The `FieldMap` trait: by-name field access generated by the derive.
pub mod api;
/// Per-type field index, lazily built and cached.
pub mod catalog;
/// The codec contract consumed by the transformer.
pub mod codec;
/// Static type/field descriptors emitted by the derive.
pub mod descriptor;
/// Error types (total failures, accessor errors, codec errors).
pub mod error;
/// Process-wide codec and type registries.
pub mod registry;
/// The object transformer and its fault accumulator.
pub mod transform;
/// Runtime value container and native conversions.
pub mod value;

pub use api::FieldMap as FieldMapTrait; // Trait (for type bounds)
pub use fieldmap_derive::FieldMap; // Derive macro (for #[derive(FieldMap)])

pub use catalog::{CatalogEntry, FieldCatalog};
pub use codec::Codec;
pub use descriptor::{FieldDescriptor, FieldKind, TypeDescriptor};
pub use error::{AccessError, CodecError, Error, Result};
pub use registry::{CodecRegistry, Factory, TypeRegistry};
pub use transform::{
    field_names, field_names_of, FaultCause, FieldFault, StringMap, Transformed,
    TransformOutcome, Transformer,
};
pub use value::{FromValue, Value};

use api::FieldMap;
use std::sync::Arc;

/// Register a codec with the process-wide registry.
///
/// The first registered codec becomes the active one at first transform.
pub fn register_codec(codec: Arc<dyn Codec>) {
    CodecRegistry::global().register(codec);
}

/// Register `T` for name-based construction with the process-wide registry.
pub fn register_type<T: FieldMap + Default>() {
    TypeRegistry::global().register::<T>();
}

/// [`Transformer::to_map`] over the process-wide registries.
pub fn to_map(data: &dyn FieldMap) -> Result<TransformOutcome> {
    Transformer::global().to_map(data)
}

/// [`Transformer::from_map`] over the process-wide registries.
pub fn from_map<T: FieldMap + Default>(data: &StringMap) -> Result<Transformed<T>> {
    Transformer::global().from_map(data)
}

/// [`Transformer::from_map_named`] over the process-wide registries.
pub fn from_map_named(data: &StringMap, type_name: &str) -> Result<Transformed<Box<dyn FieldMap>>> {
    Transformer::global().from_map_named(data, type_name)
}

/// [`Transformer::create_instance`] over the process-wide registries.
pub fn create_instance(type_name: &str) -> Result<Box<dyn FieldMap>> {
    Transformer::global().create_instance(type_name)
}

#[cfg(test)]
mod tests;
