// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `FieldMap` trait: uniform by-name field access over a struct.

use crate::descriptor::TypeDescriptor;
use crate::error::AccessError;
use crate::value::Value;

/// Uniform read/write capability over a type's declared instance fields.
///
/// Implemented by `#[derive(FieldMap)]`, which expands inside the defining
/// crate and therefore reaches private fields: the accessors behave as if
/// every field were public, without any runtime visibility override.
///
/// The trait is object-safe so instances constructed by name through the
/// type registry can be handled as `Box<dyn FieldMap>`.
///
/// # Example
///
/// ```ignore
/// use fieldmap::{FieldMapTrait, Value};
///
/// #[derive(fieldmap::FieldMap, Default)]
/// struct Account {
///     id: u64,
///     label: String,
/// }
///
/// let mut acc = Account::default();
/// acc.set_field("id", Value::U64(7))?;
/// assert_eq!(acc.get_field("id")?, Value::U64(7));
/// # Ok::<(), fieldmap::AccessError>(())
/// ```
pub trait FieldMap: Send + Sync + 'static {
    /// Static descriptor for this type (one per derived struct).
    fn type_descriptor(&self) -> &'static TypeDescriptor;

    /// Read a field by name.
    ///
    /// An `Option<T>` field holding `None` reads as [`Value::Null`].
    ///
    /// # Errors
    ///
    /// [`AccessError::FieldNotFound`] for unknown or skipped fields.
    fn get_field(&self, name: &str) -> Result<Value, AccessError>;

    /// Write a field by name.
    ///
    /// The value variant must match the declared kind; [`Value::Null`] is
    /// only accepted by optional fields.
    ///
    /// # Errors
    ///
    /// [`AccessError::FieldNotFound`] or [`AccessError::TypeMismatch`].
    fn set_field(&mut self, name: &str, value: Value) -> Result<(), AccessError>;
}
