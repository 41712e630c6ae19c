// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The codec contract consumed by the transformer.
//!
//! A codec turns one [`Value`] into its string representation and back,
//! parameterized by the field's declared [`FieldKind`]. The transformer
//! makes no assumption about the wire format (JSON, YAML, form encoding),
//! only that encode and decode are inverses for supported values and that
//! unsupported input fails with a [`CodecError`] instead of corrupting
//! data silently. Adapter crates (`fieldmap-json`, `fieldmap-yaml`) provide
//! the shipped implementations.

use crate::descriptor::FieldKind;
use crate::error::CodecError;
use crate::value::Value;

/// Strategy for converting a single value to/from its string form.
pub trait Codec: Send + Sync {
    /// Short identifier used in logs and [`CodecError`]s (e.g. `"json"`).
    fn name(&self) -> &'static str;

    /// Encode `value` to a string, with the field's declared kind as hint.
    ///
    /// [`Value::Null`] must encode to a defined string (typically the
    /// format's null literal); the transformer does not special-case it.
    ///
    /// # Errors
    ///
    /// [`CodecError`] when the codec cannot represent the value.
    fn encode(&self, value: &Value, kind: FieldKind) -> Result<String, CodecError>;

    /// Decode `raw` into a value of the declared kind.
    ///
    /// The null literal decodes to [`Value::Null`]; whether that is
    /// acceptable for the target field is the transformer's concern.
    ///
    /// # Errors
    ///
    /// [`CodecError`] when `raw` is not a valid encoding for `kind`.
    fn decode(&self, raw: &str, kind: FieldKind) -> Result<Value, CodecError>;
}
