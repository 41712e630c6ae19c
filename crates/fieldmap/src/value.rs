// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime value container moved between field accessors and codecs.

use crate::descriptor::FieldKind;
use crate::AccessError;

/// A single field value at runtime.
///
/// One variant per [`FieldKind`] plus [`Value::Null`], which represents a
/// `None` in an `Option<T>` field. Codecs receive the declared kind as a
/// hint alongside the value; `Null` still travels through the codec so the
/// wire form of an absent value is the codec's decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),
    Bytes(Vec<u8>),
    /// Absent value (`None` in an optional field).
    Null,
}

impl Value {
    /// The [`FieldKind`] this value inhabits, `None` for [`Value::Null`].
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Bool(_) => Some(FieldKind::Bool),
            Self::I8(_) => Some(FieldKind::I8),
            Self::I16(_) => Some(FieldKind::I16),
            Self::I32(_) => Some(FieldKind::I32),
            Self::I64(_) => Some(FieldKind::I64),
            Self::U8(_) => Some(FieldKind::U8),
            Self::U16(_) => Some(FieldKind::U16),
            Self::U32(_) => Some(FieldKind::U32),
            Self::U64(_) => Some(FieldKind::U64),
            Self::F32(_) => Some(FieldKind::F32),
            Self::F64(_) => Some(FieldKind::F64),
            Self::Char(_) => Some(FieldKind::Char),
            Self::String(_) => Some(FieldKind::String),
            Self::Bytes(_) => Some(FieldKind::Bytes),
            Self::Null => None,
        }
    }

    /// Short variant name for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self.kind() {
            Some(kind) => kind.name(),
            None => "null",
        }
    }

    /// `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Conversion out of a [`Value`] into a native field type.
///
/// Strict by design: the variant must match the target type exactly. The
/// codec decodes with the declared kind as hint, so a mismatch here means
/// the map entry and the field genuinely disagree.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, AccessError>;
}

macro_rules! impl_value_conversions {
    ($ty:ty, $variant:ident, $name:expr) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, AccessError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(AccessError::TypeMismatch {
                        expected: $name,
                        got: other.kind_name(),
                    }),
                }
            }
        }
    };
}

impl_value_conversions!(bool, Bool, "bool");
impl_value_conversions!(i8, I8, "i8");
impl_value_conversions!(i16, I16, "i16");
impl_value_conversions!(i32, I32, "i32");
impl_value_conversions!(i64, I64, "i64");
impl_value_conversions!(u8, U8, "u8");
impl_value_conversions!(u16, U16, "u16");
impl_value_conversions!(u32, U32, "u32");
impl_value_conversions!(u64, U64, "u64");
impl_value_conversions!(f32, F32, "f32");
impl_value_conversions!(f64, F64, "f64");
impl_value_conversions!(char, Char, "char");
impl_value_conversions!(String, String, "string");
impl_value_conversions!(Vec<u8>, Bytes, "bytes");

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}
