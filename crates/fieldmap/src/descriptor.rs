// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static type descriptors emitted by `#[derive(FieldMap)]`.

/// Declared-type hint for a single field.
///
/// This is the complete set of leaf types the derive accepts; nested
/// structs and collections (other than `Vec<u8>`) are out of scope
/// since the string map is flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    String,
    /// `Vec<u8>`, an opaque byte payload.
    Bytes,
}

impl FieldKind {
    /// Short name used in diagnostics and codec errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "string",
            Self::Bytes => "bytes",
        }
    }
}

/// Descriptor for one instance field.
///
/// Emitted as part of a `static` [`TypeDescriptor`] by the derive; the
/// matching accessor lives on the generated [`FieldMap`](crate::api::FieldMap)
/// impl, which reads and writes the field uniformly regardless of its
/// declared visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name, unique within the owning type.
    pub name: &'static str,
    /// Declared value type, handed to the codec as the encode/decode hint.
    pub kind: FieldKind,
    /// `true` for `Option<T>` fields; these accept [`Value::Null`](crate::Value::Null).
    pub optional: bool,
}

/// A complete type descriptor: fully-qualified name plus the ordered set
/// of transformable fields.
///
/// Descriptors are `'static` (one per derived type) and never mutated;
/// the field catalog uses the descriptor identity as its cache key.
#[derive(Debug, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Fully-qualified type name (`module_path!() + "::" + ident`).
    pub type_name: &'static str,
    /// Fields declared directly on the type, minus `#[fieldmap(skip)]`.
    ///
    /// There is no supertype traversal: Rust structs have no inheritance,
    /// and embedded structs are not flattened (flat maps only).
    pub fields: &'static [FieldDescriptor],
}

impl TypeDescriptor {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of transformable fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// `true` for a type with no qualifying fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
