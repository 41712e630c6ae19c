// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for transform, accessor, and codec failures.
//!
//! The split mirrors the propagation policy: [`Error`] variants are total
//! failures of a call, [`AccessError`] and [`CodecError`] surface per-field
//! problems that the transformer records and continues past (see
//! [`FieldFault`](crate::transform::FieldFault)).

use std::fmt;

/// Errors that fail a whole transformer call.
#[derive(Debug)]
pub enum Error {
    /// No codec has been registered; surfaced when a transform is attempted,
    /// not at registration time.
    NoCodec,
    /// A type name could not be resolved through the type registry.
    UnknownType(String),
    /// A registered factory declined to construct an instance.
    Instantiation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoCodec => write!(f, "no codec registered"),
            Error::UnknownType(name) => write!(f, "unknown type: {}", name),
            Error::Instantiation(msg) => write!(f, "instantiation failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Convenient alias for API results using the public `Error` type.
pub type Result<T> = core::result::Result<T, Error>;

/// Per-field accessor failure (generated `get_field`/`set_field`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// No field with that name on the type.
    FieldNotFound(String),
    /// Value variant does not match the declared field type. Writing
    /// `Value::Null` into a non-optional field reports `got: "null"`.
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::FieldNotFound(name) => write!(f, "field not found: {}", name),
            AccessError::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {}, got {}", expected, got)
            }
        }
    }
}

impl std::error::Error for AccessError {}

/// Failure inside a codec adapter (encode or decode of one value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecError {
    /// Codec that produced the failure (see [`Codec::name`](crate::Codec::name)).
    pub codec: &'static str,
    pub message: String,
}

impl CodecError {
    pub fn new(codec: &'static str, message: impl Into<String>) -> Self {
        Self {
            codec,
            message: message.into(),
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} codec: {}", self.codec, self.message)
    }
}

impl std::error::Error for CodecError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Error::NoCodec.to_string(), "no codec registered");
        assert_eq!(
            Error::UnknownType("a::B".into()).to_string(),
            "unknown type: a::B"
        );
        assert_eq!(
            AccessError::TypeMismatch {
                expected: "i32",
                got: "null"
            }
            .to_string(),
            "type mismatch: expected i32, got null"
        );
        assert_eq!(
            CodecError::new("json", "bad literal").to_string(),
            "json codec: bad literal"
        );
    }
}
