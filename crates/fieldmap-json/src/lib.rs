// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON value codec for `fieldmap`, backed by `serde_json`.
//!
//! Each field value is encoded as a standalone JSON document: numbers and
//! booleans as their literals, strings quoted, `Vec<u8>` as an array of
//! numbers, and an absent (`None`) value as the JSON `null` literal.

use fieldmap::{Codec, CodecError, FieldKind, Value};
use serde_json::Value as Json;
use std::sync::Arc;

const NAME: &str = "json";

/// The JSON codec. Stateless; register once at startup.
pub struct JsonCodec;

/// Register [`JsonCodec`] with the process-wide codec registry.
pub fn install() {
    fieldmap::register_codec(Arc::new(JsonCodec));
}

impl Codec for JsonCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn encode(&self, value: &Value, _kind: FieldKind) -> Result<String, CodecError> {
        let json = to_json(value)?;
        serde_json::to_string(&json).map_err(|e| CodecError::new(NAME, e.to_string()))
    }

    fn decode(&self, raw: &str, kind: FieldKind) -> Result<Value, CodecError> {
        let json: Json =
            serde_json::from_str(raw).map_err(|e| CodecError::new(NAME, e.to_string()))?;
        if json.is_null() {
            return Ok(Value::Null);
        }
        from_json(&json, kind)
    }
}

fn to_json(value: &Value) -> Result<Json, CodecError> {
    let json = match value {
        Value::Bool(v) => Json::from(*v),
        Value::I8(v) => Json::from(*v),
        Value::I16(v) => Json::from(*v),
        Value::I32(v) => Json::from(*v),
        Value::I64(v) => Json::from(*v),
        Value::U8(v) => Json::from(*v),
        Value::U16(v) => Json::from(*v),
        Value::U32(v) => Json::from(*v),
        Value::U64(v) => Json::from(*v),
        Value::F32(v) => float_json(f64::from(*v))?,
        Value::F64(v) => float_json(*v)?,
        Value::Char(v) => Json::from(v.to_string()),
        Value::String(v) => Json::from(v.as_str()),
        Value::Bytes(v) => Json::from(v.clone()),
        Value::Null => Json::Null,
    };
    Ok(json)
}

fn float_json(v: f64) -> Result<Json, CodecError> {
    // JSON has no NaN/Infinity literals.
    serde_json::Number::from_f64(v)
        .map(Json::Number)
        .ok_or_else(|| CodecError::new(NAME, format!("non-finite float {} not representable", v)))
}

fn from_json(json: &Json, kind: FieldKind) -> Result<Value, CodecError> {
    let value = match kind {
        FieldKind::Bool => Value::Bool(expect_bool(json)?),
        FieldKind::I8 => Value::I8(narrow(expect_i64(json)?, kind)?),
        FieldKind::I16 => Value::I16(narrow(expect_i64(json)?, kind)?),
        FieldKind::I32 => Value::I32(narrow(expect_i64(json)?, kind)?),
        FieldKind::I64 => Value::I64(expect_i64(json)?),
        FieldKind::U8 => Value::U8(narrow_u(expect_u64(json)?, kind)?),
        FieldKind::U16 => Value::U16(narrow_u(expect_u64(json)?, kind)?),
        FieldKind::U32 => Value::U32(narrow_u(expect_u64(json)?, kind)?),
        FieldKind::U64 => Value::U64(expect_u64(json)?),
        FieldKind::F32 => Value::F32(expect_f64(json)? as f32),
        FieldKind::F64 => Value::F64(expect_f64(json)?),
        FieldKind::Char => {
            let s = expect_str(json)?;
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => {
                    return Err(CodecError::new(
                        NAME,
                        format!("expected single-char string, got {:?}", s),
                    ))
                }
            }
        }
        FieldKind::String => Value::String(expect_str(json)?.to_string()),
        FieldKind::Bytes => {
            let items = json.as_array().ok_or_else(|| type_error("array", json))?;
            let mut bytes = Vec::with_capacity(items.len());
            for item in items {
                bytes.push(narrow_u::<u8>(expect_u64(item)?, FieldKind::U8)?);
            }
            Value::Bytes(bytes)
        }
    };
    Ok(value)
}

fn expect_bool(json: &Json) -> Result<bool, CodecError> {
    json.as_bool().ok_or_else(|| type_error("boolean", json))
}

fn expect_i64(json: &Json) -> Result<i64, CodecError> {
    json.as_i64().ok_or_else(|| type_error("integer", json))
}

fn expect_u64(json: &Json) -> Result<u64, CodecError> {
    json.as_u64()
        .ok_or_else(|| type_error("unsigned integer", json))
}

fn expect_f64(json: &Json) -> Result<f64, CodecError> {
    json.as_f64().ok_or_else(|| type_error("number", json))
}

fn expect_str(json: &Json) -> Result<&str, CodecError> {
    json.as_str().ok_or_else(|| type_error("string", json))
}

fn type_error(expected: &str, got: &Json) -> CodecError {
    CodecError::new(NAME, format!("expected {}, got {}", expected, got))
}

fn narrow<T: TryFrom<i64>>(v: i64, kind: FieldKind) -> Result<T, CodecError> {
    T::try_from(v)
        .map_err(|_| CodecError::new(NAME, format!("{} out of range for {}", v, kind.name())))
}

fn narrow_u<T: TryFrom<u64>>(v: u64, kind: FieldKind) -> Result<T, CodecError> {
    T::try_from(v)
        .map_err(|_| CodecError::new(NAME, format!("{} out of range for {}", v, kind.name())))
}
