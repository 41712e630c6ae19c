// SPDX-License-Identifier: Apache-2.0 OR MIT

//! YAML value codec for `fieldmap`, backed by `serde_yaml`.
//!
//! Each field value is encoded as a single-line YAML scalar (or flow
//! sequence for `Vec<u8>`); `None` encodes as the `null` literal. The
//! trailing newline `serde_yaml` emits per document is stripped so map
//! values stay single-line.

use fieldmap::{Codec, CodecError, FieldKind, Value};
use serde_yaml::Value as Yaml;
use std::sync::Arc;

const NAME: &str = "yaml";

/// The YAML codec. Stateless; register once at startup.
pub struct YamlCodec;

/// Register [`YamlCodec`] with the process-wide codec registry.
pub fn install() {
    fieldmap::register_codec(Arc::new(YamlCodec));
}

impl Codec for YamlCodec {
    fn name(&self) -> &'static str {
        NAME
    }

    fn encode(&self, value: &Value, _kind: FieldKind) -> Result<String, CodecError> {
        let yaml = to_yaml(value);
        let rendered =
            serde_yaml::to_string(&yaml).map_err(|e| CodecError::new(NAME, e.to_string()))?;
        Ok(rendered.trim_end_matches('\n').to_string())
    }

    fn decode(&self, raw: &str, kind: FieldKind) -> Result<Value, CodecError> {
        let yaml: Yaml =
            serde_yaml::from_str(raw).map_err(|e| CodecError::new(NAME, e.to_string()))?;
        if yaml.is_null() {
            return Ok(Value::Null);
        }
        from_yaml(&yaml, kind)
    }
}

fn to_yaml(value: &Value) -> Yaml {
    match value {
        Value::Bool(v) => Yaml::from(*v),
        Value::I8(v) => Yaml::from(*v),
        Value::I16(v) => Yaml::from(*v),
        Value::I32(v) => Yaml::from(*v),
        Value::I64(v) => Yaml::from(*v),
        Value::U8(v) => Yaml::from(*v),
        Value::U16(v) => Yaml::from(*v),
        Value::U32(v) => Yaml::from(*v),
        Value::U64(v) => Yaml::from(*v),
        Value::F32(v) => Yaml::from(f64::from(*v)),
        Value::F64(v) => Yaml::from(*v),
        Value::Char(v) => Yaml::from(v.to_string()),
        Value::String(v) => Yaml::from(v.as_str()),
        Value::Bytes(v) => Yaml::Sequence(v.iter().map(|b| Yaml::from(*b)).collect()),
        Value::Null => Yaml::Null,
    }
}

fn from_yaml(yaml: &Yaml, kind: FieldKind) -> Result<Value, CodecError> {
    let value = match kind {
        FieldKind::Bool => Value::Bool(expect_bool(yaml)?),
        FieldKind::I8 => Value::I8(narrow(expect_i64(yaml)?, kind)?),
        FieldKind::I16 => Value::I16(narrow(expect_i64(yaml)?, kind)?),
        FieldKind::I32 => Value::I32(narrow(expect_i64(yaml)?, kind)?),
        FieldKind::I64 => Value::I64(expect_i64(yaml)?),
        FieldKind::U8 => Value::U8(narrow_u(expect_u64(yaml)?, kind)?),
        FieldKind::U16 => Value::U16(narrow_u(expect_u64(yaml)?, kind)?),
        FieldKind::U32 => Value::U32(narrow_u(expect_u64(yaml)?, kind)?),
        FieldKind::U64 => Value::U64(expect_u64(yaml)?),
        FieldKind::F32 => Value::F32(expect_f64(yaml)? as f32),
        FieldKind::F64 => Value::F64(expect_f64(yaml)?),
        FieldKind::Char => {
            let s = expect_str(yaml)?;
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
        FieldKind::String => Value::String(expect_str(yaml)?.to_string()),
        FieldKind::Bytes => {
            let items = yaml
                .as_sequence()
                .ok_or_else(|| type_error("sequence", yaml))?;
            let mut bytes = Vec::with_capacity(items.len());
            for item in items {
                bytes.push(narrow_u::<u8>(expect_u64(item)?, FieldKind::U8)?);
            }
            Value::Bytes(bytes)
        }
    };
    Ok(value)
}

fn expect_bool(yaml: &Yaml) -> Result<bool, CodecError> {
    yaml.as_bool().ok_or_else(|| type_error("boolean", yaml))
}

fn expect_i64(yaml: &Yaml) -> Result<i64, CodecError> {
    yaml.as_i64().ok_or_else(|| type_error("integer", yaml))
}

fn expect_u64(yaml: &Yaml) -> Result<u64, CodecError> {
    yaml.as_u64()
        .ok_or_else(|| type_error("unsigned integer", yaml))
}

fn expect_f64(yaml: &Yaml) -> Result<f64, CodecError> {
    yaml.as_f64().ok_or_else(|| type_error("number", yaml))
}

fn expect_str(yaml: &Yaml) -> Result<&str, CodecError> {
    yaml.as_str().ok_or_else(|| type_error("string", yaml))
}

fn type_error(expected: &str, got: &Yaml) -> CodecError {
    CodecError::new(NAME, format!("expected {}, got {:?}", expected, got))
}

fn narrow<T: TryFrom<i64>>(v: i64, kind: FieldKind) -> Result<T, CodecError> {
    T::try_from(v)
        .map_err(|_| CodecError::new(NAME, format!("{} out of range for {}", v, kind.name())))
}

fn narrow_u<T: TryFrom<u64>>(v: u64, kind: FieldKind) -> Result<T, CodecError> {
    T::try_from(v)
        .map_err(|_| CodecError::new(NAME, format!("{} out of range for {}", v, kind.name())))
}
