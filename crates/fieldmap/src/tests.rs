// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Workflow tests for the transformer over private registries.
//!
//! The codec here is a deliberately plain one (native `Display`/`parse`
//! text) so these tests exercise the transformer loop, the catalog, and
//! the derive without depending on an adapter crate.

use crate::api::FieldMap as _;
use crate::registry::{CodecRegistry, TypeRegistry};
use crate::transform::FaultCause;
use crate::{Codec, CodecError, FieldKind, FieldMap, StringMap, Transformer, Value};
use std::sync::Arc;

/// Plain-text codec: `Display` out, `parse` back in, "null" for `Null`.
struct PlainCodec;

impl Codec for PlainCodec {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn encode(&self, value: &Value, _kind: FieldKind) -> Result<String, CodecError> {
        let text = match value {
            Value::Bool(v) => v.to_string(),
            Value::I8(v) => v.to_string(),
            Value::I16(v) => v.to_string(),
            Value::I32(v) => v.to_string(),
            Value::I64(v) => v.to_string(),
            Value::U8(v) => v.to_string(),
            Value::U16(v) => v.to_string(),
            Value::U32(v) => v.to_string(),
            Value::U64(v) => v.to_string(),
            Value::F32(v) => v.to_string(),
            Value::F64(v) => v.to_string(),
            Value::Char(v) => v.to_string(),
            Value::String(v) => v.clone(),
            Value::Bytes(v) => v
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(","),
            Value::Null => "null".to_string(),
        };
        Ok(text)
    }

    fn decode(&self, raw: &str, kind: FieldKind) -> Result<Value, CodecError> {
        if raw == "null" {
            return Ok(Value::Null);
        }
        let parse_err = |e: &dyn std::fmt::Display| CodecError::new("plain", e.to_string());
        let value = match kind {
            FieldKind::Bool => Value::Bool(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::I8 => Value::I8(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::I16 => Value::I16(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::I32 => Value::I32(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::I64 => Value::I64(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::U8 => Value::U8(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::U16 => Value::U16(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::U32 => Value::U32(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::U64 => Value::U64(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::F32 => Value::F32(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::F64 => Value::F64(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::Char => Value::Char(raw.parse().map_err(|e| parse_err(&e))?),
            FieldKind::String => Value::String(raw.to_string()),
            FieldKind::Bytes => {
                let mut bytes = Vec::new();
                for part in raw.split(',').filter(|p| !p.is_empty()) {
                    bytes.push(part.parse().map_err(|e| parse_err(&e))?);
                }
                Value::Bytes(bytes)
            }
        };
        Ok(value)
    }
}

/// Codec that refuses one named field, for fault-isolation tests.
struct GrudgeCodec {
    inner: PlainCodec,
    refuse_kind: FieldKind,
}

impl Codec for GrudgeCodec {
    fn name(&self) -> &'static str {
        "grudge"
    }

    fn encode(&self, value: &Value, kind: FieldKind) -> Result<String, CodecError> {
        if kind == self.refuse_kind {
            return Err(CodecError::new("grudge", "refused".to_string()));
        }
        self.inner.encode(value, kind)
    }

    fn decode(&self, raw: &str, kind: FieldKind) -> Result<Value, CodecError> {
        if kind == self.refuse_kind {
            return Err(CodecError::new("grudge", "refused".to_string()));
        }
        self.inner.decode(raw, kind)
    }
}

#[derive(FieldMap, Default, Debug, PartialEq)]
struct Account {
    id: u64,
    active: bool,
    label: String,
}

#[derive(FieldMap, Default, Debug, PartialEq)]
struct Profile {
    nickname: Option<String>,
    age: Option<u8>,
    score: i32,
}

#[derive(FieldMap, Default, Debug, PartialEq)]
struct Audited {
    name: String,
    #[fieldmap(skip)]
    dirty: bool,
}

#[derive(FieldMap, Default, Debug, PartialEq)]
struct Empty {}

fn plain_transformer(types: &TypeRegistry) -> (CodecRegistry, &TypeRegistry) {
    let codecs = CodecRegistry::new();
    codecs.register(Arc::new(PlainCodec));
    (codecs, types)
}

#[test]
fn to_map_emits_one_entry_per_field() {
    let types = TypeRegistry::new();
    let (codecs, types) = plain_transformer(&types);
    let t = Transformer::new(&codecs, types);

    let account = Account {
        id: 100,
        active: true,
        label: "x".to_string(),
    };
    let outcome = t.to_map(&account).unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.map.len(), 3);
    assert_eq!(outcome.map["id"], "100");
    assert_eq!(outcome.map["active"], "true");
    assert_eq!(outcome.map["label"], "x");
}

#[test]
fn round_trip_restores_the_value() {
    let types = TypeRegistry::new();
    let (codecs, types) = plain_transformer(&types);
    let t = Transformer::new(&codecs, types);

    let account = Account {
        id: 42,
        active: false,
        label: "hello world".to_string(),
    };
    let outcome = t.to_map(&account).unwrap();
    let back = t.from_map::<Account>(&outcome.map).unwrap();
    assert!(back.is_clean());
    assert_eq!(back.value, account);
}

#[test]
fn empty_struct_yields_empty_map() {
    let types = TypeRegistry::new();
    let (codecs, types) = plain_transformer(&types);
    let t = Transformer::new(&codecs, types);

    let outcome = t.to_map(&Empty {}).unwrap();
    assert!(outcome.is_clean());
    assert!(outcome.map.is_empty());
}

#[test]
fn missing_keys_keep_defaults() {
    let types = TypeRegistry::new();
    let (codecs, types) = plain_transformer(&types);
    let t = Transformer::new(&codecs, types);

    let mut map = StringMap::new();
    map.insert("id".to_string(), "7".to_string());
    let back = t.from_map::<Account>(&map).unwrap();
    assert!(back.is_clean());
    assert_eq!(back.value.id, 7);
    assert!(!back.value.active);
    assert_eq!(back.value.label, "");
}

#[test]
fn unknown_keys_are_tolerated_and_recorded() {
    let types = TypeRegistry::new();
    let (codecs, types) = plain_transformer(&types);
    let t = Transformer::new(&codecs, types);

    let mut map = StringMap::new();
    map.insert("id".to_string(), "7".to_string());
    map.insert("bogus".to_string(), "whatever".to_string());
    let back = t.from_map::<Account>(&map).unwrap();
    assert_eq!(back.value.id, 7);
    assert_eq!(back.faults.len(), 1);
    assert_eq!(back.faults[0].field, "bogus");
    assert_eq!(back.faults[0].cause, FaultCause::UnknownKey);
}

#[test]
fn optional_none_encodes_as_null_and_back() {
    let types = TypeRegistry::new();
    let (codecs, types) = plain_transformer(&types);
    let t = Transformer::new(&codecs, types);

    let profile = Profile {
        nickname: None,
        age: Some(30),
        score: -5,
    };
    let outcome = t.to_map(&profile).unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.map["nickname"], "null");
    assert_eq!(outcome.map["age"], "30");

    let back = t.from_map::<Profile>(&outcome.map).unwrap();
    assert!(back.is_clean());
    assert_eq!(back.value, profile);
}

#[test]
fn skipped_fields_never_reach_the_map() {
    let types = TypeRegistry::new();
    let (codecs, types) = plain_transformer(&types);
    let t = Transformer::new(&codecs, types);

    let audited = Audited {
        name: "a".to_string(),
        dirty: true,
    };
    let outcome = t.to_map(&audited).unwrap();
    assert!(outcome.is_clean());
    assert_eq!(outcome.map.len(), 1);
    assert!(outcome.map.contains_key("name"));

    // A map entry for the skipped field is just an unknown key.
    let mut map = outcome.map;
    map.insert("dirty".to_string(), "true".to_string());
    let back = t.from_map::<Audited>(&map).unwrap();
    assert!(!back.value.dirty);
    assert_eq!(back.faults.len(), 1);
    assert_eq!(back.faults[0].cause, FaultCause::UnknownKey);
}

#[test]
fn encode_failure_skips_one_field_not_the_call() {
    let types = TypeRegistry::new();
    let codecs = CodecRegistry::new();
    codecs.register(Arc::new(GrudgeCodec {
        inner: PlainCodec,
        refuse_kind: FieldKind::Bool,
    }));
    let t = Transformer::new(&codecs, &types);

    let account = Account {
        id: 1,
        active: true,
        label: "kept".to_string(),
    };
    let outcome = t.to_map(&account).unwrap();
    assert_eq!(outcome.map.len(), 2);
    assert!(!outcome.map.contains_key("active"));
    assert_eq!(outcome.faults.len(), 1);
    assert_eq!(outcome.faults[0].field, "active");
    assert!(matches!(outcome.faults[0].cause, FaultCause::Encode(_)));
}

#[test]
fn decode_failure_leaves_the_field_at_default() {
    let types = TypeRegistry::new();
    let (codecs, types) = plain_transformer(&types);
    let t = Transformer::new(&codecs, types);

    let mut map = StringMap::new();
    map.insert("id".to_string(), "not-a-number".to_string());
    map.insert("label".to_string(), "kept".to_string());
    let back = t.from_map::<Account>(&map).unwrap();
    assert_eq!(back.value.id, 0);
    assert_eq!(back.value.label, "kept");
    assert_eq!(back.faults.len(), 1);
    assert_eq!(back.faults[0].field, "id");
    assert!(matches!(back.faults[0].cause, FaultCause::Decode(_)));
}

#[test]
fn from_map_named_resolves_through_the_type_registry() {
    let types = TypeRegistry::new();
    types.register::<Account>();
    let (codecs, types) = plain_transformer(&types);
    let t = Transformer::new(&codecs, types);

    let type_name = Account::default().type_descriptor().type_name;
    let mut map = StringMap::new();
    map.insert("id".to_string(), "9".to_string());
    let back = t.from_map_named(&map, type_name).unwrap();
    assert!(back.is_clean());
    assert_eq!(back.value.get_field("id").unwrap(), Value::U64(9));
}

#[test]
fn field_names_is_idempotent() {
    let first = crate::field_names::<Account>();
    let second = crate::field_names::<Account>();
    assert_eq!(first, second);
    assert_eq!(
        first.into_iter().collect::<Vec<_>>(),
        vec!["active", "id", "label"]
    );
}

#[test]
fn descriptor_records_optionality() {
    let descriptor = Profile::default().type_descriptor();
    assert!(descriptor.field("nickname").unwrap().optional);
    assert!(!descriptor.field("score").unwrap().optional);
    assert_eq!(descriptor.field("age").unwrap().kind, FieldKind::U8);
}
