//! JSON field values to blob.

use anyhow::{anyhow, bail, Context, Result};
use codec::{encode_values, CodecLimits, FieldValue, Handle, SnapshotBuffer, DEFAULT_CAPACITY};
use schema::{FieldDef, FieldKind, Schema};
use serde_json::Value;

/// Converts a JSON object of `name -> value | [values]` into schema-ordered
/// values.
///
/// Every schema field must be present and no other key is accepted. Array
/// fields take a JSON array of exactly `len` elements. Floats also accept
/// `"NaN"`, `"inf"` and `"-inf"`; pointers accept a number or a `0x` hex
/// string.
pub fn values_from_json(json: &Value, schema: &Schema) -> Result<Vec<FieldValue>> {
    let object = json
        .as_object()
        .ok_or_else(|| anyhow!("values must be a JSON object"))?;

    if let Some(unknown) = object.keys().find(|key| schema.field(key).is_none()) {
        bail!("unknown field {unknown:?}");
    }

    let mut values = Vec::with_capacity(schema.value_count());
    for def in &schema.fields {
        let raw = object
            .get(&def.name)
            .ok_or_else(|| anyhow!("missing field {:?}", def.name))?;
        if def.is_array() {
            let items = raw
                .as_array()
                .ok_or_else(|| anyhow!("field {:?} expects an array of {}", def.name, def.len))?;
            if items.len() != def.len as usize {
                bail!(
                    "field {:?} expects {} values, got {}",
                    def.name,
                    def.len,
                    items.len()
                );
            }
            for (index, item) in items.iter().enumerate() {
                values.push(
                    parse_value(item, def.kind)
                        .with_context(|| format!("field {:?}[{index}]", def.name))?,
                );
            }
        } else {
            values.push(parse_value(raw, def.kind).with_context(|| field_label(def))?);
        }
    }
    Ok(values)
}

/// Builds a blob from a JSON object of field values.
pub fn encode_snapshot_json(json: &Value, schema: &Schema, limits: &CodecLimits) -> Result<Vec<u8>> {
    let values = values_from_json(json, schema)?;
    let mut buf = SnapshotBuffer::<DEFAULT_CAPACITY>::new();
    let written = encode_values(schema, &values, limits, &mut buf).context("encode snapshot")?;
    tracing::debug!(bytes = written, fields = schema.fields.len(), "encoded snapshot from json");
    Ok(buf.written().to_vec())
}

fn field_label(def: &FieldDef) -> String {
    format!("field {:?}", def.name)
}

fn parse_value(raw: &Value, kind: FieldKind) -> Result<FieldValue> {
    let value = match kind {
        FieldKind::Integer => {
            let v = raw
                .as_i64()
                .ok_or_else(|| anyhow!("expected integer, got {raw}"))?;
            FieldValue::Integer(i32::try_from(v).with_context(|| format!("{v} out of i32 range"))?)
        }
        FieldKind::Float => FieldValue::Float(parse_float(raw)?),
        FieldKind::Boolean => FieldValue::Boolean(
            raw.as_bool()
                .ok_or_else(|| anyhow!("expected boolean, got {raw}"))?,
        ),
        FieldKind::Pointer => FieldValue::Pointer(Handle::new(parse_pointer(raw)?)),
    };
    Ok(value)
}

#[allow(clippy::cast_possible_truncation)]
fn parse_float(raw: &Value) -> Result<f32> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| anyhow!("expected float, got {raw}")),
        Value::String(s) => match s.as_str() {
            "NaN" => Ok(f32::NAN),
            "inf" => Ok(f32::INFINITY),
            "-inf" => Ok(f32::NEG_INFINITY),
            _ => bail!("expected float, got {raw}"),
        },
        _ => bail!("expected float, got {raw}"),
    }
}

fn parse_pointer(raw: &Value) -> Result<u64> {
    match raw {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| anyhow!("expected non-negative pointer, got {raw}")),
        Value::String(s) => {
            let hex = s
                .strip_prefix("0x")
                .ok_or_else(|| anyhow!("pointer strings must start with 0x, got {raw}"))?;
            u64::from_str_radix(hex, 16).with_context(|| format!("invalid hex pointer {raw}"))
        }
        _ => bail!("expected pointer, got {raw}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_snapshot_json, JsonValue};
    use crate::fixtures::bomber_schema;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "tick": 12,
            "cells": [0, 2, 1],
            "alive": true,
            "x": 3.25,
            "controller": "0xff",
        })
    }

    #[test]
    fn encode_then_decode_matches_input() {
        let schema = bomber_schema();
        let bytes = encode_snapshot_json(&sample(), &schema, &CodecLimits::default()).unwrap();
        assert_eq!(bytes.len(), schema.encoded_size());
        assert_eq!(&bytes[..4], &12i32.to_le_bytes());

        let decoded = decode_snapshot_json(&bytes, &schema, &CodecLimits::default()).unwrap();
        assert_eq!(decoded.fields[3].values, vec![JsonValue::Float(3.25)]);
        assert_eq!(decoded.fields[4].values, vec![JsonValue::Pointer(0xff)]);
    }

    #[test]
    fn values_follow_schema_order() {
        let mut input = sample();
        input["controller"] = json!(7);
        let values = values_from_json(&input, &bomber_schema()).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Integer(12),
                FieldValue::Integer(0),
                FieldValue::Integer(2),
                FieldValue::Integer(1),
                FieldValue::Boolean(true),
                FieldValue::Float(3.25),
                FieldValue::Pointer(Handle::new(7)),
            ]
        );
    }

    #[test]
    fn non_finite_strings_accepted() {
        let mut input = sample();
        input["x"] = json!("NaN");
        let values = values_from_json(&input, &bomber_schema()).unwrap();
        assert!(values[5].as_float().unwrap().is_nan());
    }

    #[test]
    fn rejects_missing_and_unknown_fields() {
        let schema = bomber_schema();
        let mut input = sample();
        input.as_object_mut().unwrap().remove("alive");
        let err = values_from_json(&input, &schema).unwrap_err();
        assert!(err.to_string().contains("missing field \"alive\""));

        let mut input = sample();
        input["speed"] = json!(1);
        let err = values_from_json(&input, &schema).unwrap_err();
        assert!(err.to_string().contains("unknown field \"speed\""));
    }

    #[test]
    fn rejects_bad_shapes() {
        let schema = bomber_schema();

        let mut input = sample();
        input["cells"] = json!([0, 1]);
        assert!(values_from_json(&input, &schema).is_err());

        let mut input = sample();
        input["tick"] = json!(1u64 << 40);
        let err = values_from_json(&input, &schema).unwrap_err();
        assert!(format!("{err:#}").contains("out of i32 range"));

        let mut input = sample();
        input["cells"] = json!([0, "wall", 1]);
        let err = values_from_json(&input, &schema).unwrap_err();
        assert!(format!("{err:#}").contains("field \"cells\"[1]"));

        assert!(values_from_json(&json!([1, 2]), &schema).is_err());
    }
}
