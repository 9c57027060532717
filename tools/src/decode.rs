//! Blob to per-field JSON.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use codec::{decode_values_from_bytes, CodecLimits, FieldValue};
use schema::{schema_hash, FieldKind, Schema};
use serde::Serialize;

use crate::format_hash;

/// One decoded value in JSON form.
///
/// Non-finite floats become the strings `"NaN"`, `"inf"` and `"-inf"`, since
/// JSON has no literal for them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonValue {
    Integer(i32),
    Float(f32),
    Boolean(bool),
    Pointer(u64),
    NonFinite(&'static str),
}

impl From<FieldValue> for JsonValue {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Integer(v) => Self::Integer(v),
            FieldValue::Float(v) if v.is_nan() => Self::NonFinite("NaN"),
            FieldValue::Float(v) if v == f32::INFINITY => Self::NonFinite("inf"),
            FieldValue::Float(v) if v == f32::NEG_INFINITY => Self::NonFinite("-inf"),
            FieldValue::Float(v) => Self::Float(v),
            FieldValue::Boolean(v) => Self::Boolean(v),
            FieldValue::Pointer(v) => Self::Pointer(v.raw()),
        }
    }
}

impl std::fmt::Display for JsonValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:?}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Pointer(v) => write!(f, "0x{v:x}"),
            Self::NonFinite(v) => f.write_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedField {
    pub name: String,
    pub kind: FieldKind,
    /// Byte offset of the field's first value.
    pub offset: usize,
    /// Scalars decode to one value, arrays to one per element.
    pub values: Vec<JsonValue>,
    #[serde(skip)]
    pub is_array: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedSnapshot {
    pub schema_hash: String,
    pub bytes: usize,
    pub fields: Vec<DecodedField>,
}

/// Decodes `bytes` against `schema`, grouping values by field.
pub fn decode_snapshot_json(
    bytes: &[u8],
    schema: &Schema,
    limits: &CodecLimits,
) -> Result<DecodedSnapshot> {
    let values = decode_values_from_bytes(schema, limits, bytes).context("decode snapshot")?;
    let mut values = values.into_iter();

    let mut fields = Vec::with_capacity(schema.fields.len());
    let mut offset = 0;
    for def in &schema.fields {
        let decoded = values
            .by_ref()
            .take(def.len as usize)
            .map(JsonValue::from)
            .collect();
        fields.push(DecodedField {
            name: def.name.clone(),
            kind: def.kind,
            offset,
            values: decoded,
            is_array: def.is_array(),
        });
        offset += def.encoded_size();
    }

    Ok(DecodedSnapshot {
        schema_hash: format_hash(schema_hash(schema)),
        bytes: bytes.len(),
        fields,
    })
}

/// Renders a decoded snapshot as one line per field.
#[must_use]
pub fn format_decode_pretty(decoded: &DecodedSnapshot) -> String {
    const MAX_SHOWN: usize = 16;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "snapshot: {} bytes, schema_hash: {}",
        decoded.bytes, decoded.schema_hash
    );
    for field in &decoded.fields {
        let _ = write!(out, "  @{:<6} {} ({}", field.offset, field.name, field.kind);
        if field.is_array {
            let _ = write!(out, "[{}]", field.values.len());
        }
        out.push_str("): ");
        if field.is_array {
            let shown: Vec<String> = field
                .values
                .iter()
                .take(MAX_SHOWN)
                .map(ToString::to_string)
                .collect();
            let _ = write!(out, "[{}", shown.join(", "));
            if field.values.len() > MAX_SHOWN {
                let _ = write!(out, ", ... {} more", field.values.len() - MAX_SHOWN);
            }
            out.push(']');
        } else if let Some(value) = field.values.first() {
            let _ = write!(out, "{value}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::bomber_schema;
    use codec::{encode_values, Handle, SnapshotBuffer};

    fn blob(x: f32) -> Vec<u8> {
        let schema = bomber_schema();
        let values = vec![
            FieldValue::Integer(9),
            FieldValue::Integer(0),
            FieldValue::Integer(1),
            FieldValue::Integer(2),
            FieldValue::Boolean(true),
            FieldValue::Float(x),
            FieldValue::Pointer(Handle::new(255)),
        ];
        let mut buf = SnapshotBuffer::<64>::new();
        encode_values(&schema, &values, &CodecLimits::default(), &mut buf).unwrap();
        buf.written().to_vec()
    }

    #[test]
    fn decode_groups_by_field() {
        let decoded =
            decode_snapshot_json(&blob(1.5), &bomber_schema(), &CodecLimits::default()).unwrap();
        assert_eq!(decoded.bytes, 29);
        assert_eq!(decoded.fields.len(), 5);
        assert_eq!(decoded.fields[1].name, "cells");
        assert_eq!(decoded.fields[1].offset, 4);
        assert_eq!(
            decoded.fields[1].values,
            vec![JsonValue::Integer(0), JsonValue::Integer(1), JsonValue::Integer(2)]
        );
        assert_eq!(decoded.fields[4].offset, 21);
        assert_eq!(decoded.fields[4].values, vec![JsonValue::Pointer(255)]);
    }

    #[test]
    fn decode_serializes_to_json() {
        let decoded =
            decode_snapshot_json(&blob(1.5), &bomber_schema(), &CodecLimits::default()).unwrap();
        let json = serde_json::to_value(&decoded).unwrap();
        assert_eq!(json["fields"][0]["name"], "tick");
        assert_eq!(json["fields"][0]["kind"], "integer");
        assert_eq!(json["fields"][0]["values"][0], 9);
        assert_eq!(json["fields"][2]["values"][0], true);
        assert_eq!(json["fields"][3]["values"][0], 1.5);
    }

    #[test]
    fn non_finite_floats_become_strings() {
        let decoded = decode_snapshot_json(
            &blob(f32::NEG_INFINITY),
            &bomber_schema(),
            &CodecLimits::default(),
        )
        .unwrap();
        assert_eq!(decoded.fields[3].values, vec![JsonValue::NonFinite("-inf")]);
        assert_eq!(
            JsonValue::from(FieldValue::Float(f32::NAN)),
            JsonValue::NonFinite("NaN")
        );
    }

    #[test]
    fn decode_rejects_wrong_length() {
        let mut bytes = blob(0.0);
        bytes.push(0);
        let err = decode_snapshot_json(&bytes, &bomber_schema(), &CodecLimits::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("size mismatch"));
    }

    #[test]
    fn pretty_lists_every_field() {
        let decoded =
            decode_snapshot_json(&blob(1.5), &bomber_schema(), &CodecLimits::default()).unwrap();
        let pretty = format_decode_pretty(&decoded);
        assert!(pretty.starts_with("snapshot: 29 bytes"));
        assert!(pretty.contains("cells (integer[3]): [0, 1, 2]"));
        assert!(pretty.contains("x (float): 1.5"));
        assert!(pretty.contains("controller (pointer): 0xff"));
    }
}
