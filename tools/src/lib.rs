//! Introspection and debugging tools for arena snapshot blobs.
//!
//! A snapshot blob carries no framing, so every tool here needs the schema
//! JSON that produced it:
//!
//! - Inspect blob size against a schema and print its hash
//! - Decode a blob into per-field JSON or a human-readable listing
//! - Encode a blob from a JSON object of field values
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see which byte belongs to which field.

mod decode;
mod encode;
mod inspect;

pub use decode::{decode_snapshot_json, format_decode_pretty, DecodedField, DecodedSnapshot, JsonValue};
pub use encode::{encode_snapshot_json, values_from_json};
pub use inspect::{inspect_snapshot, InspectReport, LayoutReport, LayoutStatus};

/// Formats a schema hash the way every tool prints it.
#[must_use]
pub fn format_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

#[cfg(test)]
pub(crate) mod fixtures {
    use schema::{FieldDef, FieldKind, Schema};

    pub fn bomber_schema() -> Schema {
        Schema::builder()
            .field(FieldDef::integer("tick"))
            .field(FieldDef::array("cells", FieldKind::Integer, 3))
            .field(FieldDef::boolean("alive"))
            .field(FieldDef::float("x"))
            .field(FieldDef::pointer("controller"))
            .build()
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_zero_padded() {
        assert_eq!(format_hash(0xabc), "0x0000000000000abc");
    }
}
