//! Deterministic schema hashing.

use blake3::Hasher;

use crate::{FieldDef, Schema};

/// Computes a deterministic hash of a schema's layout.
///
/// Peers compare hashes to confirm they walk the same field sequence. The
/// hash covers field names, kinds, lengths and order.
#[must_use]
pub fn schema_hash(schema: &Schema) -> u64 {
    let mut hasher = Hasher::new();
    write_u32(&mut hasher, schema.fields.len() as u32);

    for field in &schema.fields {
        write_field(&mut hasher, field);
    }

    let hash = hasher.finalize();
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(raw)
}

fn write_field(hasher: &mut Hasher, field: &FieldDef) {
    write_u32(hasher, field.name.len() as u32);
    hasher.update(field.name.as_bytes());
    write_u8(hasher, field.kind.tag());
    write_u32(hasher, field.len);
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}
