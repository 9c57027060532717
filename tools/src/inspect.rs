//! Blob size checks against a schema.

use schema::{schema_hash, Schema};

/// How a blob's length compares to the schema's encoded size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutStatus {
    Exact,
    /// The blob has this many bytes past the schema's layout.
    Trailing(usize),
    /// The blob is this many bytes short of the schema's layout.
    Short(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutReport {
    pub schema_hash: u64,
    pub fields: usize,
    pub values: usize,
    pub expected_bytes: usize,
    pub status: LayoutStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectReport {
    pub bytes: usize,
    /// Present when a schema was supplied.
    pub layout: Option<LayoutReport>,
}

impl InspectReport {
    /// A blob is decodable only when it matches the schema exactly.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.layout
            .as_ref()
            .is_some_and(|layout| layout.status == LayoutStatus::Exact)
    }
}

/// Compares a blob's length against an optional schema.
#[must_use]
pub fn inspect_snapshot(bytes: &[u8], schema: Option<&Schema>) -> InspectReport {
    let layout = schema.map(|schema| {
        let expected_bytes = schema.encoded_size();
        let status = match bytes.len().cmp(&expected_bytes) {
            std::cmp::Ordering::Equal => LayoutStatus::Exact,
            std::cmp::Ordering::Greater => LayoutStatus::Trailing(bytes.len() - expected_bytes),
            std::cmp::Ordering::Less => LayoutStatus::Short(expected_bytes - bytes.len()),
        };
        LayoutReport {
            schema_hash: schema_hash(schema),
            fields: schema.fields.len(),
            values: schema.value_count(),
            expected_bytes,
            status,
        }
    });
    InspectReport {
        bytes: bytes.len(),
        layout,
    }
}
