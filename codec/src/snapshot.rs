//! Schema-driven snapshot encoding/decoding of dynamic values.

use buffer::{SnapshotBuffer, DEFAULT_CAPACITY};
use schema::{FieldKind, Schema};

use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::value::FieldValue;

/// Encodes `values` into `buf` following the schema's field order.
///
/// Values are checked against the schema before the pass starts, so a
/// rejected call leaves the buffer untouched. Returns the number of bytes
/// written, which equals `schema.encoded_size()`.
pub fn encode_values<const N: usize>(
    schema: &Schema,
    values: &[FieldValue],
    limits: &CodecLimits,
    buf: &mut SnapshotBuffer<N>,
) -> CodecResult<usize> {
    check_schema(schema, limits, N)?;

    let expected = schema.value_count();
    if values.len() != expected {
        return Err(CodecError::ValueCountMismatch {
            expected,
            actual: values.len(),
        });
    }
    for (index, (value, kind)) in values.iter().zip(schema.kinds()).enumerate() {
        if value.kind() != kind {
            return Err(CodecError::KindMismatch {
                index,
                expected: kind,
                found: value.kind(),
            });
        }
    }

    buf.begin();
    for value in values {
        write_value(buf, *value)?;
    }
    tracing::trace!(bytes = buf.cursor(), "encoded snapshot values");
    Ok(buf.cursor())
}

/// Decodes one value per schema position from the start of `buf`.
pub fn decode_values<const N: usize>(
    schema: &Schema,
    limits: &CodecLimits,
    buf: &mut SnapshotBuffer<N>,
) -> CodecResult<Vec<FieldValue>> {
    check_schema(schema, limits, N)?;

    buf.begin();
    let mut values = Vec::with_capacity(schema.value_count());
    for kind in schema.kinds() {
        values.push(read_value(buf, kind)?);
    }
    Ok(values)
}

/// Decodes a received blob.
///
/// The blob must be exactly `schema.encoded_size()` bytes long.
pub fn decode_values_from_bytes(
    schema: &Schema,
    limits: &CodecLimits,
    bytes: &[u8],
) -> CodecResult<Vec<FieldValue>> {
    let expected = schema.encoded_size();
    if bytes.len() != expected {
        return Err(CodecError::SizeMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    let mut buf = SnapshotBuffer::<DEFAULT_CAPACITY>::new();
    buf.load(bytes)?;
    decode_values(schema, limits, &mut buf)
}

/// Writes a single value at the cursor.
pub fn write_value<const N: usize>(
    buf: &mut SnapshotBuffer<N>,
    value: FieldValue,
) -> CodecResult<()> {
    match value {
        FieldValue::Integer(v) => buf.write_integer(v)?,
        FieldValue::Float(v) => buf.write_float(v)?,
        FieldValue::Boolean(v) => buf.write_boolean(v)?,
        FieldValue::Pointer(v) => buf.write_pointer(v)?,
    }
    Ok(())
}

/// Reads a single value of `kind` at the cursor.
pub fn read_value<const N: usize>(
    buf: &mut SnapshotBuffer<N>,
    kind: FieldKind,
) -> CodecResult<FieldValue> {
    let value = match kind {
        FieldKind::Integer => FieldValue::Integer(buf.read_integer()?),
        FieldKind::Float => FieldValue::Float(buf.read_float()?),
        FieldKind::Boolean => FieldValue::Boolean(buf.read_boolean()?),
        FieldKind::Pointer => FieldValue::Pointer(buf.read_pointer()?),
    };
    Ok(value)
}

pub(crate) fn check_schema(
    schema: &Schema,
    limits: &CodecLimits,
    capacity: usize,
) -> CodecResult<()> {
    schema.validate()?;

    if schema.fields.len() > limits.max_fields {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::Fields,
            limit: limits.max_fields,
            actual: schema.fields.len(),
        });
    }
    let values = schema.value_count();
    if values > limits.max_values {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::Values,
            limit: limits.max_values,
            actual: values,
        });
    }
    let bytes = schema.encoded_size();
    if bytes > limits.max_snapshot_bytes {
        return Err(CodecError::LimitsExceeded {
            kind: LimitKind::SnapshotBytes,
            limit: limits.max_snapshot_bytes,
            actual: bytes,
        });
    }
    if bytes > capacity {
        return Err(CodecError::CapacityExceeded {
            needed: bytes,
            capacity,
        });
    }
    Ok(())
}
