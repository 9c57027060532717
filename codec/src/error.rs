//! Error types for codec operations.

use std::fmt;

use buffer::BufferError;
use schema::{FieldKind, SchemaError};

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur during snapshot encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Snapshot buffer error.
    Buffer(BufferError),

    /// Schema validation error.
    Schema(SchemaError),

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// The schema's encoded size does not fit the buffer.
    CapacityExceeded { needed: usize, capacity: usize },

    /// Number of values does not match the schema.
    ValueCountMismatch { expected: usize, actual: usize },

    /// A value's kind does not match the schema at its position.
    KindMismatch {
        index: usize,
        expected: FieldKind,
        found: FieldKind,
    },

    /// A pass moved the cursor by a different amount than the schema describes.
    SizeMismatch { expected: usize, actual: usize },

    /// A decoded value is not valid for its field.
    InvalidValue {
        field: &'static str,
        index: usize,
        reason: ValueReason,
    },
}

/// Specific limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Fields,
    Values,
    SnapshotBytes,
}

/// Details for invalid value errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueReason {
    /// An integer code with no matching variant.
    UnknownCode { code: i32 },
    /// An integer outside the range the field accepts.
    OutOfRange { value: i64, min: i64, max: i64 },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buffer(e) => write!(f, "buffer error: {e}"),
            Self::Schema(e) => write!(f, "schema error: {e}"),
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::CapacityExceeded { needed, capacity } => {
                write!(
                    f,
                    "schema needs {needed} bytes but buffer capacity is {capacity}"
                )
            }
            Self::ValueCountMismatch { expected, actual } => {
                write!(f, "expected {expected} values, got {actual}")
            }
            Self::KindMismatch {
                index,
                expected,
                found,
            } => {
                write!(f, "value {index}: expected {expected} but got {found}")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "snapshot size mismatch: schema describes {expected} bytes, pass covered {actual}"
                )
            }
            Self::InvalidValue {
                field,
                index,
                reason,
            } => {
                write!(f, "invalid value for {field}[{index}]: {reason}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fields => "fields",
            Self::Values => "values",
            Self::SnapshotBytes => "snapshot bytes",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for ValueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCode { code } => write!(f, "unknown code {code}"),
            Self::OutOfRange { value, min, max } => {
                write!(f, "value {value} outside [{min}, {max}]")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Buffer(e) => Some(e),
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BufferError> for CodecError {
    fn from(err: BufferError) -> Self {
        Self::Buffer(err)
    }
}

impl From<SchemaError> for CodecError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}
