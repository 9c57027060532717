//! Limits for codec-level encoding and decoding.

use buffer::DEFAULT_CAPACITY;

/// Codec limits enforced before a schema drives a snapshot pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum number of fields in a schema.
    pub max_fields: usize,
    /// Maximum number of values, counting each array element.
    pub max_values: usize,
    /// Maximum encoded snapshot size in bytes.
    pub max_snapshot_bytes: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_fields: 1024,
            max_values: 16 * 1024,
            max_snapshot_bytes: DEFAULT_CAPACITY,
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_fields: 16,
            max_values: 64,
            max_snapshot_bytes: 256,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_fields: usize::MAX,
            max_values: usize::MAX,
            max_snapshot_bytes: usize::MAX,
        }
    }
}
