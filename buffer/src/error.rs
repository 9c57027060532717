//! Error types for snapshot buffer operations.

use std::fmt;

/// Result type for snapshot buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Direction of the access that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

/// Errors that can occur while reading or writing a snapshot buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// The access would move the cursor past the end of the storage.
    ///
    /// The cursor and storage are left untouched.
    Overflow {
        /// Whether the failed access was a read or a write.
        access: Access,
        /// Cursor position at the time of the access.
        cursor: usize,
        /// Number of bytes the access needed.
        requested: usize,
        /// Total capacity of the buffer in bytes.
        capacity: usize,
    },

    /// A received blob does not fit into the buffer storage.
    BlobTooLarge {
        /// Length of the blob in bytes.
        len: usize,
        /// Total capacity of the buffer in bytes.
        capacity: usize,
    },
}

impl BufferError {
    /// Returns the number of bytes that were still available when the error occurred.
    #[must_use]
    pub const fn available(&self) -> usize {
        match self {
            Self::Overflow {
                cursor, capacity, ..
            } => capacity.saturating_sub(*cursor),
            Self::BlobTooLarge { capacity, .. } => *capacity,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "read",
            Self::Write => "write",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow {
                access,
                cursor,
                requested,
                capacity,
            } => {
                write!(
                    f,
                    "snapshot overflow: {access} of {requested} bytes at offset {cursor} exceeds capacity of {capacity} bytes"
                )
            }
            Self::BlobTooLarge { len, capacity } => {
                write!(
                    f,
                    "snapshot blob of {len} bytes exceeds capacity of {capacity} bytes"
                )
            }
        }
    }
}

impl std::error::Error for BufferError {}
