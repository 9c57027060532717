//! Fixed-capacity cursor buffer for encoding and decoding snapshots.

use std::fmt;
use std::ops::Range;

use crate::error::{Access, BufferError, BufferResult};
use crate::value::{Handle, WireValue};

/// Default snapshot capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 32 * 1024;

/// A fixed-capacity byte buffer walked by a single cursor.
///
/// A pass starts with [`begin`](Self::begin) and then either writes or reads
/// a fixed sequence of values. Every access is bounds-checked: it succeeds
/// only if `cursor + size <= CAPACITY`, and a failed access leaves both the
/// cursor and the storage untouched.
///
/// The byte stream carries no type information. Reader and writer must agree
/// on the sequence of value kinds out of band; reading a different sequence
/// than was written yields wrong values rather than an error.
#[derive(Clone)]
pub struct SnapshotBuffer<const CAPACITY: usize = DEFAULT_CAPACITY> {
    storage: Box<[u8]>,
    cursor: usize,
}

impl<const CAPACITY: usize> SnapshotBuffer<CAPACITY> {
    /// Creates a buffer with zeroed storage and the cursor at 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: vec![0u8; CAPACITY].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Starts a new pass by moving the cursor back to 0.
    ///
    /// Stored bytes are not cleared.
    pub fn begin(&mut self) {
        self.cursor = 0;
    }

    /// Returns the current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the capacity in bytes.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Returns the number of bytes between the cursor and the end of storage.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        CAPACITY - self.cursor
    }

    /// Writes a value at the cursor and advances past it.
    pub fn write<T: WireValue>(&mut self, value: T) -> BufferResult<()> {
        let range = self.advance(T::SIZE, Access::Write)?;
        value.write_le(&mut self.storage[range]);
        Ok(())
    }

    /// Reads a value at the cursor and advances past it.
    pub fn read<T: WireValue>(&mut self) -> BufferResult<T> {
        let range = self.advance(T::SIZE, Access::Read)?;
        Ok(T::read_le(&self.storage[range]))
    }

    /// Writes a 32-bit signed integer.
    pub fn write_integer(&mut self, value: i32) -> BufferResult<()> {
        self.write(value)
    }

    /// Writes a 32-bit float.
    pub fn write_float(&mut self, value: f32) -> BufferResult<()> {
        self.write(value)
    }

    /// Writes a boolean as a single byte.
    pub fn write_boolean(&mut self, value: bool) -> BufferResult<()> {
        self.write(value)
    }

    /// Writes an opaque handle.
    pub fn write_pointer(&mut self, value: Handle) -> BufferResult<()> {
        self.write(value)
    }

    /// Reads a 32-bit signed integer.
    pub fn read_integer(&mut self) -> BufferResult<i32> {
        self.read()
    }

    /// Reads a 32-bit float.
    pub fn read_float(&mut self) -> BufferResult<f32> {
        self.read()
    }

    /// Reads a boolean. Any non-zero byte reads as `true`.
    pub fn read_boolean(&mut self) -> BufferResult<bool> {
        self.read()
    }

    /// Reads an opaque handle.
    pub fn read_pointer(&mut self) -> BufferResult<Handle> {
        self.read()
    }

    /// Returns the whole storage, `CAPACITY` bytes long.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage
    }

    /// Returns the bytes between the start of storage and the cursor.
    ///
    /// After a write pass this is the encoded snapshot.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.storage[..self.cursor]
    }

    /// Copies a received blob into the start of storage and resets the cursor.
    ///
    /// Bytes past the end of the blob keep their previous contents.
    pub fn load(&mut self, blob: &[u8]) -> BufferResult<()> {
        if blob.len() > CAPACITY {
            tracing::debug!(len = blob.len(), capacity = CAPACITY, "rejected snapshot blob");
            return Err(BufferError::BlobTooLarge {
                len: blob.len(),
                capacity: CAPACITY,
            });
        }
        self.storage[..blob.len()].copy_from_slice(blob);
        self.cursor = 0;
        Ok(())
    }

    fn advance(&mut self, size: usize, access: Access) -> BufferResult<Range<usize>> {
        let start = self.cursor;
        let end = match start.checked_add(size) {
            Some(end) if end <= CAPACITY => end,
            _ => {
                tracing::debug!(
                    %access,
                    cursor = start,
                    requested = size,
                    capacity = CAPACITY,
                    "snapshot overflow"
                );
                return Err(BufferError::Overflow {
                    access,
                    cursor: start,
                    requested: size,
                    capacity: CAPACITY,
                });
            }
        };
        self.cursor = end;
        Ok(start..end)
    }
}

impl<const CAPACITY: usize> Default for SnapshotBuffer<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAPACITY: usize> fmt::Debug for SnapshotBuffer<CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotBuffer")
            .field("cursor", &self.cursor)
            .field("capacity", &CAPACITY)
            .finish_non_exhaustive()
    }
}
