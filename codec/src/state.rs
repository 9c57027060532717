//! Typed state capture and restore.

use buffer::{SnapshotBuffer, DEFAULT_CAPACITY};
use schema::Schema;

use crate::error::{CodecError, CodecResult};
use crate::limits::CodecLimits;
use crate::snapshot::decode_values;
use crate::value::FieldValue;

/// State that can be written to and read from a snapshot buffer.
///
/// `write_fields` and `read_fields` must walk exactly the fields listed by
/// [`schema`](Self::schema), in the same order. [`capture`] and [`restore`]
/// check that the cursor moved by the schema's encoded size, which catches a
/// field added to one side but not the other.
pub trait SnapshotState: Sized {
    /// The field layout this state writes.
    fn schema() -> Schema;

    /// Encoded size in bytes. Override with a constant when the schema is
    /// expensive to build.
    fn encoded_size() -> usize {
        Self::schema().encoded_size()
    }

    /// Writes every field at the cursor, in schema order.
    fn write_fields<const N: usize>(&self, buf: &mut SnapshotBuffer<N>) -> CodecResult<()>;

    /// Reads every field at the cursor, in schema order.
    fn read_fields<const N: usize>(buf: &mut SnapshotBuffer<N>) -> CodecResult<Self>;
}

/// Starts a write pass and writes `state` into `buf`.
///
/// Returns the number of bytes written.
pub fn capture<S: SnapshotState, const N: usize>(
    state: &S,
    buf: &mut SnapshotBuffer<N>,
) -> CodecResult<usize> {
    buf.begin();
    state.write_fields(buf)?;
    check_size::<S>(buf.cursor())?;
    tracing::trace!(bytes = buf.cursor(), "captured snapshot");
    Ok(buf.cursor())
}

/// Starts a read pass and rebuilds a state from `buf`.
pub fn restore<S: SnapshotState, const N: usize>(buf: &mut SnapshotBuffer<N>) -> CodecResult<S> {
    buf.begin();
    let state = S::read_fields(buf)?;
    check_size::<S>(buf.cursor())?;
    Ok(state)
}

/// Rebuilds a state from a received blob of exactly `S::encoded_size()` bytes.
pub fn restore_from_bytes<S: SnapshotState>(bytes: &[u8]) -> CodecResult<S> {
    check_size::<S>(bytes.len())?;
    let mut buf = SnapshotBuffer::<DEFAULT_CAPACITY>::new();
    buf.load(bytes)?;
    restore(&mut buf)
}

/// Captures `state` and decodes it back into dynamic values.
pub fn capture_values<S: SnapshotState>(
    state: &S,
    limits: &CodecLimits,
) -> CodecResult<Vec<FieldValue>> {
    let mut buf = SnapshotBuffer::<DEFAULT_CAPACITY>::new();
    capture(state, &mut buf)?;
    decode_values(&S::schema(), limits, &mut buf)
}

fn check_size<S: SnapshotState>(actual: usize) -> CodecResult<()> {
    let expected = S::encoded_size();
    if actual != expected {
        tracing::warn!(expected, actual, "snapshot size does not match schema");
        return Err(CodecError::SizeMismatch { expected, actual });
    }
    Ok(())
}
