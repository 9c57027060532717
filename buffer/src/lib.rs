//! Fixed-capacity cursor buffer for arena snapshots.
//!
//! This crate provides [`SnapshotBuffer`], a fixed-size byte store walked by a
//! single cursor, with typed sequential writes and reads of 32-bit integers,
//! 32-bit floats, booleans and opaque [`Handle`]s.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Values are copied through explicit byte encodings.
//! - **Always-on bounds checks** - An access succeeds iff `cursor + size <= capacity`.
//! - **Positional format** - No tags or lengths are stored; the caller owns the field order.
//! - **Fixed byte order** - Multi-byte values are little-endian regardless of host.
//!
//! # Example
//!
//! ```
//! use buffer::SnapshotBuffer;
//!
//! let mut snapshot = SnapshotBuffer::<16>::new();
//! snapshot.begin();
//! snapshot.write_integer(42).unwrap();
//! snapshot.write_boolean(true).unwrap();
//!
//! snapshot.begin();
//! assert_eq!(snapshot.read_integer().unwrap(), 42);
//! assert!(snapshot.read_boolean().unwrap());
//! ```

mod error;
mod snapshot;
mod value;

pub use error::{Access, BufferError, BufferResult};
pub use snapshot::{SnapshotBuffer, DEFAULT_CAPACITY};
pub use value::{Handle, WireValue};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pass() {
        let mut snapshot = SnapshotBuffer::<8>::new();
        snapshot.begin();
        assert!(snapshot.written().is_empty());
        assert_eq!(snapshot.remaining(), 8);
    }

    #[test]
    fn scenario_sixteen_bytes() {
        let mut snapshot = SnapshotBuffer::<16>::new();
        snapshot.begin();
        snapshot.write_integer(42).unwrap();
        snapshot.write_boolean(true).unwrap();
        snapshot.write_float(3.5).unwrap();
        assert_eq!(snapshot.cursor(), 9);
        assert_eq!(snapshot.remaining(), 7);

        snapshot.begin();
        assert_eq!(snapshot.read_integer().unwrap(), 42);
        assert!(snapshot.read_boolean().unwrap());
        assert_eq!(snapshot.read_float().unwrap(), 3.5);

        snapshot.write_float(1.25).unwrap();
        assert_eq!(snapshot.cursor(), 13);

        let err = snapshot.write_integer(7).unwrap_err();
        assert_eq!(
            err,
            BufferError::Overflow {
                access: Access::Write,
                cursor: 13,
                requested: 4,
                capacity: 16,
            }
        );
        assert_eq!(snapshot.cursor(), 13);
    }

    #[test]
    fn generic_and_typed_calls_agree() {
        let mut snapshot = SnapshotBuffer::<32>::new();
        snapshot.write(7i32).unwrap();
        snapshot.write_integer(7).unwrap();
        snapshot.write(Handle::new(3)).unwrap();
        snapshot.write_pointer(Handle::new(3)).unwrap();
        assert_eq!(&snapshot.written()[0..4], &snapshot.written()[4..8]);
        assert_eq!(&snapshot.written()[8..16], &snapshot.written()[16..24]);

        snapshot.begin();
        assert_eq!(snapshot.read::<i32>().unwrap(), 7);
        assert_eq!(snapshot.read_integer().unwrap(), 7);
        assert_eq!(snapshot.read::<Handle>().unwrap(), Handle::new(3));
    }

    #[test]
    fn doctest_example() {
        let mut snapshot = SnapshotBuffer::<16>::new();
        snapshot.begin();
        snapshot.write_integer(42).unwrap();
        snapshot.write_boolean(true).unwrap();

        snapshot.begin();
        assert_eq!(snapshot.read_integer().unwrap(), 42);
        assert!(snapshot.read_boolean().unwrap());
    }
}
