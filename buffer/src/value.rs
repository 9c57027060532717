//! Fixed-width values that can be stored in a snapshot buffer.

/// Opaque machine handle carried through a snapshot.
///
/// The buffer never dereferences or interprets a handle. It is stored as a
/// 64-bit little-endian value so peers with different pointer widths agree
/// on the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Handle(u64);

impl Handle {
    /// The null handle.
    pub const NULL: Self = Self(0);

    /// Creates a handle from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` for the null handle.
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Handle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for f32 {}
    impl Sealed for bool {}
    impl Sealed for super::Handle {}
}

/// A value with a fixed wire size.
///
/// Implemented for the four kinds a snapshot carries: `i32`, `f32`, `bool`
/// and [`Handle`]. All multi-byte values are little-endian on the wire.
pub trait WireValue: Copy + sealed::Sealed {
    /// Number of bytes the value occupies in the buffer.
    const SIZE: usize;

    /// Writes the wire representation into `out`, which is exactly `SIZE` bytes long.
    fn write_le(self, out: &mut [u8]);

    /// Reads a value from `bytes`, which is exactly `SIZE` bytes long.
    fn read_le(bytes: &[u8]) -> Self;
}

impl WireValue for i32 {
    const SIZE: usize = 4;

    fn write_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Self::from_le_bytes(raw)
    }
}

impl WireValue for f32 {
    const SIZE: usize = 4;

    // Bit pattern, so NaN payloads and signed zero survive.
    fn write_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_bits().to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Self::from_bits(u32::from_le_bytes(raw))
    }
}

impl WireValue for bool {
    const SIZE: usize = 1;

    fn write_le(self, out: &mut [u8]) {
        out[0] = u8::from(self);
    }

    fn read_le(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }
}

impl WireValue for Handle {
    const SIZE: usize = 8;

    fn write_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.0.to_le_bytes());
    }

    fn read_le(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Self(u64::from_le_bytes(raw))
    }
}
