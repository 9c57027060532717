//! Dynamic field values.

use buffer::Handle;
use schema::FieldKind;

/// A single decoded value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(i32),
    Float(f32),
    Boolean(bool),
    Pointer(Handle),
}

impl FieldValue {
    /// Returns the wire kind of the value.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Integer(_) => FieldKind::Integer,
            Self::Float(_) => FieldKind::Float,
            Self::Boolean(_) => FieldKind::Boolean,
            Self::Pointer(_) => FieldKind::Pointer,
        }
    }

    /// Compares two values by their wire representation.
    ///
    /// Unlike `==`, NaN floats with the same bits compare equal and `0.0`
    /// differs from `-0.0`.
    #[must_use]
    pub fn bit_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            _ => self == other,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_pointer(&self) -> Option<Handle> {
        match self {
            Self::Pointer(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Handle> for FieldValue {
    fn from(value: Handle) -> Self {
        Self::Pointer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(FieldValue::from(1).kind(), FieldKind::Integer);
        assert_eq!(FieldValue::from(1.0).kind(), FieldKind::Float);
        assert_eq!(FieldValue::from(true).kind(), FieldKind::Boolean);
        assert_eq!(FieldValue::from(Handle::NULL).kind(), FieldKind::Pointer);
    }

    #[test]
    fn accessors_match_variant_only() {
        let value = FieldValue::Integer(7);
        assert_eq!(value.as_integer(), Some(7));
        assert_eq!(value.as_float(), None);
        assert_eq!(value.as_boolean(), None);
        assert_eq!(value.as_pointer(), None);
    }

    #[test]
    fn bit_eq_treats_nan_by_bits() {
        let nan = FieldValue::Float(f32::NAN);
        assert_ne!(nan, nan);
        assert!(nan.bit_eq(&nan));
        assert!(!FieldValue::Float(0.0).bit_eq(&FieldValue::Float(-0.0)));
        assert!(FieldValue::Integer(3).bit_eq(&FieldValue::Integer(3)));
        assert!(!FieldValue::Integer(3).bit_eq(&FieldValue::Boolean(true)));
    }
}
