//! Field kinds and definitions.

use std::fmt;

/// The wire kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldKind {
    /// 32-bit signed integer (4 bytes).
    Integer,
    /// 32-bit IEEE-754 float (4 bytes).
    Float,
    /// Boolean (1 byte).
    Boolean,
    /// Opaque handle (8 bytes).
    Pointer,
}

impl FieldKind {
    /// All kinds, in tag order.
    pub const ALL: [Self; 4] = [Self::Integer, Self::Float, Self::Boolean, Self::Pointer];

    /// Number of bytes one value of this kind occupies on the wire.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::Integer | Self::Float => 4,
            Self::Boolean => 1,
            Self::Pointer => 8,
        }
    }

    /// Stable numeric tag used for hashing.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Integer => 0,
            Self::Float => 1,
            Self::Boolean => 2,
            Self::Pointer => 3,
        }
    }

    /// Lower-case name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Pointer => "pointer",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named field in a schema.
///
/// `len` is the number of consecutive values of `kind` the field covers;
/// scalar fields have `len == 1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    #[cfg_attr(feature = "serde", serde(default = "scalar_len"))]
    pub len: u32,
}

#[cfg(feature = "serde")]
const fn scalar_len() -> u32 {
    1
}

impl FieldDef {
    /// Creates a scalar field.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            len: 1,
        }
    }

    /// Creates an array field of `len` consecutive values.
    #[must_use]
    pub fn array(name: impl Into<String>, kind: FieldKind, len: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            len,
        }
    }

    /// Shorthand for a scalar integer field.
    #[must_use]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    /// Shorthand for a scalar float field.
    #[must_use]
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    /// Shorthand for a scalar boolean field.
    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Shorthand for a scalar pointer field.
    #[must_use]
    pub fn pointer(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Pointer)
    }

    /// Returns `true` if the field covers more than one value.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.len > 1
    }

    /// Number of bytes the field occupies on the wire.
    #[must_use]
    pub const fn encoded_size(&self) -> usize {
        self.kind.size() * self.len as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_sizes() {
        assert_eq!(FieldKind::Integer.size(), 4);
        assert_eq!(FieldKind::Float.size(), 4);
        assert_eq!(FieldKind::Boolean.size(), 1);
        assert_eq!(FieldKind::Pointer.size(), 8);
    }

    #[test]
    fn kind_tags_are_distinct() {
        let mut tags: Vec<u8> = FieldKind::ALL.iter().map(|kind| kind.tag()).collect();
        tags.dedup();
        assert_eq!(tags, vec![0, 1, 2, 3]);
    }

    #[test]
    fn kind_display() {
        assert_eq!(FieldKind::Pointer.to_string(), "pointer");
    }

    #[test]
    fn scalar_constructors() {
        let field = FieldDef::integer("tick");
        assert_eq!(field.name, "tick");
        assert_eq!(field.kind, FieldKind::Integer);
        assert_eq!(field.len, 1);
        assert!(!field.is_array());
        assert_eq!(field.encoded_size(), 4);

        assert_eq!(FieldDef::float("x").kind, FieldKind::Float);
        assert_eq!(FieldDef::boolean("alive").kind, FieldKind::Boolean);
        assert_eq!(FieldDef::pointer("owner").kind, FieldKind::Pointer);
    }

    #[test]
    fn array_field_size() {
        let field = FieldDef::array("cells", FieldKind::Integer, 195);
        assert!(field.is_array());
        assert_eq!(field.encoded_size(), 780);
    }
}
