//! Schema validation errors.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building or validating a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A field has an empty name.
    EmptyFieldName { index: usize },

    /// Two fields share a name.
    DuplicateFieldName { name: String },

    /// An array field has zero length.
    EmptyArray { name: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFieldName { index } => write!(f, "field {index} has an empty name"),
            Self::DuplicateFieldName { name } => write!(f, "duplicate field name: {name}"),
            Self::EmptyArray { name } => write!(f, "array field {name} has zero length"),
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mentions_field() {
        let err = SchemaError::DuplicateFieldName {
            name: "tick".to_string(),
        };
        assert!(err.to_string().contains("tick"));

        let err = SchemaError::EmptyFieldName { index: 3 };
        assert!(err.to_string().contains('3'));
    }
}
