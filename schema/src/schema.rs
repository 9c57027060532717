//! Schema definitions and validation.

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};
use crate::{FieldDef, FieldKind};

/// An ordered list of fields describing one snapshot layout.
///
/// Writers and readers walk the fields in order; the schema is the single
/// place where that order is written down.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schema {
    pub fields: Vec<FieldDef>,
}

impl Schema {
    /// Creates a schema from fields after validation.
    pub fn new(fields: Vec<FieldDef>) -> SchemaResult<Self> {
        let schema = Self { fields };
        schema.validate()?;
        Ok(schema)
    }

    /// Creates a schema builder.
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder { fields: Vec::new() }
    }

    /// Validates schema invariants.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut names = HashSet::new();
        for (index, field) in self.fields.iter().enumerate() {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName { index });
            }
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateFieldName {
                    name: field.name.clone(),
                });
            }
            if field.len == 0 {
                return Err(SchemaError::EmptyArray {
                    name: field.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Total number of bytes one snapshot of this schema occupies.
    #[must_use]
    pub fn encoded_size(&self) -> usize {
        self.fields.iter().map(FieldDef::encoded_size).sum()
    }

    /// Total number of values, counting each array element.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.fields.iter().map(|field| field.len as usize).sum()
    }

    /// Iterates over the kind of every value in wire order.
    pub fn kinds(&self) -> impl Iterator<Item = FieldKind> + '_ {
        self.fields
            .iter()
            .flat_map(|field| std::iter::repeat(field.kind).take(field.len as usize))
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the byte offset of a field's first value.
    #[must_use]
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        let mut offset = 0;
        for field in &self.fields {
            if field.name == name {
                return Some(offset);
            }
            offset += field.encoded_size();
        }
        None
    }
}

/// Builder for `Schema`.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDef>,
}

impl SchemaBuilder {
    /// Appends a field definition.
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Builds the schema after validation.
    pub fn build(self) -> SchemaResult<Schema> {
        Schema::new(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bomber_schema() -> Schema {
        Schema::builder()
            .field(FieldDef::integer("tick"))
            .field(FieldDef::array("cells", FieldKind::Integer, 4))
            .field(FieldDef::boolean("alive"))
            .field(FieldDef::float("x"))
            .field(FieldDef::pointer("controller"))
            .build()
            .unwrap()
    }

    #[test]
    fn schema_builder_roundtrip() {
        let schema = bomber_schema();
        assert_eq!(schema.fields.len(), 5);
        assert_eq!(schema.value_count(), 8);
        assert_eq!(schema.encoded_size(), 4 + 16 + 1 + 4 + 8);
    }

    #[test]
    fn kinds_expand_arrays_in_order() {
        let schema = bomber_schema();
        let kinds: Vec<FieldKind> = schema.kinds().collect();
        assert_eq!(
            kinds,
            vec![
                FieldKind::Integer,
                FieldKind::Integer,
                FieldKind::Integer,
                FieldKind::Integer,
                FieldKind::Integer,
                FieldKind::Boolean,
                FieldKind::Float,
                FieldKind::Pointer,
            ]
        );
    }

    #[test]
    fn offsets_follow_field_order() {
        let schema = bomber_schema();
        assert_eq!(schema.offset_of("tick"), Some(0));
        assert_eq!(schema.offset_of("cells"), Some(4));
        assert_eq!(schema.offset_of("alive"), Some(20));
        assert_eq!(schema.offset_of("x"), Some(21));
        assert_eq!(schema.offset_of("controller"), Some(25));
        assert_eq!(schema.offset_of("missing"), None);
    }

    #[test]
    fn field_lookup() {
        let schema = bomber_schema();
        assert_eq!(schema.field("cells").map(|f| f.len), Some(4));
        assert!(schema.field("nope").is_none());
    }

    #[test]
    fn empty_schema_is_valid() {
        let schema = Schema::new(Vec::new()).unwrap();
        assert_eq!(schema.encoded_size(), 0);
        assert_eq!(schema.kinds().count(), 0);
    }

    #[test]
    fn schema_rejects_duplicate_names() {
        let err = Schema::new(vec![FieldDef::integer("x"), FieldDef::float("x")]).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateFieldName { ref name } if name == "x"));
    }

    #[test]
    fn schema_rejects_empty_name() {
        let err = Schema::new(vec![FieldDef::integer("a"), FieldDef::integer("")]).unwrap_err();
        assert_eq!(err, SchemaError::EmptyFieldName { index: 1 });
    }

    #[test]
    fn schema_rejects_zero_length_array() {
        let err = Schema::new(vec![FieldDef::array("bombs", FieldKind::Boolean, 0)]).unwrap_err();
        assert!(matches!(err, SchemaError::EmptyArray { .. }));
    }

    #[test]
    fn validate_catches_mutation_after_build() {
        let mut schema = bomber_schema();
        schema.fields.push(FieldDef::integer("tick"));
        assert!(schema.validate().is_err());
    }
}
