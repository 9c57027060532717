use proptest::prelude::*;
use schema::{schema_hash, FieldDef, FieldKind, Schema};

fn kind_strategy() -> impl Strategy<Value = FieldKind> {
    prop::sample::select(FieldKind::ALL.to_vec())
}

fn schema_strategy() -> impl Strategy<Value = Schema> {
    prop::collection::vec((kind_strategy(), 1u32..32), 0..24).prop_map(|specs| {
        let fields = specs
            .into_iter()
            .enumerate()
            .map(|(idx, (kind, len))| FieldDef::array(format!("f{idx}"), kind, len))
            .collect();
        Schema::new(fields).unwrap()
    })
}

proptest! {
    #[test]
    fn prop_encoded_size_matches_kinds(schema in schema_strategy()) {
        let from_kinds: usize = schema.kinds().map(FieldKind::size).sum();
        prop_assert_eq!(schema.encoded_size(), from_kinds);
        prop_assert_eq!(schema.kinds().count(), schema.value_count());
    }

    #[test]
    fn prop_offsets_are_prefix_sums(schema in schema_strategy()) {
        let mut expected = 0usize;
        for field in &schema.fields {
            prop_assert_eq!(schema.offset_of(&field.name), Some(expected));
            expected += field.encoded_size();
        }
        prop_assert_eq!(expected, schema.encoded_size());
    }

    #[test]
    fn prop_hash_is_deterministic(schema in schema_strategy()) {
        prop_assert_eq!(schema_hash(&schema), schema_hash(&schema.clone()));
    }
}
