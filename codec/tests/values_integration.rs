use codec::{
    decode_values, decode_values_from_bytes, encode_values, CodecError, CodecLimits, FieldValue,
    Handle, SnapshotBuffer,
};
use schema::{schema_hash, FieldDef, FieldKind, Schema};

fn arena_like_schema() -> Schema {
    Schema::builder()
        .field(FieldDef::integer("tick"))
        .field(FieldDef::array("cells", FieldKind::Integer, 6))
        .field(FieldDef::array("alive", FieldKind::Boolean, 2))
        .field(FieldDef::array("x", FieldKind::Float, 2))
        .field(FieldDef::array("controller", FieldKind::Pointer, 2))
        .build()
        .unwrap()
}

fn arena_like_values() -> Vec<FieldValue> {
    let mut values = vec![FieldValue::Integer(120)];
    values.extend([0, 1, 2, 2, 1, 0].map(FieldValue::Integer));
    values.extend([true, false].map(FieldValue::Boolean));
    values.extend([1.5f32, f32::NAN].map(FieldValue::Float));
    values.extend([Handle::new(1), Handle::NULL].map(FieldValue::Pointer));
    values
}

#[test]
fn integration_encode_transfer_decode() {
    let schema = arena_like_schema();
    let values = arena_like_values();

    let mut sender = SnapshotBuffer::<128>::new();
    let bytes = encode_values(&schema, &values, &CodecLimits::default(), &mut sender).unwrap();
    assert_eq!(bytes, 4 + 24 + 2 + 8 + 16);

    let blob = sender.written().to_vec();
    let decoded = decode_values_from_bytes(&schema, &CodecLimits::default(), &blob).unwrap();
    assert_eq!(decoded.len(), values.len());
    for (a, b) in decoded.iter().zip(&values) {
        assert!(a.bit_eq(b), "{a:?} != {b:?}");
    }
}

#[test]
fn integration_buffer_reuse_across_ticks() {
    let schema = arena_like_schema();
    let mut buf = SnapshotBuffer::<128>::new();

    for tick in 0..10 {
        let mut values = arena_like_values();
        values[0] = FieldValue::Integer(tick);
        encode_values(&schema, &values, &CodecLimits::default(), &mut buf).unwrap();
        let decoded = decode_values(&schema, &CodecLimits::default(), &mut buf).unwrap();
        assert_eq!(decoded[0], FieldValue::Integer(tick));
    }
}

#[test]
fn integration_peers_detect_schema_drift_by_hash() {
    let schema = arena_like_schema();
    let mut newer = arena_like_schema();
    newer.fields.push(FieldDef::integer("round"));
    assert_ne!(schema_hash(&schema), schema_hash(&newer));

    let mut buf = SnapshotBuffer::<128>::new();
    encode_values(&schema, &arena_like_values(), &CodecLimits::default(), &mut buf).unwrap();
    let err = decode_values_from_bytes(&newer, &CodecLimits::default(), buf.written()).unwrap_err();
    assert!(matches!(err, CodecError::SizeMismatch { .. }));
}

#[test]
fn integration_scenario_sixteen_byte_buffer() {
    let schema = Schema::builder()
        .field(FieldDef::integer("score"))
        .field(FieldDef::boolean("alive"))
        .field(FieldDef::float("speed"))
        .build()
        .unwrap();
    let values = vec![
        FieldValue::Integer(42),
        FieldValue::Boolean(true),
        FieldValue::Float(3.5),
    ];

    let mut buf = SnapshotBuffer::<16>::new();
    let bytes = encode_values(&schema, &values, &CodecLimits::for_testing(), &mut buf).unwrap();
    assert_eq!(bytes, 9);
    assert_eq!(buf.remaining(), 7);

    let decoded = decode_values(&schema, &CodecLimits::for_testing(), &mut buf).unwrap();
    assert_eq!(decoded, values);

    buf.write_float(0.25).unwrap();
    assert_eq!(buf.cursor(), 13);
    let err = buf.write_integer(1).unwrap_err();
    assert!(matches!(err, buffer::BufferError::Overflow { cursor: 13, .. }));
}
