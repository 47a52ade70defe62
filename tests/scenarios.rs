use numshape::prelude::*;
use numshape_test_utils::{json, msgpack, schemas};

#[test]
fn float_scalar_round_trips() {
    let schema = schemas::float_scalar();
    let value = schema.deserialize_json(json::FLOAT_SCALAR.as_bytes()).unwrap();
    assert_eq!(
        value.as_map().unwrap().get("float"),
        Some(&Value::ScalarFloat(0.34))
    );

    let value = schema.deserialize_msgpack(&msgpack::float_scalar()).unwrap();
    assert_eq!(
        value.as_map().unwrap().get("float"),
        Some(&Value::ScalarFloat(0.34))
    );
}

#[test]
fn float_array_casts_to_f32_with_shape_2x2() {
    let schema = schemas::float_array_2x2();
    let value = schema
        .deserialize_json(json::FLOAT_ARRAY_2X2.as_bytes())
        .unwrap();
    let arr = value.as_map().unwrap().get("float_arr").unwrap().as_array().unwrap();
    assert_eq!(arr.shape(), &[2, 2]);
    assert_eq!(arr.dtype(), DType::F32);

    let value = schema
        .deserialize_msgpack(&msgpack::float_array_2x2())
        .unwrap();
    let arr = value.as_map().unwrap().get("float_arr").unwrap().as_array().unwrap();
    assert_eq!(arr.shape(), &[2, 2]);
}

#[test]
fn seq_of_arrays_yields_three_length_five_columns() {
    let schema = schemas::stream0_seq_of_arrays();
    let value = schema
        .deserialize_json(json::STREAM0_SEQ_OF_ARRAYS.as_bytes())
        .unwrap();
    let columns = value
        .as_map()
        .unwrap()
        .get("stream0")
        .unwrap()
        .as_array_list()
        .unwrap();
    assert_eq!(columns.len(), 3);
    for col in columns {
        assert_eq!(col.shape(), &[5]);
    }
    assert_eq!(columns[0].dtype(), DType::F64);
    assert_eq!(columns[1].dtype(), DType::I16);
    assert_eq!(columns[2].dtype(), DType::U8);
}

#[test]
fn seq_of_maps_transposed_yields_three_length_three_columns() {
    let schema = schemas::stream4_rows_of_maps();
    let value = schema
        .deserialize_json(json::STREAM4_ROWS_OF_MAPS.as_bytes())
        .unwrap();
    let columns = value
        .as_map()
        .unwrap()
        .get("stream4")
        .unwrap()
        .as_array_list()
        .unwrap();
    assert_eq!(columns.len(), 3);
    for col in columns {
        assert_eq!(col.shape(), &[3]);
    }

    let value = schema
        .deserialize_msgpack(&msgpack::stream4_rows_of_maps())
        .unwrap();
    let columns = value
        .as_map()
        .unwrap()
        .get("stream4")
        .unwrap()
        .as_array_list()
        .unwrap();
    assert_eq!(columns.len(), 3);
}

#[test]
fn irregular_array_reports_shape_and_total() {
    let schema = schemas::irregular_array();
    let err = schema
        .deserialize_json(json::IRREGULAR_ARRAY.as_bytes())
        .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with(
        "Irregular shape found cannot parse as f32 array. Expected shape: [2, 2]  Total elements: 3"
    ));

    let err = schema
        .deserialize_msgpack(&msgpack::irregular_array())
        .unwrap_err();
    assert!(err.to_string().starts_with("Irregular shape found"));
}

#[test]
fn too_many_columns_reports_expected_and_found() {
    let schema = schemas::stream3_rows_of_scalars();
    let err = schema
        .deserialize_json(json::STREAM3_ROWS_OF_SCALARS.as_bytes())
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("(4)"));
    assert!(message.contains("(3)"));
}

#[test]
fn unreferenced_key_does_not_change_output() {
    let schema = schemas::float_scalar();
    let with_extra = r#"{"float":0.34,"unused":"ignored"}"#;
    let baseline = schema.deserialize_json(json::FLOAT_SCALAR.as_bytes()).unwrap();
    let with_extra = schema.deserialize_json(with_extra.as_bytes()).unwrap();
    assert_eq!(baseline, with_extra);
}

#[test]
fn missing_schema_key_errors() {
    let schema = Schema::from(SchemaSpec::map([
        ("float", SchemaSpec::scalar(ScalarType::FloatGen)),
        ("extra", SchemaSpec::scalar(ScalarType::Bool)),
    ]))
    .unwrap();
    let err = schema.deserialize_json(json::FLOAT_SCALAR.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("extra"));
}

#[test]
fn repeated_deserialization_is_stable() {
    let schema = schemas::stream0_seq_of_arrays();
    let bytes = json::STREAM0_SEQ_OF_ARRAYS.as_bytes();
    let first = schema.deserialize_json(bytes).unwrap();
    let second = schema.deserialize_json(bytes).unwrap();
    assert_eq!(first, second);
}
