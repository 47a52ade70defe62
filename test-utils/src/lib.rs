//! Shared JSON/MessagePack fixtures and schema builders for the six
//! end-to-end scenarios exercised by the integration tests of every crate in
//! this workspace.

use numshape_core::{DType, ScalarType, Schema, SchemaSpec};

/// JSON source text for each scenario, verbatim from the wire.
pub mod json {
    pub const FLOAT_SCALAR: &str = r#"{"float":0.34}"#;
    pub const FLOAT_ARRAY_2X2: &str = r#"{"float_arr":[[1.25,-0.69],[-0.29,0.52]]}"#;
    pub const STREAM0_SEQ_OF_ARRAYS: &str = r#"{"stream0":[[-1.72,0.6,0.05,0.72,1.54],[72,45,-58,-16,-14],[1,0,0,1,0]]}"#;
    pub const STREAM4_ROWS_OF_MAPS: &str = r#"{"stream4":[{"x":-2.17,"y":0,"z":1},{"x":-0.06,"y":1,"z":2},{"x":1.37,"y":1,"z":3}]}"#;
    pub const IRREGULAR_ARRAY: &str = r#"{"irregular":[[1,2],[3]]}"#;
    pub const STREAM3_ROWS_OF_SCALARS: &str = r#"{"stream3":[[1.0,0,1],[1.0,1,2],[1.0,1,3]]}"#;
}

/// Schemas paired one-to-one with the constants in [`json`].
pub mod schemas {
    use super::*;

    pub fn float_scalar() -> Schema {
        Schema::from(SchemaSpec::map([(
            "float",
            SchemaSpec::scalar(ScalarType::FloatGen),
        )]))
        .unwrap()
    }

    pub fn float_array_2x2() -> Schema {
        Schema::from(SchemaSpec::map([("float_arr", SchemaSpec::array(DType::F32))])).unwrap()
    }

    pub fn stream0_seq_of_arrays() -> Schema {
        Schema::from(SchemaSpec::map([(
            "stream0",
            SchemaSpec::seq_of_arrays([DType::F64, DType::I16, DType::U8]),
        )]))
        .unwrap()
    }

    pub fn stream4_rows_of_maps() -> Schema {
        Schema::from(SchemaSpec::map([(
            "stream4",
            SchemaSpec::seq_of_maps_transposed([
                ("x", DType::F64),
                ("y", DType::U8),
                ("z", DType::U8),
            ]),
        )]))
        .unwrap()
    }

    pub fn irregular_array() -> Schema {
        Schema::from(SchemaSpec::map([("irregular", SchemaSpec::array(DType::F32))])).unwrap()
    }

    pub fn stream3_rows_of_scalars() -> Schema {
        Schema::from(SchemaSpec::map([(
            "stream3",
            SchemaSpec::seq_of_arrays_transposed([DType::F64, DType::I32, DType::I64, DType::Str]),
        )]))
        .unwrap()
    }
}

/// Hand-encoded MessagePack byte buffers equivalent to the constants in
/// [`json`]. Mirrors the low-level encoding style `numshape-msgpack`'s own
/// tests use rather than pulling in a MessagePack encoder crate.
pub mod msgpack {
    fn fixmap(len: u8) -> u8 {
        0x80 | len
    }

    fn fixstr_header(s: &str, out: &mut Vec<u8>) {
        out.push(0xa0 | s.len() as u8);
        out.extend_from_slice(s.as_bytes());
    }

    fn push_f64(out: &mut Vec<u8>, v: f64) {
        out.push(0xcb);
        out.extend_from_slice(&v.to_be_bytes());
    }

    fn push_fixarray(out: &mut Vec<u8>, len: u8) {
        out.push(0x90 | len);
    }

    fn push_int(out: &mut Vec<u8>, v: i64) {
        if (0..=127).contains(&v) {
            out.push(v as u8);
        } else if (-32..0).contains(&v) {
            out.push((v as i8) as u8);
        } else {
            out.push(0xd3); // int64
            out.extend_from_slice(&v.to_be_bytes());
        }
    }

    pub fn float_scalar() -> Vec<u8> {
        let mut out = vec![fixmap(1)];
        fixstr_header("float", &mut out);
        push_f64(&mut out, 0.34);
        out
    }

    pub fn float_array_2x2() -> Vec<u8> {
        let mut out = vec![fixmap(1)];
        fixstr_header("float_arr", &mut out);
        push_fixarray(&mut out, 2);
        for row in [[1.25, -0.69], [-0.29, 0.52]] {
            push_fixarray(&mut out, 2);
            for v in row {
                push_f64(&mut out, v);
            }
        }
        out
    }

    pub fn stream0_seq_of_arrays() -> Vec<u8> {
        let mut out = vec![fixmap(1)];
        fixstr_header("stream0", &mut out);
        push_fixarray(&mut out, 3);
        push_fixarray(&mut out, 5);
        for v in [-1.72, 0.6, 0.05, 0.72, 1.54] {
            push_f64(&mut out, v);
        }
        push_fixarray(&mut out, 5);
        for v in [72, 45, -58, -16, -14] {
            push_int(&mut out, v);
        }
        push_fixarray(&mut out, 5);
        for v in [1, 0, 0, 1, 0] {
            push_int(&mut out, v);
        }
        out
    }

    pub fn stream4_rows_of_maps() -> Vec<u8> {
        let mut out = vec![fixmap(1)];
        fixstr_header("stream4", &mut out);
        push_fixarray(&mut out, 3);
        for (x, y, z) in [(-2.17, 0, 1), (-0.06, 1, 2), (1.37, 1, 3)] {
            out.push(fixmap(3));
            fixstr_header("x", &mut out);
            push_f64(&mut out, x);
            fixstr_header("y", &mut out);
            push_int(&mut out, y);
            fixstr_header("z", &mut out);
            push_int(&mut out, z);
        }
        out
    }

    pub fn irregular_array() -> Vec<u8> {
        let mut out = vec![fixmap(1)];
        fixstr_header("irregular", &mut out);
        push_fixarray(&mut out, 2);
        push_fixarray(&mut out, 2);
        push_int(&mut out, 1);
        push_int(&mut out, 2);
        push_fixarray(&mut out, 1);
        push_int(&mut out, 3);
        out
    }
}
