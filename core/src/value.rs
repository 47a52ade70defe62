use indexmap::IndexMap;

use crate::buffer::TypedBuffer;

/// The result of a single [`crate::decode`] call.
///
/// Mirrors the schema's own shape: a scalar leaf becomes a scalar variant, an
/// `Array` leaf becomes `Array`, `SeqOfArrays`/`SeqOfArraysTransposed`/
/// `SeqOfMapsTransposed` leaves become `ArrayList`, and `Map` becomes `Map`
/// with keys in schema-declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    ScalarStr(String),
    ScalarBool(bool),
    ScalarInt(i64),
    ScalarFloat(f64),
    Array(TypedBuffer),
    Map(IndexMap<String, Value>),
    ArrayList(Vec<TypedBuffer>),
}

impl Value {
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&TypedBuffer> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_list(&self) -> Option<&[TypedBuffer]> {
        match self {
            Value::ArrayList(l) => Some(l),
            _ => None,
        }
    }
}
