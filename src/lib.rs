//! Schema-directed deserialization of self-describing JSON and MessagePack
//! payloads into typed, contiguous numeric buffers.
//!
//! This crate is a thin facade: [`numshape_core`] owns the schema tree, the
//! pull-based walker, and the output [`Value`]/[`TypedBuffer`] types;
//! `numshape-json` and `numshape-msgpack` each supply one
//! [`TokenSource`](numshape_core::TokenSource) implementation. The
//! [`SchemaDeserialize`] trait below is the only thing this crate adds: it
//! wires a [`Schema`] straight to a byte slice without the caller naming a
//! `TokenSource` impl by hand.
//!
//! ```
//! use numshape::prelude::*;
//!
//! let schema = Schema::from(SchemaSpec::map([
//!     ("float", SchemaSpec::scalar(ScalarType::FloatGen)),
//! ]))
//! .unwrap();
//! let value = schema.deserialize_json(br#"{"float":0.34}"#).unwrap();
//! assert_eq!(value.as_map().unwrap().get("float"), Some(&Value::ScalarFloat(0.34)));
//! ```

pub use numshape_core::*;

pub mod prelude {
    pub use numshape_core::prelude::*;

    pub use super::SchemaDeserialize;
}

/// Deserializes a byte buffer directly against `self`, picking the format
/// back-end by method name rather than by a `TokenSource` type parameter.
pub trait SchemaDeserialize {
    fn deserialize_json(&self, bytes: &[u8]) -> Result<Value, Error>;
    fn deserialize_msgpack(&self, bytes: &[u8]) -> Result<Value, Error>;
}

impl SchemaDeserialize for Schema {
    fn deserialize_json(&self, bytes: &[u8]) -> Result<Value, Error> {
        let mut src = numshape_json::JsonTokenSource::new(bytes);
        decode(self, &mut src)
    }

    fn deserialize_msgpack(&self, bytes: &[u8]) -> Result<Value, Error> {
        let mut src = numshape_msgpack::MsgpackTokenSource::new(bytes);
        decode(self, &mut src)
    }
}
