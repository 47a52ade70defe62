//! Convenience re-exports for callers building schemas and running [`crate::decode`].

pub use crate::{
    DType, Error, MissingKeyPolicy, Schema, SchemaNode, SchemaSpec, ScalarType, TypedBuffer, Value,
};
