//! Core types for schema-directed deserialization of self-describing payloads
//! (JSON, MessagePack, ...) directly into typed, contiguous numeric buffers.
//!
//! A [`Schema`] names which fields to pull out of a document and which numeric
//! element type to target for each. The [`decode`] walker drives a pull-based
//! [`TokenSource`] in lockstep with the schema tree, appending scalars straight
//! into [`TypedBuffer`]s instead of materializing a generic dynamically-typed
//! tree first.
//!
//! Format back-ends (JSON, MessagePack) live in sibling crates and implement
//! [`TokenSource`] over their own pull parsers.

mod buffer;
mod decode;
mod dtype;
mod errors;
mod schema;
mod spec;
mod token;
mod value;

pub mod prelude;

pub use buffer::{Buffer, TypedBuffer};
pub use decode::decode;
pub use dtype::{DType, ScalarType};
pub use errors::{ConstructionError, Error};
pub use schema::{MissingKeyPolicy, Schema, SchemaNode};
pub use spec::SchemaSpec;
pub use token::{Event, TokenSource};
pub use value::Value;
