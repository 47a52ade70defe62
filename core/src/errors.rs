use thiserror::Error;

/// Errors raised while building a [`crate::Schema`] from a [`crate::SchemaSpec`].
///
/// These are the only errors that can occur before a single byte of input is read;
/// a schema, once built, is immutable and reused across documents. The typed
/// [`crate::SchemaSpec`] builder API can't actually construct the shape this
/// rejects -- `SeqOfMapsTransposed` columns are pinned to [`crate::DType`], so
/// there is no way to nest a map inside a column -- but the variant stays for
/// parity with the rest of the error table and for callers who build a
/// `SchemaSpec` programmatically from an untyped source.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConstructionError {
    #[error(
        "structure unsupported. Currently sequences of nested structures are unsupported e.g. [{{\"a\": {{\"b\": Type}}}}])"
    )]
    NestedStructureInSequence,
}

/// Errors raised while walking a document against a [`crate::Schema`].
///
/// Every variant is fatal to the current [`crate::decode`] call: nothing is
/// retried or locally recovered, and partial output is discarded.
#[derive(Error, Debug)]
pub enum Error {
    /// The input bytes could not be lexed as the expected wire format.
    #[error("{0}")]
    Parse(String),

    /// A scalar event didn't match what the schema expected at that position,
    /// a map/sequence shape mismatched the schema, or a schema-named key was
    /// never observed in the input.
    #[error("{0}")]
    Type(String),

    /// A nested sequence meant to become a rectangular N-dimensional array
    /// turned out to be jagged.
    #[error("{0}")]
    Value(String),

    /// A schema shape or conversion this back-end doesn't support yet.
    #[error("{0}")]
    NotImplemented(String),
}

impl Error {
    pub(crate) fn could_not_deserialize_as(type_name: &str) -> Self {
        Error::Type(format!("Could not deserialize as {type_name}"))
    }

    pub(crate) fn keys_not_found(keys: &[&str]) -> Self {
        let joined = keys
            .iter()
            .map(|k| format!("\"{k}\""))
            .collect::<Vec<_>>()
            .join(", ");
        Error::Type(format!("Key(s) not found: [{joined}]"))
    }

    pub(crate) fn too_many_columns(expected: usize, found: usize) -> Self {
        Error::Type(format!(
            "Too many columns specified: [...] ({expected}) \nFound: ({found})"
        ))
    }

    pub(crate) fn irregular_shape(dtype_name: &str, expected_shape: &[usize], total: usize) -> Self {
        Error::Value(format!(
            "Irregular shape found cannot parse as {dtype_name} array. Expected shape: {expected_shape:?}  Total elements: {total}"
        ))
    }

    pub(crate) fn sequence_as_map_of_arrays() -> Self {
        Error::Type("Cannot deserialize sequence as map of arrays".to_string())
    }

    pub(crate) fn invalid_type_sequence_expected_map(elements: &str) -> Self {
        Error::Type(format!(
            "invalid type: sequence, expected map with elements: {elements}"
        ))
    }

    pub(crate) fn invalid_type_map_expected_sequence(elements: &str) -> Self {
        Error::Type(format!(
            "invalid type: map, expected sequence with elements: {elements}"
        ))
    }

    pub(crate) fn map_as_sequence_of_arrays() -> Self {
        Error::Type("Cannot deserialize map as sequence of arrays".to_string())
    }

    pub(crate) fn map_as_type(type_name: &str) -> Self {
        Error::Type(format!(
            "Cannot deserialize map as type: {type_name}. Try using a dictionary instead"
        ))
    }
}
