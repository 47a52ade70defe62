use indexmap::IndexMap;

use crate::dtype::{DType, ScalarType};
use crate::errors::ConstructionError;
use crate::schema::SchemaNode;

/// The raw, caller-facing description of a schema, before validation.
///
/// Mirrors the six input forms a caller may hand to [`crate::Schema::from`]
/// (spec §4.1). Unlike [`SchemaNode`], this tree is allowed to describe
/// shapes that don't make sense as a top-level schema (e.g. a bare scalar) --
/// `Schema::from` is what rejects those, with one [`ConstructionError`] per
/// rejected shape.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSpec {
    Scalar(ScalarType),
    Array(DType),
    Map(Vec<(String, SchemaSpec)>),
    SeqOfArrays(Vec<DType>),
    SeqOfArraysTransposed(Vec<DType>),
    SeqOfMapsTransposed(Vec<(String, DType)>),
}

/// Converts a map-entry list into an ordered field map, recursing through
/// [`build_node`] for each value.
fn build_fields(
    entries: Vec<(String, SchemaSpec)>,
) -> Result<IndexMap<String, SchemaNode>, ConstructionError> {
    entries
        .into_iter()
        .map(|(name, spec)| Ok((name, build_node(spec)?)))
        .collect()
}

/// Converts a raw [`SchemaSpec`] into the [`SchemaNode`] tree a
/// [`crate::Schema`] actually walks. Called once from [`crate::Schema::from`]
/// on the root spec; every nested `SchemaSpec::Map` value recurses back
/// through here via [`build_fields`].
pub(crate) fn build_node(spec: SchemaSpec) -> Result<SchemaNode, ConstructionError> {
    match spec {
        SchemaSpec::Scalar(t) => Ok(SchemaNode::Scalar(t)),
        SchemaSpec::Array(dt) => Ok(SchemaNode::Array(dt)),
        SchemaSpec::Map(entries) => Ok(SchemaNode::Map(build_fields(entries)?)),
        SchemaSpec::SeqOfArrays(dtypes) => Ok(SchemaNode::SeqOfArrays(dtypes)),
        SchemaSpec::SeqOfArraysTransposed(dtypes) => {
            Ok(SchemaNode::SeqOfArraysTransposed(dtypes))
        }
        SchemaSpec::SeqOfMapsTransposed(cols) => {
            Ok(SchemaNode::SeqOfMapsTransposed(cols.into_iter().collect()))
        }
    }
}

impl SchemaSpec {
    pub fn scalar(t: ScalarType) -> Self {
        SchemaSpec::Scalar(t)
    }

    pub fn array(dt: DType) -> Self {
        SchemaSpec::Array(dt)
    }

    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaSpec)>,
        K: Into<String>,
    {
        SchemaSpec::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn seq_of_arrays(dtypes: impl IntoIterator<Item = DType>) -> Self {
        SchemaSpec::SeqOfArrays(dtypes.into_iter().collect())
    }

    pub fn seq_of_arrays_transposed(dtypes: impl IntoIterator<Item = DType>) -> Self {
        SchemaSpec::SeqOfArraysTransposed(dtypes.into_iter().collect())
    }

    pub fn seq_of_maps_transposed<I, K>(columns: I) -> Self
    where
        I: IntoIterator<Item = (K, DType)>,
        K: Into<String>,
    {
        SchemaSpec::SeqOfMapsTransposed(
            columns.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    #[test]
    fn accepts_bare_scalar_at_root() {
        let spec = SchemaSpec::scalar(ScalarType::IntGen);
        let schema = Schema::from(spec).unwrap();
        assert_eq!(schema.root(), &SchemaNode::Scalar(ScalarType::IntGen));
    }

    #[test]
    fn accepts_bare_array_at_root() {
        let spec = SchemaSpec::array(DType::F64);
        let schema = Schema::from(spec).unwrap();
        assert_eq!(schema.root(), &SchemaNode::Array(DType::F64));
    }

    #[test]
    fn accepts_seq_of_arrays_at_root() {
        let spec = SchemaSpec::seq_of_arrays([DType::I32, DType::I32]);
        let schema = Schema::from(spec).unwrap();
        assert_eq!(
            schema.root(),
            &SchemaNode::SeqOfArrays(vec![DType::I32, DType::I32])
        );
    }

    #[test]
    fn builds_nested_map() {
        let spec = SchemaSpec::map([
            ("name", SchemaSpec::scalar(ScalarType::Str)),
            (
                "position",
                SchemaSpec::map([
                    ("x", SchemaSpec::scalar(ScalarType::FloatGen)),
                    ("y", SchemaSpec::scalar(ScalarType::FloatGen)),
                ]),
            ),
        ]);
        let schema = Schema::from(spec).unwrap();
        let fields = schema.fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert!(matches!(fields.get("position"), Some(SchemaNode::Map(_))));
    }
}
