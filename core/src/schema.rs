use indexmap::IndexMap;

use crate::dtype::{DType, ScalarType};
use crate::errors::ConstructionError;
use crate::spec::{build_node, SchemaSpec};

/// One node of the immutable schema tree (spec §3.1).
///
/// A schema is built once from a [`SchemaSpec`] and reused across documents;
/// none of these variants are ever mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Expect one scalar of the given semantic type.
    Scalar(ScalarType),
    /// Expect a (possibly nested) rectangular sequence of scalars; produce a
    /// single N-dimensional array of the given element type.
    Array(DType),
    /// Expect a map; recurse by key, in declaration order.
    Map(IndexMap<String, SchemaNode>),
    /// Expect a sequence of `K` sub-sequences, the k-th an `Array(dtype[k])`.
    SeqOfArrays(Vec<DType>),
    /// Expect a sequence of rows of `K` columns each; produce `K` 1-D arrays,
    /// one per column (row-major input, column-major output).
    SeqOfArraysTransposed(Vec<DType>),
    /// Expect a sequence of maps sharing a key set; produce, per key, a 1-D
    /// array of that key's element type.
    SeqOfMapsTransposed(IndexMap<String, DType>),
}

/// How [`crate::decode`] treats a schema-named key that is absent from the
/// input map (spec §9, open question).
///
/// The original behavior is inconsistent across its own test suite: some
/// tests expect a hard `Key(s) not found` error, others expect the missing
/// key to be silently tolerated. `Strict` is the documented default; `Tolerant`
/// reproduces the permissive reading for callers who rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingKeyPolicy {
    #[default]
    Strict,
    Tolerant,
}

/// An immutable, reusable description of what to pull out of a document and
/// which numeric element type to target for each leaf.
///
/// The root node is usually a [`SchemaNode::Map`] -- most documents are
/// objects with several named streams -- but any node kind is accepted at the
/// root, matching a document whose top level is itself an array or a bare
/// scalar. Build with [`Schema::from`]; the only errors it can raise are
/// [`ConstructionError`]s, since a schema is validated once and never again.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: SchemaNode,
    missing_key_policy: MissingKeyPolicy,
    allow_int_to_float: bool,
}

impl Schema {
    /// Builds an immutable schema from a caller-supplied [`SchemaSpec`].
    pub fn from(spec: SchemaSpec) -> Result<Schema, ConstructionError> {
        Ok(Schema {
            root: build_node(spec)?,
            missing_key_policy: MissingKeyPolicy::default(),
            allow_int_to_float: false,
        })
    }

    /// Sets the policy applied when a schema-named root key never appears in
    /// the input map. Defaults to [`MissingKeyPolicy::Strict`].
    pub fn with_missing_key_policy(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key_policy = policy;
        self
    }

    /// Controls whether a `Scalar(FloatGen)` leaf accepts an `Int`/`UInt`
    /// event in place of a `Float` one. Defaults to `false` (reject). Does
    /// not affect `Array`/`SeqOfArrays*` leaves, which always widen integers
    /// into float buffers regardless of this flag.
    pub fn with_int_to_float_coercion(mut self, allow: bool) -> Self {
        self.allow_int_to_float = allow;
        self
    }

    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Convenience accessor for the common case of a map-rooted schema.
    /// Returns `None` when the root is any other node kind.
    pub fn fields(&self) -> Option<&IndexMap<String, SchemaNode>> {
        match &self.root {
            SchemaNode::Map(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn missing_key_policy(&self) -> MissingKeyPolicy {
        self.missing_key_policy
    }

    pub fn allow_int_to_float(&self) -> bool {
        self.allow_int_to_float
    }
}
