/// The semantic type of a [`crate::SchemaNode::Scalar`] leaf.
///
/// `IntGen`/`FloatGen` stand for "any signed integer" / "any finite float" --
/// the schema names a family, not a fixed bit width, so the decoded value is
/// widened to the widest representation ([`i64`]/[`f64`]) rather than pinned
/// to a buffer element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Str,
    Bool,
    IntGen,
    FloatGen,
}

impl ScalarType {
    /// Lowercase type name used in error messages, matching the schema's own
    /// vocabulary (`int`, `float`, `str`, `bool`).
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Str => "str",
            ScalarType::Bool => "bool",
            ScalarType::IntGen => "int",
            ScalarType::FloatGen => "float",
        }
    }
}

/// The element type of an `Array`/`SeqOfArrays`/`SeqOfArraysTransposed`/
/// `SeqOfMapsTransposed` leaf -- i.e. what a [`crate::TypedBuffer`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Str,
}

impl DType {
    /// Lowercase name used in error messages (`"f32"`, `"u8"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::U64 => "u64",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::Bool => "bool",
            DType::Str => "str",
        }
    }
}
