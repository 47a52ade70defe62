use crate::dtype::DType;
use crate::errors::Error;
use crate::token::Event;

/// A growable, row-major container for one scalar element type.
///
/// The shape is not known up front -- it is inferred from the nesting depth
/// at which scalars were emitted during the walk -- so `data` is appended to
/// flat and `shape` is only set once, when the enclosing sequence closes.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer<T> {
    data: Vec<T>,
    shape: Vec<usize>,
}

impl<T> Buffer<T> {
    pub fn new() -> Self {
        Buffer {
            data: Vec::new(),
            shape: Vec::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn set_shape(&mut self, shape: Vec<usize>) {
        self.shape = shape;
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tagged variant over every [`DType`]'s growable container.
///
/// One of these backs every `Array`/`SeqOfArrays`/`SeqOfArraysTransposed`/
/// `SeqOfMapsTransposed` leaf the schema names.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedBuffer {
    I8(Buffer<i8>),
    I16(Buffer<i16>),
    I32(Buffer<i32>),
    I64(Buffer<i64>),
    U8(Buffer<u8>),
    U16(Buffer<u16>),
    U32(Buffer<u32>),
    U64(Buffer<u64>),
    F32(Buffer<f32>),
    F64(Buffer<f64>),
    Bool(Buffer<bool>),
    Str(Buffer<String>),
}

macro_rules! for_each_buffer {
    ($self:expr, $buf:ident => $body:expr) => {
        match $self {
            TypedBuffer::I8($buf) => $body,
            TypedBuffer::I16($buf) => $body,
            TypedBuffer::I32($buf) => $body,
            TypedBuffer::I64($buf) => $body,
            TypedBuffer::U8($buf) => $body,
            TypedBuffer::U16($buf) => $body,
            TypedBuffer::U32($buf) => $body,
            TypedBuffer::U64($buf) => $body,
            TypedBuffer::F32($buf) => $body,
            TypedBuffer::F64($buf) => $body,
            TypedBuffer::Bool($buf) => $body,
            TypedBuffer::Str($buf) => $body,
        }
    };
}

impl TypedBuffer {
    pub fn new(dtype: DType) -> Self {
        match dtype {
            DType::I8 => TypedBuffer::I8(Buffer::new()),
            DType::I16 => TypedBuffer::I16(Buffer::new()),
            DType::I32 => TypedBuffer::I32(Buffer::new()),
            DType::I64 => TypedBuffer::I64(Buffer::new()),
            DType::U8 => TypedBuffer::U8(Buffer::new()),
            DType::U16 => TypedBuffer::U16(Buffer::new()),
            DType::U32 => TypedBuffer::U32(Buffer::new()),
            DType::U64 => TypedBuffer::U64(Buffer::new()),
            DType::F32 => TypedBuffer::F32(Buffer::new()),
            DType::F64 => TypedBuffer::F64(Buffer::new()),
            DType::Bool => TypedBuffer::Bool(Buffer::new()),
            DType::Str => TypedBuffer::Str(Buffer::new()),
        }
    }

    pub fn dtype(&self) -> DType {
        match self {
            TypedBuffer::I8(_) => DType::I8,
            TypedBuffer::I16(_) => DType::I16,
            TypedBuffer::I32(_) => DType::I32,
            TypedBuffer::I64(_) => DType::I64,
            TypedBuffer::U8(_) => DType::U8,
            TypedBuffer::U16(_) => DType::U16,
            TypedBuffer::U32(_) => DType::U32,
            TypedBuffer::U64(_) => DType::U64,
            TypedBuffer::F32(_) => DType::F32,
            TypedBuffer::F64(_) => DType::F64,
            TypedBuffer::Bool(_) => DType::Bool,
            TypedBuffer::Str(_) => DType::Str,
        }
    }

    pub fn shape(&self) -> &[usize] {
        for_each_buffer!(self, b => b.shape())
    }

    pub fn set_shape(&mut self, shape: Vec<usize>) {
        for_each_buffer!(self, b => b.set_shape(shape))
    }

    pub fn len(&self) -> usize {
        for_each_buffer!(self, b => b.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends one scalar event, applying the element-conversion table for
    /// this buffer's [`DType`]. Returns `Could not deserialize as <dt>` for
    /// any event the table rejects.
    pub fn push_event(&mut self, event: &Event<'_>) -> Result<(), Error> {
        match self {
            TypedBuffer::I8(b) => push_int(b, event, DType::I8, |v| v as i8),
            TypedBuffer::I16(b) => push_int(b, event, DType::I16, |v| v as i16),
            TypedBuffer::I32(b) => push_int(b, event, DType::I32, |v| v as i32),
            TypedBuffer::I64(b) => push_int(b, event, DType::I64, |v| v),
            TypedBuffer::U8(b) => push_uint(b, event, DType::U8, |v| v as u8),
            TypedBuffer::U16(b) => push_uint(b, event, DType::U16, |v| v as u16),
            TypedBuffer::U32(b) => push_uint(b, event, DType::U32, |v| v as u32),
            TypedBuffer::U64(b) => push_uint(b, event, DType::U64, |v| v),
            TypedBuffer::F32(b) => push_float(b, event, DType::F32, |v| v as f32),
            TypedBuffer::F64(b) => push_float(b, event, DType::F64, |v| v),
            TypedBuffer::Bool(b) => push_bool(b, event),
            TypedBuffer::Str(b) => push_str(b, event),
        }
    }
}

fn push_int<T>(
    buf: &mut Buffer<T>,
    event: &Event<'_>,
    dtype: DType,
    narrow: impl Fn(i64) -> T,
) -> Result<(), Error> {
    match *event {
        Event::Int(i) => {
            buf.push(narrow(i));
            Ok(())
        }
        Event::UInt(u) => {
            buf.push(narrow(u as i64));
            Ok(())
        }
        _ => Err(Error::could_not_deserialize_as(dtype.name())),
    }
}

fn push_uint<T>(
    buf: &mut Buffer<T>,
    event: &Event<'_>,
    dtype: DType,
    narrow: impl Fn(u64) -> T,
) -> Result<(), Error> {
    match *event {
        Event::UInt(u) => {
            buf.push(narrow(u));
            Ok(())
        }
        Event::Int(i) if i >= 0 => {
            buf.push(narrow(i as u64));
            Ok(())
        }
        _ => Err(Error::could_not_deserialize_as(dtype.name())),
    }
}

fn push_float<T>(
    buf: &mut Buffer<T>,
    event: &Event<'_>,
    dtype: DType,
    narrow: impl Fn(f64) -> T,
) -> Result<(), Error> {
    match *event {
        Event::Float(f) => {
            buf.push(narrow(f));
            Ok(())
        }
        Event::Int(i) => {
            buf.push(narrow(i as f64));
            Ok(())
        }
        Event::UInt(u) => {
            buf.push(narrow(u as f64));
            Ok(())
        }
        _ => Err(Error::could_not_deserialize_as(dtype.name())),
    }
}

fn push_bool(buf: &mut Buffer<bool>, event: &Event<'_>) -> Result<(), Error> {
    match *event {
        Event::Bool(b) => {
            buf.push(b);
            Ok(())
        }
        _ => Err(Error::could_not_deserialize_as(DType::Bool.name())),
    }
}

fn push_str(buf: &mut Buffer<String>, event: &Event<'_>) -> Result<(), Error> {
    match event {
        Event::Str(s) => {
            buf.push(s.to_string());
            Ok(())
        }
        _ => Err(Error::could_not_deserialize_as(DType::Str.name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_ints_per_target_width() {
        let mut buf = TypedBuffer::new(DType::I8);
        buf.push_event(&Event::Int(300)).unwrap();
        let TypedBuffer::I8(b) = &buf else { panic!() };
        assert_eq!(b.data(), &[300i64 as i8]);
    }

    #[test]
    fn rejects_negative_into_unsigned() {
        let mut buf = TypedBuffer::new(DType::U8);
        let err = buf.push_event(&Event::Int(-1)).unwrap_err();
        assert_eq!(err.to_string(), "Could not deserialize as u8");
    }

    #[test]
    fn floats_accept_ints_widened_then_narrowed() {
        let mut buf = TypedBuffer::new(DType::F32);
        buf.push_event(&Event::Int(2)).unwrap();
        let TypedBuffer::F32(b) = &buf else { panic!() };
        assert_eq!(b.data(), &[2.0f32]);
    }

    #[test]
    fn rejects_float_into_int_buffer() {
        let mut buf = TypedBuffer::new(DType::I32);
        let err = buf.push_event(&Event::Float(1.0)).unwrap_err();
        assert_eq!(err.to_string(), "Could not deserialize as i32");
    }
}
