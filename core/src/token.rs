use std::borrow::Cow;

/// A single structural or scalar event pulled from a self-describing document.
///
/// Both back-ends (JSON, MessagePack) reduce to this one vocabulary so that
/// [`crate::decode`] never has to know which wire format produced it. Length
/// hints on `MapStart`/`SeqStart` are optional -- JSON rarely knows them ahead
/// of time, MessagePack almost always does -- but `MapEnd`/`SeqEnd` are always
/// emitted and are the only thing the walker actually relies on to know a
/// container has closed.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    MapStart(Option<usize>),
    MapKey(Cow<'a, str>),
    MapEnd,
    SeqStart(Option<usize>),
    SeqEnd,
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(Cow<'a, str>),
}

impl Event<'_> {
    /// Name used in type-mismatch error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Event::MapStart(_) => "map",
            Event::MapKey(_) => "map key",
            Event::MapEnd => "map end",
            Event::SeqStart(_) => "sequence",
            Event::SeqEnd => "sequence end",
            Event::Null => "null",
            Event::Bool(_) => "bool",
            Event::Int(_) => "int",
            Event::UInt(_) => "uint",
            Event::Float(_) => "float",
            Event::Str(_) => "string",
        }
    }
}

/// A uniform pull interface over a format-specific parser.
///
/// Implementors never materialize the whole document: each call to
/// [`next_event`](TokenSource::next_event) advances the cursor by exactly one
/// structural or scalar event. `finish` is called once after the root value
/// has been fully consumed, to reject trailing garbage.
pub trait TokenSource<'a> {
    type Error: std::error::Error;

    fn next_event(&mut self) -> Result<Event<'a>, Self::Error>;

    /// Confirms there is no more meaningful input after the root value.
    fn finish(&mut self) -> Result<(), Self::Error>;
}
