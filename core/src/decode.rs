use indexmap::IndexMap;

use crate::buffer::TypedBuffer;
use crate::dtype::{DType, ScalarType};
use crate::errors::Error;
use crate::schema::{MissingKeyPolicy, Schema, SchemaNode};
use crate::token::{Event, TokenSource};
use crate::value::Value;

/// Walks `src` against `schema`, producing a [`Value`] tree that mirrors the
/// schema's own shape.
///
/// This is the one entry point every format back-end drives: a `TokenSource`
/// impl does nothing but lex bytes into [`Event`]s, and this function is what
/// actually knows what a schema means.
pub fn decode(schema: &Schema, src: &mut dyn TokenSource<'_, Error = Error>) -> Result<Value, Error> {
    let event = src.next_event()?;
    let value = decode_node(event, schema.root(), src, schema)?;
    src.finish()?;
    Ok(value)
}

fn decode_node(
    event: Event<'_>,
    node: &SchemaNode,
    src: &mut dyn TokenSource<'_, Error = Error>,
    schema: &Schema,
) -> Result<Value, Error> {
    match node {
        SchemaNode::Scalar(t) => decode_scalar(event, *t, schema),
        SchemaNode::Array(dt) => match event {
            Event::SeqStart(_) => Ok(Value::Array(decode_array_value(event, *dt, src)?)),
            Event::MapStart(_) => Err(Error::map_as_type(dt.name())),
            _ => Err(Error::could_not_deserialize_as(dt.name())),
        },
        SchemaNode::Map(fields) => match event {
            Event::MapStart(_) => decode_map(fields, src, schema),
            Event::SeqStart(_) => Err(Error::sequence_as_map_of_arrays()),
            _ => Err(Error::could_not_deserialize_as("map")),
        },
        SchemaNode::SeqOfArrays(dtypes) => match event {
            Event::SeqStart(_) => decode_seq_of_arrays(dtypes, src),
            Event::MapStart(_) => Err(Error::map_as_sequence_of_arrays()),
            _ => Err(Error::could_not_deserialize_as("sequence of arrays")),
        },
        SchemaNode::SeqOfArraysTransposed(dtypes) => match event {
            Event::SeqStart(_) => decode_seq_of_arrays_transposed(dtypes, src),
            Event::MapStart(_) => Err(Error::map_as_sequence_of_arrays()),
            _ => Err(Error::could_not_deserialize_as("sequence of arrays")),
        },
        SchemaNode::SeqOfMapsTransposed(columns) => match event {
            Event::SeqStart(_) => decode_seq_of_maps_transposed(columns, src, schema),
            Event::MapStart(_) => Err(Error::map_as_sequence_of_arrays()),
            _ => Err(Error::could_not_deserialize_as("sequence of arrays")),
        },
    }
}

fn decode_scalar(event: Event<'_>, scalar: ScalarType, schema: &Schema) -> Result<Value, Error> {
    if let Event::MapStart(_) = event {
        return Err(Error::map_as_type(scalar.name()));
    }
    match scalar {
        ScalarType::Str => match event {
            Event::Str(s) => Ok(Value::ScalarStr(s.into_owned())),
            _ => Err(Error::could_not_deserialize_as(ScalarType::Str.name())),
        },
        ScalarType::Bool => match event {
            Event::Bool(b) => Ok(Value::ScalarBool(b)),
            _ => Err(Error::could_not_deserialize_as(ScalarType::Bool.name())),
        },
        ScalarType::IntGen => match event {
            Event::Int(i) => Ok(Value::ScalarInt(i)),
            Event::UInt(u) => Ok(Value::ScalarInt(u as i64)),
            _ => Err(Error::could_not_deserialize_as(ScalarType::IntGen.name())),
        },
        ScalarType::FloatGen => match event {
            Event::Float(f) => Ok(Value::ScalarFloat(f)),
            Event::Int(i) if schema.allow_int_to_float() => Ok(Value::ScalarFloat(i as f64)),
            Event::UInt(u) if schema.allow_int_to_float() => Ok(Value::ScalarFloat(u as f64)),
            _ => Err(Error::could_not_deserialize_as(ScalarType::FloatGen.name())),
        },
    }
}

/// Reads one map, dispatching each schema-named key to [`decode_node`] and
/// structurally skipping everything else. Output keys come back in
/// schema-declaration order, independent of the order keys appeared on the
/// wire.
fn decode_map(
    fields: &IndexMap<String, SchemaNode>,
    src: &mut dyn TokenSource<'_, Error = Error>,
    schema: &Schema,
) -> Result<Value, Error> {
    let mut seen: IndexMap<String, Value> = IndexMap::new();
    loop {
        match src.next_event()? {
            Event::MapEnd => break,
            Event::MapKey(key) => {
                let value_event = src.next_event()?;
                match fields.get(key.as_ref()) {
                    Some(node) => {
                        let value = decode_node(value_event, node, src, schema)?;
                        seen.insert(key.into_owned(), value);
                    }
                    None => skip_value(value_event, src)?,
                }
            }
            other => return Err(Error::could_not_deserialize_as(other.kind_name())),
        }
    }

    if schema.missing_key_policy() == MissingKeyPolicy::Strict {
        let missing: Vec<&str> = fields
            .keys()
            .filter(|k| !seen.contains_key(k.as_str()))
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            return Err(Error::keys_not_found(&missing));
        }
    }

    let ordered = fields
        .keys()
        .filter_map(|k| seen.shift_remove(k).map(|v| (k.clone(), v)))
        .collect();
    Ok(Value::Map(ordered))
}

/// Consumes exactly one complete value -- a scalar, or a balanced map/sequence
/// -- without interpreting it, for keys the schema doesn't mention.
fn skip_value(event: Event<'_>, src: &mut dyn TokenSource<'_, Error = Error>) -> Result<(), Error> {
    match event {
        Event::MapStart(_) => {
            let mut depth = 1usize;
            while depth > 0 {
                match src.next_event()? {
                    Event::MapStart(_) | Event::SeqStart(_) => depth += 1,
                    Event::MapEnd | Event::SeqEnd => depth -= 1,
                    Event::MapKey(_) => {}
                    _ => {}
                }
            }
            Ok(())
        }
        Event::SeqStart(_) => {
            let mut depth = 1usize;
            while depth > 0 {
                match src.next_event()? {
                    Event::MapStart(_) | Event::SeqStart(_) => depth += 1,
                    Event::MapEnd | Event::SeqEnd => depth -= 1,
                    _ => {}
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Builds one [`TypedBuffer`] from a (possibly nested) sequence, inferring
/// its shape from the nesting depth of the input rather than from the
/// schema, and rejecting any jagged dimension.
fn decode_array_value(
    event: Event<'_>,
    dt: DType,
    src: &mut dyn TokenSource<'_, Error = Error>,
) -> Result<TypedBuffer, Error> {
    let mut buf = TypedBuffer::new(dt);
    let shape = read_array_level(event, dt, &mut buf, src)?;
    buf.set_shape(shape);
    Ok(buf)
}

fn read_array_level(
    event: Event<'_>,
    dt: DType,
    buf: &mut TypedBuffer,
    src: &mut dyn TokenSource<'_, Error = Error>,
) -> Result<Vec<usize>, Error> {
    match event {
        Event::SeqStart(_) => {
            let mut count = 0usize;
            let mut child_shape: Option<Vec<usize>> = None;
            loop {
                let next = src.next_event()?;
                if next == Event::SeqEnd {
                    break;
                }
                let this_shape = read_array_level(next, dt, buf, src)?;
                count += 1;
                match &child_shape {
                    None => child_shape = Some(this_shape),
                    Some(expected) if *expected == this_shape => {}
                    Some(expected) => {
                        let mut full = vec![count];
                        full.extend(expected.iter().copied());
                        return Err(Error::irregular_shape(dt.name(), &full, buf.len()));
                    }
                }
            }
            let mut shape = vec![count];
            if let Some(child) = child_shape {
                shape.extend(child);
            }
            Ok(shape)
        }
        Event::MapStart(_) => Err(Error::map_as_type(dt.name())),
        other => {
            buf.push_event(&other)?;
            Ok(Vec::new())
        }
    }
}

/// Reads a sequence of `K` independent sub-sequences, the k-th expected to be
/// an `Array(dtypes[k])`. An input with fewer than `K` sub-sequences is a
/// `TypeError`; one with more silently ignores the extras.
fn decode_seq_of_arrays(
    dtypes: &[DType],
    src: &mut dyn TokenSource<'_, Error = Error>,
) -> Result<Value, Error> {
    let mut columns = Vec::with_capacity(dtypes.len());
    let mut index = 0usize;
    loop {
        let next = src.next_event()?;
        if next == Event::SeqEnd {
            break;
        }
        match dtypes.get(index) {
            Some(&dt) => columns.push(decode_array_value(next, dt, src)?),
            None => skip_value(next, src)?,
        }
        index += 1;
    }
    if index < dtypes.len() {
        return Err(Error::too_many_columns(dtypes.len(), index));
    }
    Ok(Value::ArrayList(columns))
}

/// Reads a sequence of rows, each row a sequence of `dtypes.len()` scalars,
/// and transposes it into `dtypes.len()` column buffers.
fn decode_seq_of_arrays_transposed(
    dtypes: &[DType],
    src: &mut dyn TokenSource<'_, Error = Error>,
) -> Result<Value, Error> {
    let mut columns: Vec<TypedBuffer> = dtypes.iter().map(|dt| TypedBuffer::new(*dt)).collect();
    let mut rows = 0usize;
    loop {
        let next = src.next_event()?;
        if next == Event::SeqEnd {
            break;
        }
        match next {
            Event::SeqStart(_) => {}
            Event::MapStart(_) => {
                let elements = join_dtype_names(dtypes);
                return Err(Error::invalid_type_map_expected_sequence(&elements));
            }
            other => return Err(Error::could_not_deserialize_as(other.kind_name())),
        }
        let mut col = 0usize;
        loop {
            let cell = src.next_event()?;
            if cell == Event::SeqEnd {
                break;
            }
            match columns.get_mut(col) {
                Some(buf) => buf.push_event(&cell)?,
                None => skip_value(cell, src)?,
            }
            col += 1;
        }
        if col < dtypes.len() {
            return Err(Error::too_many_columns(dtypes.len(), col));
        }
        rows += 1;
    }
    for col in &mut columns {
        col.set_shape(vec![rows]);
    }
    Ok(Value::ArrayList(columns))
}

/// Reads a sequence of maps sharing a key set, and transposes it into one
/// column buffer per schema-declared key.
fn decode_seq_of_maps_transposed(
    columns: &IndexMap<String, DType>,
    src: &mut dyn TokenSource<'_, Error = Error>,
    schema: &Schema,
) -> Result<Value, Error> {
    let mut buffers: IndexMap<&str, TypedBuffer> = columns
        .iter()
        .map(|(name, dt)| (name.as_str(), TypedBuffer::new(*dt)))
        .collect();
    let mut rows = 0usize;
    loop {
        let next = src.next_event()?;
        if next == Event::SeqEnd {
            break;
        }
        match next {
            Event::MapStart(_) => {}
            Event::SeqStart(_) => {
                let elements = join_column_names(columns);
                return Err(Error::invalid_type_sequence_expected_map(&elements));
            }
            other => return Err(Error::could_not_deserialize_as(other.kind_name())),
        }
        let mut row_seen: IndexMap<&str, ()> = IndexMap::new();
        loop {
            match src.next_event()? {
                Event::MapEnd => break,
                Event::MapKey(key) => {
                    let value_event = src.next_event()?;
                    match columns.keys().find(|name| name.as_str() == key.as_ref()) {
                        Some(name) => {
                            buffers.get_mut(name.as_str()).unwrap().push_event(&value_event)?;
                            row_seen.insert(name.as_str(), ());
                        }
                        None => skip_value(value_event, src)?,
                    }
                }
                other => return Err(Error::could_not_deserialize_as(other.kind_name())),
            }
        }
        if schema.missing_key_policy() == MissingKeyPolicy::Strict {
            let missing: Vec<&str> = columns
                .keys()
                .map(String::as_str)
                .filter(|k| !row_seen.contains_key(k))
                .collect();
            if !missing.is_empty() {
                return Err(Error::keys_not_found(&missing));
            }
        }
        rows += 1;
    }
    for buf in buffers.values_mut() {
        buf.set_shape(vec![rows]);
    }
    let ordered = columns
        .keys()
        .filter_map(|k| buffers.shift_remove(k.as_str()))
        .collect();
    Ok(Value::ArrayList(ordered))
}

fn join_dtype_names(dtypes: &[DType]) -> String {
    dtypes
        .iter()
        .map(|d| d.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_column_names(columns: &IndexMap<String, DType>) -> String {
    columns.keys().cloned().collect::<Vec<_>>().join(", ")
}
