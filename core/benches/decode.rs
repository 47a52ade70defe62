use std::borrow::Cow;
use std::collections::VecDeque;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use numshape_core::{decode, DType, Error, Event, Schema, SchemaSpec, ScalarType, TokenSource};

struct VecSource<'a> {
    events: VecDeque<Event<'a>>,
}

impl<'a> VecSource<'a> {
    fn new(events: Vec<Event<'a>>) -> Self {
        VecSource {
            events: events.into(),
        }
    }
}

impl<'a> TokenSource<'a> for VecSource<'a> {
    type Error = Error;

    fn next_event(&mut self) -> Result<Event<'a>, Error> {
        self.events
            .pop_front()
            .ok_or_else(|| Error::Parse("unexpected end of input".to_string()))
    }

    fn finish(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

fn flat_events(rows: usize) -> Vec<Event<'static>> {
    let mut events = vec![Event::MapStart(Some(1)), Event::MapKey(Cow::Borrowed("values"))];
    events.push(Event::SeqStart(Some(rows)));
    for i in 0..rows {
        events.push(Event::Float(i as f64));
    }
    events.push(Event::SeqEnd);
    events.push(Event::MapEnd);
    events
}

fn bench_array_decode(c: &mut Criterion) {
    let schema = Schema::from(SchemaSpec::map([("values", SchemaSpec::array(DType::F64))])).unwrap();
    let mut group = c.benchmark_group("decode_array");
    for rows in [16usize, 1024, 65536] {
        let events = flat_events(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_function(format!("{rows}_elements"), |b| {
            b.iter(|| {
                let mut src = VecSource::new(events.clone());
                black_box(decode(&schema, &mut src).unwrap());
            });
        });
    }
    group.finish();
}

fn bench_scalar_map(c: &mut Criterion) {
    let schema = Schema::from(SchemaSpec::map([
        ("a", SchemaSpec::scalar(ScalarType::IntGen)),
        ("b", SchemaSpec::scalar(ScalarType::Str)),
    ]))
    .unwrap();
    let events = vec![
        Event::MapStart(Some(2)),
        Event::MapKey(Cow::Borrowed("a")),
        Event::Int(42),
        Event::MapKey(Cow::Borrowed("b")),
        Event::Str(Cow::Borrowed("hello")),
        Event::MapEnd,
    ];
    c.bench_function("decode_scalar_map", |b| {
        b.iter(|| {
            let mut src = VecSource::new(events.clone());
            black_box(decode(&schema, &mut src).unwrap());
        });
    });
}

criterion_group!(benches, bench_array_decode, bench_scalar_map);
criterion_main!(benches);
