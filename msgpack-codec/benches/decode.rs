use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use numshape_core::{decode, DType, Schema, SchemaSpec};
use numshape_msgpack::MsgpackTokenSource;

fn encode_float_array(name: &str, values: &[f64]) -> Vec<u8> {
    let mut out = vec![0x81];
    out.push(0xa0 | name.len() as u8);
    out.extend_from_slice(name.as_bytes());
    out.push(0xdc); // array16
    out.extend_from_slice(&(values.len() as u16).to_be_bytes());
    for v in values {
        out.push(0xcb); // f64
        out.extend_from_slice(&v.to_be_bytes());
    }
    out
}

fn bench_numeric_array(c: &mut Criterion) {
    let schema = Schema::from(SchemaSpec::map([("values", SchemaSpec::array(DType::F64))])).unwrap();
    let values: Vec<f64> = (0..1024).map(|i| i as f64 * 0.5).collect();
    let bytes = encode_float_array("values", &values);
    let mut group = c.benchmark_group("decode_numeric_array");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("msgpack", |b| {
        b.iter(|| {
            let mut src = MsgpackTokenSource::new(black_box(bytes.as_slice()));
            black_box(decode(&schema, &mut src).unwrap());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_numeric_array);
criterion_main!(benches);
