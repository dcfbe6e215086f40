//! Binary protocol benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ironidl_bench::protocol::{encode_sample, sum_sample, write_sample};
use ironidl_core::{
    BinaryInput, BinaryOutput, InputProtocol, MessageHeader, MessageKind, OutputProtocol,
    WireKind,
};
use std::hint::black_box;

fn benchmark_message_header(c: &mut Criterion) {
    let header = MessageHeader::new("calculate", MessageKind::Call, 7);
    let mut output = BinaryOutput::with_capacity(64);

    c.bench_function("message_header_encode", |b| {
        b.iter(|| {
            output.write_message_begin(black_box(&header)).unwrap();
            black_box(output.take())
        })
    });

    output.write_message_begin(&header).unwrap();
    let encoded = output.take();
    c.bench_function("message_header_decode", |b| {
        b.iter(|| {
            let mut input = BinaryInput::new(black_box(encoded.clone()));
            input.read_message_begin().unwrap()
        })
    });
}

fn benchmark_struct_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("struct_encode");
    for len in [16usize, 256, 4096] {
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            let mut output = BinaryOutput::with_capacity(len * 4 + 64);
            b.iter(|| {
                write_sample(&mut output, black_box(len)).unwrap();
                black_box(output.take())
            })
        });
    }
    group.finish();
}

fn benchmark_struct_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("struct_decode");
    for len in [16usize, 256, 4096] {
        let data = encode_sample(len).unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &data, |b, data| {
            b.iter(|| sum_sample(black_box(data.clone())).unwrap())
        });
    }
    group.finish();
}

fn benchmark_skip(c: &mut Criterion) {
    let data = encode_sample(256).unwrap();
    c.bench_function("skip_struct_256", |b| {
        b.iter(|| {
            let mut input = BinaryInput::new(black_box(data.clone()));
            input.skip(WireKind::Struct).unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_message_header,
    benchmark_struct_encode,
    benchmark_struct_decode,
    benchmark_skip,
);
criterion_main!(benches);
