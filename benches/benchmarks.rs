//! Benchmarks for binary64 formatting and parsing.

use binary64_rs::{decode, encode, format_into, parse, MAX_FORMAT_LEN};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn generate_bit_patterns(size: usize) -> Vec<u64> {
    (0..size)
        .map(|i| {
            let base = (i as f64) / 100.0;
            (base + (i as f64 * 0.001).sin() * 10.0).to_bits()
        })
        .collect()
}

fn generate_literals(size: usize) -> Vec<String> {
    generate_bit_patterns(size)
        .into_iter()
        .map(binary64_rs::format)
        .collect()
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    for size in [1000, 10000, 100000] {
        let data = generate_bit_patterns(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            let mut buf = [0u8; MAX_FORMAT_LEN];
            b.iter(|| {
                let mut total = 0usize;
                for &bits in data {
                    total += format_into(black_box(bits), &mut buf);
                }
                total
            })
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [1000, 10000, 100000] {
        let literals = generate_literals(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &literals,
            |b, literals| {
                b.iter(|| {
                    let mut acc = 0u64;
                    for text in literals {
                        acc ^= parse(black_box(text)).unwrap().bits;
                    }
                    acc
                })
            },
        );
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for size in [1000, 10000, 100000] {
        let data = generate_bit_patterns(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut acc = 0u64;
                for &bits in data {
                    acc ^= decode(black_box(bits)).significand;
                }
                acc
            })
        });
    }

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for size in [1000, 10000, 100000] {
        let components: Vec<_> = generate_bit_patterns(size).iter().map(|&b| decode(b)).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &components,
            |b, components| {
                b.iter(|| {
                    let mut acc = 0u64;
                    for dec in components {
                        acc ^= encode(black_box(dec)).unwrap();
                    }
                    acc
                })
            },
        );
    }

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    for size in [1000, 10000, 100000] {
        let data = generate_bit_patterns(size);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            let mut buf = [0u8; MAX_FORMAT_LEN];
            b.iter(|| {
                let mut acc = 0u64;
                for &bits in data {
                    let len = format_into(black_box(bits), &mut buf);
                    let text = std::str::from_utf8(&buf[..len]).unwrap();
                    acc ^= parse(text).unwrap().bits;
                }
                acc
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_format,
    bench_parse,
    bench_decode,
    bench_encode,
    bench_roundtrip
);
criterion_main!(benches);
