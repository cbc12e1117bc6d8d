//! Benchmark suite for the chunked sprite codec
//!
//! Measures `encode_image`/`decode_image` across the short/long chunk-length
//! and row-offset-width regime boundaries (§4.2).
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use yagl_benches::{generate_test_pixels, sizes};
use yagl_core::chunk::{decode_image, encode_image};

const BPP: usize = 5;
const ALPHA_TEST_OFFSET: usize = 3;

fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("chunk_encode");

	let cases = [
		("tiny", sizes::TINY),
		("small", sizes::SMALL),
		("medium_boundary", sizes::MEDIUM),
		("large", sizes::LARGE),
	];

	for (name, (width, height)) in cases {
		let pixels = generate_test_pixels(width, height, 4);
		group.throughput(Throughput::Bytes(pixels.len() as u64));
		group.bench_with_input(BenchmarkId::new("encode", name), &pixels, |b, pixels| {
			b.iter(|| black_box(encode_image(black_box(pixels), width, height, BPP, ALPHA_TEST_OFFSET)));
		});
	}

	group.finish();
}

fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("chunk_decode");

	let cases = [
		("tiny", sizes::TINY),
		("small", sizes::SMALL),
		("medium_boundary", sizes::MEDIUM),
		("large", sizes::LARGE),
	];

	for (name, (width, height)) in cases {
		let pixels = generate_test_pixels(width, height, 4);
		let chunked = encode_image(&pixels, width, height, BPP, ALPHA_TEST_OFFSET);

		group.throughput(Throughput::Bytes(chunked.len() as u64));
		group.bench_with_input(BenchmarkId::new("decode", name), &chunked, |b, chunked| {
			b.iter(|| black_box(decode_image(black_box(chunked), width, height, BPP)));
		});
	}

	group.finish();
}

/// Benchmarks a fully-transparent sprite, the cheapest case for both directions.
fn bench_fully_transparent(c: &mut Criterion) {
	let mut group = c.benchmark_group("chunk_fully_transparent");
	let (width, height) = sizes::LARGE;
	let pixels = vec![0u8; usize::from(width) * usize::from(height) * BPP];

	group.bench_function("encode", |b| {
		b.iter(|| black_box(encode_image(black_box(&pixels), width, height, BPP, ALPHA_TEST_OFFSET)));
	});

	let chunked = encode_image(&pixels, width, height, BPP, ALPHA_TEST_OFFSET);
	group.bench_function("decode", |b| {
		b.iter(|| black_box(decode_image(black_box(&chunked), width, height, BPP)));
	});

	group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_fully_transparent);
criterion_main!(benches);
