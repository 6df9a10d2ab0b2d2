//! Benchmark comparing decompression throughput across the supported codecs.
//!
//! Payloads imitate a data page: runs of repeated tokens mixed with random
//! bytes so each codec gets a realistic (not degenerate) compression ratio.

use bytes::Bytes;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pagestream_codec::{Compression, compress, decompress};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

const PAGE_SIZE: usize = 1 << 20;

/// Half-compressible synthetic page payload.
fn generate_page(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        if rng.random_bool(0.5) {
            data.extend_from_slice(b"dictionary-coded-value-run/");
        } else {
            data.push(rng.random::<u8>());
        }
    }
    data.truncate(len);
    data
}

fn bench_decompress(c: &mut Criterion) {
    let plaintext = generate_page(PAGE_SIZE);
    let codecs = [
        Compression::Uncompressed,
        Compression::Snappy,
        Compression::Gzip,
        Compression::Lz4Raw,
        Compression::Zstd,
    ];

    let mut group = c.benchmark_group("decompress_1mib_page");
    group.throughput(Throughput::Bytes(PAGE_SIZE as u64));
    for codec in codecs {
        let compressed = Bytes::from(compress(codec, &plaintext).unwrap());
        group.bench_with_input(
            BenchmarkId::from_parameter(codec),
            &compressed,
            |b, compressed| {
                b.iter(|| {
                    let out = decompress(codec, black_box(compressed), PAGE_SIZE).unwrap();
                    black_box(out);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_decompress);
criterion_main!(benches);
