use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use attachview::export::codec::{self, DEFAULT_CHUNK_SIZE};

/// Pseudo-random payload so the encoder sees every byte value.
fn payload(len: usize) -> Vec<u8> {
    let mut state = 0x2545_f491_u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let bytes = payload(1 << 20);
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("1MiB", |b| b.iter(|| codec::encode(&bytes)));
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let encoded = codec::encode(&payload(1 << 20));
    let mut group = c.benchmark_group("decode_blob");
    group.throughput(Throughput::Bytes(encoded.len() as u64));
    for chunk in [DEFAULT_CHUNK_SIZE, 64 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| codec::decode_blob(&encoded, "application/pdf", chunk).unwrap())
        });
    }
    group.finish();
}

fn bench_decode_wrapped(c: &mut Criterion) {
    // MIME-style 76 column line wrapping.
    let encoded = codec::encode(&payload(256 * 1024));
    let wrapped: String = encoded
        .as_bytes()
        .chunks(76)
        .map(|line| format!("{}\r\n", String::from_utf8_lossy(line)))
        .collect();

    c.bench_function("decode_wrapped_256KiB", |b| {
        b.iter(|| codec::decode(&wrapped, DEFAULT_CHUNK_SIZE).unwrap())
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_decode_wrapped);
criterion_main!(benches);
