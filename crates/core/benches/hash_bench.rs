//! Benchmark for the Xelis Hash v3 pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xelis_hash_core::Hasher;

fn bench_hash(c: &mut Criterion) {
    let mut hasher = Hasher::new();
    let input = [0x5au8; 112];

    c.bench_function("xelis_hash_v3", |b| b.iter(|| hasher.hash(black_box(&input))));
}

fn bench_hash_varying_input(c: &mut Criterion) {
    let mut hasher = Hasher::new();

    c.bench_function("xelis_hash_v3_varying", |b| {
        let mut nonce: u64 = 0;
        b.iter(|| {
            let mut input = [0u8; 112];
            input[..4].copy_from_slice(b"seed");
            input[4..12].copy_from_slice(&nonce.to_le_bytes());
            nonce = nonce.wrapping_add(1);
            hasher.hash(black_box(&input))
        })
    });
}

criterion_group!(benches, bench_hash, bench_hash_varying_input);
criterion_main!(benches);
