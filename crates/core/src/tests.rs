//! End-to-end tests over the public API: golden vector, avalanche effect,
//! and the determinism/reuse properties a memory-hard hash must hold.

use crate::{hash, Hasher, HASH_SIZE, INPUT_LEN};

/// All-zero input must produce this exact digest. This is the one fixed
/// point every reimplementation of the algorithm is checked against.
const GOLDEN_INPUT: [u8; INPUT_LEN] = [0u8; INPUT_LEN];
const GOLDEN_DIGEST: [u8; HASH_SIZE] = [
    246, 164, 105, 223, 33, 5, 137, 118, 9, 126, 65, 99, 23, 148, 158, 172, 153, 51, 73, 14, 60,
    18, 210, 78, 33, 49, 119, 117, 22, 1, 101, 128,
];

#[test]
fn golden_vector() {
    assert_eq!(hash(&GOLDEN_INPUT), GOLDEN_DIGEST);
}

#[test]
fn golden_vector_via_reused_hasher() {
    let mut hasher = Hasher::new();
    assert_eq!(hasher.hash(&GOLDEN_INPUT), GOLDEN_DIGEST);
}

#[test]
fn hashing_twice_without_clearing_is_deterministic() {
    // Stage 1 must overwrite every byte of the scratch buffer, so a second
    // call on a dirtied-but-reused Hasher must match a call on a fresh one.
    let mut hasher = Hasher::new();
    let _ = hasher.hash(&[0xFFu8; INPUT_LEN]);
    let reused = hasher.hash(&GOLDEN_INPUT);
    assert_eq!(reused, GOLDEN_DIGEST);
}

#[test]
fn single_bit_flip_changes_digest() {
    let mut flipped = GOLDEN_INPUT;
    flipped[0] ^= 0x01;
    assert_ne!(hash(&flipped), GOLDEN_DIGEST);
}

#[test]
fn last_byte_flip_changes_digest() {
    let mut flipped = GOLDEN_INPUT;
    flipped[INPUT_LEN - 1] ^= 0x80;
    assert_ne!(hash(&flipped), GOLDEN_DIGEST);
}

#[test]
fn concurrent_hashers_agree() {
    use std::thread;

    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| hash(&GOLDEN_INPUT)))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), GOLDEN_DIGEST);
    }
}

/// A simple xorshift64 PRNG so the avalanche test has reproducible inputs
/// without pulling in a `rand` dependency.
fn xorshift64(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

fn random_input(state: &mut u64) -> [u8; INPUT_LEN] {
    let mut bytes = [0u8; INPUT_LEN];
    for chunk in bytes.chunks_mut(8) {
        let word = xorshift64(state).to_le_bytes();
        chunk.copy_from_slice(&word[..chunk.len()]);
    }
    bytes
}

fn hamming_distance(a: &[u8; HASH_SIZE], b: &[u8; HASH_SIZE]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

#[test]
fn avalanche_effect_over_random_inputs() {
    let mut state = 0x9e3779b97f4a7c15u64;
    let total_bits = (HASH_SIZE * 8) as u32;

    for _ in 0..100 {
        let base = random_input(&mut state);
        let mut flipped = base;
        flipped[0] ^= 0x01;

        let d1 = hash(&base);
        let d2 = hash(&flipped);
        let bits = hamming_distance(&d1, &d2);

        // A well-mixed 256-bit digest should flip roughly half its bits;
        // allow a wide margin since this checks a handful of samples, not
        // a full statistical test suite.
        assert!(
            (90..=166).contains(&bits),
            "single-bit input flip only changed {bits}/{total_bits} output bits"
        );
    }
}

#[test]
fn avalanche_between_unrelated_inputs() {
    let mut state = 0xdead_beef_cafe_babeu64;
    let a = random_input(&mut state);
    let b = random_input(&mut state);

    let differing_input_bits: u32 = a
        .iter()
        .zip(&b)
        .map(|(x, y)| (x ^ y).count_ones())
        .sum();
    assert!(differing_input_bits >= 64);

    let bits = hamming_distance(&hash(&a), &hash(&b));
    assert!((90..=166).contains(&bits));
}

/// Not run by default (slow): `cargo test -- --ignored timing_breakdown`.
#[test]
#[ignore]
fn timing_breakdown() {
    use std::time::Instant;

    let mut hasher = Hasher::new();
    let iterations = 50;

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = hasher.hash(&GOLDEN_INPUT);
    }
    let total = start.elapsed();

    println!(
        "{iterations} hashes in {:.3}s ({:.1} hashes/s)",
        total.as_secs_f64(),
        iterations as f64 / total.as_secs_f64()
    );
}
