//! Stage 1 — expand the 112-byte input into the full scratch buffer.
//!
//! Four ChaCha8 streams are chained together, each keyed by a BLAKE3 digest
//! derived from the previous stream's key and a 32-byte chunk of the raw
//! input. The first stream's nonce comes from `BLAKE3(input)`; every later
//! stream reuses the last 12 bytes the previous stream wrote.

use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha8;

use crate::params::{CHUNKS, CHUNK_SIZE, INPUT_LEN, NONCE_SIZE, OUTPUT_SIZE};

/// Fill `scratch` (exactly `OUTPUT_SIZE` bytes) from `input` (exactly
/// `INPUT_LEN` bytes).
pub fn fill(input: &[u8; INPUT_LEN], scratch: &mut [u8]) {
    debug_assert_eq!(scratch.len(), OUTPUT_SIZE);

    let mut key = [0u8; CHUNK_SIZE * CHUNKS];
    key[..INPUT_LEN].copy_from_slice(input);

    let mut buffer = [0u8; CHUNK_SIZE * 2];
    buffer[..CHUNK_SIZE].copy_from_slice(blake3::hash(input).as_bytes());

    let slice_len = OUTPUT_SIZE / CHUNKS;
    let mut offset = 0usize;

    for chunk in 0..CHUNKS {
        buffer[CHUNK_SIZE..].copy_from_slice(&key[chunk * CHUNK_SIZE..(chunk + 1) * CHUNK_SIZE]);
        let input_hash = blake3::hash(&buffer);

        let nonce: [u8; NONCE_SIZE] = if chunk == 0 {
            buffer[..NONCE_SIZE].try_into().unwrap()
        } else {
            scratch[offset - NONCE_SIZE..offset].try_into().unwrap()
        };

        let out = &mut scratch[offset..offset + slice_len];
        out.fill(0);
        ChaCha8::new(input_hash.as_bytes().into(), &nonce.into()).apply_keystream(out);

        buffer[..CHUNK_SIZE].copy_from_slice(input_hash.as_bytes());
        offset += slice_len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_deterministic() {
        let input = [7u8; INPUT_LEN];
        let mut a = vec![0u8; OUTPUT_SIZE];
        let mut b = vec![0u8; OUTPUT_SIZE];
        fill(&input, &mut a);
        fill(&input, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn fill_overwrites_every_byte() {
        let input = [0u8; INPUT_LEN];
        let mut scratch = vec![0xAAu8; OUTPUT_SIZE];
        fill(&input, &mut scratch);
        // A zero input still produces a non-trivial keystream; the buffer
        // should not be left at its sentinel fill value.
        assert!(scratch.iter().any(|&b| b != 0xAA));
    }

    #[test]
    fn fill_differs_on_different_input() {
        let mut a = vec![0u8; OUTPUT_SIZE];
        let mut b = vec![0u8; OUTPUT_SIZE];
        fill(&[0u8; INPUT_LEN], &mut a);
        fill(&[1u8; INPUT_LEN], &mut b);
        assert_ne!(a, b);
    }
}
