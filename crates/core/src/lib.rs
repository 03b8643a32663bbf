//! # Xelis Hash v3
//!
//! A memory-hard, ASIC-resistant proof-of-work hash: 112 bytes of input in,
//! 32 bytes of digest out, driven by a fixed 543,744-byte scratch buffer
//! that every correct implementation must mutate bit-for-bit identically.
//!
//! ## Pipeline
//!
//! ```text
//! input[112] -> stage1 (fill) -> scratch[543744B] -> stage3 (mix, in place) -> stage4 (BLAKE3) -> hash[32]
//! ```
//!
//! Stage 1 expands the input into the scratch buffer with four chained
//! ChaCha8 streams; Stage 3 performs two passes of a data-dependent,
//! sequential mixing loop over the buffer; Stage 4 is a single BLAKE3 call
//! over the final buffer contents. There is no "Stage 2" — the gap in the
//! numbering is inherited from the reference implementation.
//!
//! ## Example
//!
//! ```rust
//! use xelis_hash_core::Hasher;
//!
//! let mut hasher = Hasher::new();
//! let digest = hasher.hash(&[0u8; 112]);
//! assert_eq!(digest.len(), 32);
//! ```
//!
//! ## `no_std` support
//!
//! The mixing core itself (`stage1`, `stage3`, `stage4`) only needs a
//! caller-provided buffer and performs no allocation. [`Hasher`], which owns
//! its scratch buffer, requires the `alloc` crate outside of `std` builds:
//!
//! ```toml
//! [dependencies]
//! xelis-hash-core = { version = "0.3", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;
#[cfg(feature = "std")]
use std::boxed::Box;

mod params;
mod primitives;
mod stage1;
mod stage3;

#[cfg(feature = "std")]
mod ffi;

pub use params::*;

#[cfg(test)]
mod tests;

/// Compute Stage 4: BLAKE3 over the full scratch buffer.
fn finalize(scratch_bytes: &[u8]) -> [u8; HASH_SIZE] {
    *blake3::hash(scratch_bytes).as_bytes()
}

/// Run the full pipeline over a caller-owned scratch buffer.
///
/// `scratch` must contain exactly [`MEMSIZE`] words; Stage 1 overwrites
/// every byte before Stage 3 reads any of it, so the buffer's prior
/// contents never affect the result.
pub fn hash_with_scratch(input: &[u8; INPUT_LEN], scratch: &mut [u64; MEMSIZE]) -> [u8; HASH_SIZE] {
    // SAFETY: `[u64; MEMSIZE]` and `[u8; OUTPUT_SIZE]` have identical size
    // and alignment requirements are satisfied (u8 has none); this view is
    // only ever read/written through `scratch` or through this byte slice,
    // never both at once within a call.
    let bytes = unsafe {
        core::slice::from_raw_parts_mut(scratch.as_mut_ptr() as *mut u8, OUTPUT_SIZE)
    };
    stage1::fill(input, bytes);
    stage3::mix(scratch);
    let bytes = unsafe {
        core::slice::from_raw_parts(scratch.as_ptr() as *const u8, OUTPUT_SIZE)
    };
    finalize(bytes)
}

/// Owns one heap-allocated scratch buffer and reuses it across calls to
/// [`Hasher::hash`], avoiding the repeated 543KB allocation that a
/// free-function `hash(input)` would otherwise pay on every call.
pub struct Hasher {
    scratch: Box<[u64; MEMSIZE]>,
}

impl Hasher {
    /// Allocate a new hasher with a zeroed scratch buffer.
    pub fn new() -> Self {
        Self {
            scratch: Box::new([0u64; MEMSIZE]),
        }
    }

    /// Hash `input`, reusing this hasher's scratch buffer.
    pub fn hash(&mut self, input: &[u8; INPUT_LEN]) -> [u8; HASH_SIZE] {
        hash_with_scratch(input, &mut self.scratch)
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience one-shot hash: allocates a fresh scratch buffer, hashes, and
/// discards it. Prefer [`Hasher`] when computing more than one hash.
pub fn hash(input: &[u8; INPUT_LEN]) -> [u8; HASH_SIZE] {
    Hasher::new().hash(input)
}
