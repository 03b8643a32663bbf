//! Xelis Hash v3 algorithm parameters
//!
//! Every parameter is fixed by the algorithm; there is nothing here a
//! caller can tune.

/// Length of the hash input, in bytes.
pub const INPUT_LEN: usize = 112;

/// Length of the output digest, in bytes.
pub const HASH_SIZE: usize = 32;

/// Number of 64-bit words in the scratch buffer (531 * 128).
pub const MEMSIZE: usize = 531 * 128;

/// Number of 64-bit words in one half (`A` or `B`) of the scratch buffer.
pub const BUFSIZE: usize = MEMSIZE / 2;

/// Scratch buffer size in bytes.
pub const OUTPUT_SIZE: usize = MEMSIZE * 8;

/// Size of one BLAKE3 digest / key chunk used during Stage 1.
pub const CHUNK_SIZE: usize = 32;

/// ChaCha8 nonce length, in bytes.
pub const NONCE_SIZE: usize = 12;

/// Number of ChaCha8 streams chained together to fill the scratch buffer.
pub const CHUNKS: usize = 4;

/// Number of outer mixing iterations in Stage 3.
pub const ITERS: u64 = 2;

/// Single AES round key used by the Stage 3 mixing step.
pub const AES_KEY: [u8; 16] = *b"xelishash-pow-v3";
