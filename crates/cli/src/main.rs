//! Xelis Hash v3 CLI
//!
//! A small driver around `xelis-hash-core` for computing digests, checking
//! the crate against its golden vector, and measuring hashrate.
//!
//! # Commands
//!
//! - `hash` - Compute the digest of a 112-byte input
//! - `verify` - Check the all-zero golden vector against the built-in digest
//! - `bench` - Measure single- and multi-threaded hashrate

use clap::{Parser, Subcommand};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use xelis_hash_core::{Hasher, HASH_SIZE, INPUT_LEN};

const GOLDEN_INPUT: [u8; INPUT_LEN] = [0u8; INPUT_LEN];
const GOLDEN_DIGEST: [u8; HASH_SIZE] = [
    246, 164, 105, 223, 33, 5, 137, 118, 9, 126, 65, 99, 23, 148, 158, 172, 153, 51, 73, 14, 60,
    18, 210, 78, 33, 49, 119, 117, 22, 1, 101, 128,
];

#[derive(Parser)]
#[command(name = "xelis-hash")]
#[command(author = "Xelis Developers")]
#[command(version = "0.3.0")]
#[command(about = "Xelis Hash v3 reference driver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the digest of a 112-byte hex-encoded input
    Hash {
        /// Input as 224 hex characters (112 bytes). Defaults to all zeros.
        #[arg(long)]
        input: Option<String>,
    },

    /// Verify this build against the known all-zero golden vector
    Verify,

    /// Measure hashrate, single-threaded and across a worker pool
    Bench {
        /// Number of hashes per thread
        #[arg(short, long, default_value = "2000")]
        count: u32,

        /// Number of worker threads (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,
    },
}

#[derive(Debug, Error)]
enum HexInputError {
    #[error("input must be exactly {INPUT_LEN} bytes ({} hex characters), got {0} bytes", INPUT_LEN * 2)]
    WrongLength(usize),
    #[error("invalid hex string: {0}")]
    Decode(#[from] hex::FromHexError),
}

fn parse_input(input: &str) -> Result<[u8; INPUT_LEN], HexInputError> {
    let bytes = hex::decode(input)?;
    if bytes.len() != INPUT_LEN {
        return Err(HexInputError::WrongLength(bytes.len()));
    }
    let mut array = [0u8; INPUT_LEN];
    array.copy_from_slice(&bytes);
    Ok(array)
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Hash { input } => cmd_hash(input),
        Commands::Verify => cmd_verify(),
        Commands::Bench { count, threads } => cmd_bench(count, threads),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_hash(input: Option<String>) -> anyhow::Result<()> {
    let array = match input {
        Some(hex_str) => parse_input(&hex_str)?,
        None => GOLDEN_INPUT,
    };

    let mut hasher = Hasher::new();
    let digest = hasher.hash(&array);
    println!("{}", hex::encode(digest));

    Ok(())
}

fn cmd_verify() -> anyhow::Result<()> {
    let mut hasher = Hasher::new();
    let digest = hasher.hash(&GOLDEN_INPUT);

    if digest == GOLDEN_DIGEST {
        println!("OK: all-zero input hashes to {}", hex::encode(digest));
        Ok(())
    } else {
        anyhow::bail!(
            "golden vector mismatch: expected {}, got {}",
            hex::encode(GOLDEN_DIGEST),
            hex::encode(digest)
        );
    }
}

fn cmd_bench(count: u32, threads: Option<usize>) -> anyhow::Result<()> {
    println!("Single-threaded: {count} hashes...");

    let mut hasher = Hasher::new();
    let mut input = GOLDEN_INPUT;

    let start = Instant::now();
    for i in 0..count {
        input[..8].copy_from_slice(&(i as u64).to_le_bytes());
        let _ = hasher.hash(&input);
    }
    let elapsed = start.elapsed();
    let hashrate = count as f64 / elapsed.as_secs_f64();

    println!("  Time:     {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate: {hashrate:.2} H/s");

    let num_threads = threads.unwrap_or_else(num_cpus::get);
    println!("\nMulti-threaded: {num_threads} workers x {count} hashes each...");

    // One independently-owned Hasher per worker, no shared state beyond an
    // atomic counter: mirrors the reference harness's per-thread scratch
    // buffers, adapted to safe Rust (no CPU-affinity pinning).
    let total_hashes = Arc::new(AtomicU64::new(0));
    let start = Instant::now();

    let handles: Vec<_> = (0..num_threads)
        .map(|thread_id| {
            let total_hashes = Arc::clone(&total_hashes);
            std::thread::spawn(move || {
                let mut hasher = Hasher::new();
                let mut input = GOLDEN_INPUT;
                for i in 0..count {
                    let nonce = (thread_id as u64) | ((i as u64) << 32);
                    input[..8].copy_from_slice(&nonce.to_le_bytes());
                    let _ = hasher.hash(&input);
                    total_hashes.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    for handle in handles {
        let _ = handle.join();
    }

    let elapsed = start.elapsed();
    let hashes = total_hashes.load(Ordering::Relaxed);
    let hashrate = hashes as f64 / elapsed.as_secs_f64();

    println!("  Total hashes: {hashes}");
    println!("  Time:         {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate:     {hashrate:.2} H/s");

    Ok(())
}
