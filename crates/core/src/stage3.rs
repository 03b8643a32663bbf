//! Stage 3 — the memory-hard mixing loop.
//!
//! Two outer iterations, each driving a `BUFSIZE`-step inner loop that reads
//! and writes two halves (`A`, `B`) of the scratch buffer through
//! data-dependent indices. This is the part of the algorithm where every
//! operator's exact semantics (wrapping arithmetic, rotation amount
//! normalization, 128-bit truncation) has to match the reference bit for
//! bit — see `spec.md` §4.2 and §9 for the authoritative operator list.

use crate::params::{AES_KEY, BUFSIZE, ITERS, MEMSIZE};
use crate::primitives::{
    aes_single_round, combine, isqrt, map_index, modular_power, pick_half, rotl, rotr, udiv,
};

/// Mutate `scratch` (exactly `MEMSIZE` words) in place.
pub fn mix(scratch: &mut [u64]) {
    debug_assert_eq!(scratch.len(), MEMSIZE);

    let (a_init, b_init) = scratch.split_at(BUFSIZE);
    let mut addr_a = b_init[BUFSIZE - 1];
    let mut addr_b = a_init[BUFSIZE - 1] >> 32;
    let mut r: u32 = 0;

    for i in 0..ITERS {
        let mem_a = scratch[(addr_a % BUFSIZE as u64) as usize];
        let mem_b = scratch[BUFSIZE + (addr_b % BUFSIZE as u64) as usize];

        let mut block = [0u8; 16];
        block[0..8].copy_from_slice(&mem_b.to_le_bytes());
        block[8..16].copy_from_slice(&mem_a.to_le_bytes());
        aes_single_round(&mut block, &AES_KEY);

        let hash1 = u64::from_le_bytes(block[0..8].try_into().unwrap());
        let hash2 = u64::from_le_bytes(block[8..16].try_into().unwrap());
        let mut result = !(hash1 ^ hash2);

        for j in 0..BUFSIZE as u64 {
            let a = scratch[map_index(result) as usize];
            let b = scratch[BUFSIZE + map_index(!rotr(result, r)) as usize];
            // `scratch` is a flat MEMSIZE array with A at [0, BUFSIZE) and B
            // at [BUFSIZE, MEMSIZE), so a single index covers both halves.
            let c = scratch[r as usize];
            r = if (r as usize) < MEMSIZE - 1 { r + 1 } else { 0 };

            let op = rotl(result, c as u32) & 0xF;
            let v = eval_opcode(op, a, b, c, result, r, i, j);

            let idx_seed = v ^ result;
            result = rotl(idx_seed, r);

            let use_b = pick_half(v);
            let idx_t = map_index(idx_seed) as usize;
            let t = (if use_b {
                scratch[BUFSIZE + idx_t]
            } else {
                scratch[idx_t]
            }) ^ result;

            let idx_a = map_index(t ^ result ^ 0x9e3779b97f4a7c15) as usize;
            let idx_b = map_index(idx_a as u64 ^ !result ^ 0xd2b74407b1ce6e93) as usize;

            let prev_a = scratch[idx_a];
            scratch[idx_a] = t;
            scratch[BUFSIZE + idx_b] ^= prev_a ^ rotr(t, ((i + j) & 63) as u32);
        }

        addr_a = modular_power(addr_a, addr_b, result);
        addr_b = isqrt(result)
            .wrapping_mul(r as u64 + 1)
            .wrapping_mul(isqrt(addr_a));
    }
}

/// Dispatch on the 4-bit opcode and compute the inner-loop value `v`.
///
/// `a`/`b`/`c` are the three operands read from the scratch buffer this
/// step; `result` and `r` are the live mixing state; `i`/`j` are the outer
/// and inner loop counters (zero-extended to 64 bits).
#[allow(clippy::too_many_arguments)]
#[inline]
fn eval_opcode(op: u64, a: u64, b: u64, c: u64, result: u64, r: u32, i: u64, j: u64) -> u64 {
    match op {
        0 => {
            let t1 = combine(a.wrapping_add(i), isqrt(b.wrapping_add(j)));
            let denom = crate::primitives::murmurhash3(c ^ result ^ i ^ j) | 1;
            (t1 % denom as u128) as u64
        }
        1 => {
            let inner = rotl(
                (c.wrapping_add(i)) % isqrt(b | 2),
                ((i.wrapping_add(j)) & 63) as u32,
            );
            inner.wrapping_mul(isqrt(a.wrapping_add(j)))
        }
        2 => (isqrt(a.wrapping_add(i)).wrapping_mul(isqrt(c.wrapping_add(j)))) ^ (b.wrapping_add(i).wrapping_add(j)),
        3 => a.wrapping_add(b).wrapping_mul(c),
        4 => b.wrapping_sub(c).wrapping_mul(a),
        5 => c.wrapping_sub(a).wrapping_add(b),
        6 => a.wrapping_sub(b).wrapping_add(c),
        7 => b.wrapping_mul(c).wrapping_add(a),
        8 => c.wrapping_mul(a).wrapping_add(b),
        9 => a.wrapping_mul(b).wrapping_mul(c),
        10 => {
            let t1 = combine(a, b);
            (t1 % (c | 1) as u128) as u64
        }
        11 => {
            let t1 = combine(b, c);
            let t2 = combine(rotl(result, r), a | 2);
            if t2 > t1 {
                c
            } else {
                (t1 % t2) as u64
            }
        }
        12 => udiv(c, a, b | 4),
        13 => {
            let t1 = combine(rotl(result, r), b);
            let t2 = combine(a, c | 8);
            if t1 > t2 {
                (t1 / t2) as u64
            } else {
                a ^ b
            }
        }
        14 => ((combine(b, a).wrapping_mul(c as u128)) >> 64) as u64,
        15 => {
            let t1 = combine(a, c);
            let t2 = combine(rotr(result, r), b);
            ((t1.wrapping_mul(t2)) >> 64) as u64
        }
        _ => unreachable!("opcode is masked to 4 bits"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MEMSIZE;

    #[test]
    fn mix_does_not_resize_scratch() {
        let mut scratch = vec![0u64; MEMSIZE];
        mix(&mut scratch);
        assert_eq!(scratch.len(), MEMSIZE);
    }

    #[test]
    fn mix_is_deterministic() {
        let mut a = vec![3u64; MEMSIZE];
        let mut b = vec![3u64; MEMSIZE];
        mix(&mut a);
        mix(&mut b);
        assert_eq!(a, b);
    }
}
