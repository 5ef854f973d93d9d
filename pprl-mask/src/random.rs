// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Seeded randomness.
//!
//! `XorShiftRng` is the single PRNG behind every seeded operation in this
//! crate. The algorithm is fixed by the pinned `rand_xorshift` version and
//! `seed_from_u64` expansion is fixed by `rand_core` (SplitMix64), so equal
//! seeds produce equal bit sequences on every host. Ranged draws always
//! sample `u64`, never `usize`, so 32-bit and 64-bit hosts agree too.

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

pub(crate) fn rng_from_u64(seed: u64) -> XorShiftRng {
	XorShiftRng::seed_from_u64(seed)
}

/// Seeds an RNG from the head of a digest stream. Streams shorter than the
/// 16-byte state are zero-extended; longer streams are truncated.
pub(crate) fn rng_from_bytes(stream: &[u8]) -> XorShiftRng {
	let mut seed = [0u8; 16];
	let n = stream.len().min(16);
	seed[..n].copy_from_slice(&stream[..n]);
	XorShiftRng::from_seed(seed)
}

/// One uniform index in `[0, len)`.
pub(crate) fn draw_index(rng: &mut XorShiftRng, len: usize) -> usize {
	rng.gen_range(0..len as u64) as usize
}

/// The Fisher–Yates permutation of `0..len` under the given seed.
pub fn permutation(len: usize, seed: u64) -> Vec<usize> {
	let mut rng = rng_from_u64(seed);
	let mut perm: Vec<usize> = (0..len).collect();
	for i in (1..len).rev() {
		let j = rng.gen_range(0..=i as u64) as usize;
		perm.swap(i, j);
	}
	perm
}
