// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use pprl_bitvec::BitVector;

use crate::random;

/// A deterministic post-processing step on the finished filter.
///
/// Hardeners are pure `BitVector -> BitVector` functions; a chain applies
/// them in declared order. All of them preserve the vector length except
/// [`Balance`](Hardener::Balance) (doubles) and
/// [`XorFold`](Hardener::XorFold) (halves).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Hardener {
	/// Appends the complement; exactly half the output bits are set
	/// irrespective of input density.
	Balance,
	/// XORs the two halves together, halving the length.
	XorFold,
	/// Fisher–Yates shuffle of the bit positions.
	Permute { seed: u64 },
	/// Replaces each bit with a fresh uniform bit with the given
	/// probability; `0.0` is the identity, `1.0` a fully random vector.
	RandomizedResponse { seed: u64, probability: f64 },
	/// One step of elementary cellular automaton rule 90, zero beyond the
	/// boundaries.
	#[serde(rename = "rule_90")]
	Rule90,
	/// Slides a window across the vector; each window seeds an RNG from its
	/// bits and draws `samples` positions into an accumulator that is OR-ed
	/// onto the input.
	Rehash { window_size: usize, window_step: usize, samples: usize },
}

impl Hardener {
	/// Applies this hardener to one vector.
	pub fn apply(&self, input: &BitVector) -> BitVector {
		match self {
			Hardener::Balance => input.concat(&!input),
			Hardener::XorFold => &input.left_half() ^ &input.right_half(),
			Hardener::Permute { seed } => permute(input, *seed),
			Hardener::RandomizedResponse { seed, probability } => {
				randomized_response(input, *seed, *probability)
			},
			Hardener::Rule90 => rule_90(input),
			Hardener::Rehash { window_size, window_step, samples } => {
				rehash(input, *window_size, *window_step, *samples)
			},
		}
	}
}

/// Applies a chain of hardeners in declared order.
pub fn apply_chain(chain: &[Hardener], input: BitVector) -> BitVector {
	chain.iter().fold(input, |vector, hardener| hardener.apply(&vector))
}

fn permute(input: &BitVector, seed: u64) -> BitVector {
	let perm = random::permutation(input.len(), seed);
	let mut out = BitVector::zero(input.len());
	for (i, &source) in perm.iter().enumerate() {
		if input.get(source) {
			out.set(i);
		}
	}
	out
}

fn randomized_response(input: &BitVector, seed: u64, probability: f64) -> BitVector {
	let mut rng = random::rng_from_u64(seed);
	let mut out = BitVector::zero(input.len());
	for i in 0..input.len() {
		let replace = rng.gen::<f64>() < probability;
		let bit = if replace { rng.gen::<bool>() } else { input.get(i) };
		if bit {
			out.set(i);
		}
	}
	out
}

fn rule_90(input: &BitVector) -> BitVector {
	let n = input.len();
	let mut out = BitVector::zero(n);
	for i in 0..n {
		let left = i > 0 && input.get(i - 1);
		let right = i + 1 < n && input.get(i + 1);
		if left != right {
			out.set(i);
		}
	}
	out
}

fn rehash(input: &BitVector, window_size: usize, window_step: usize, samples: usize) -> BitVector {
	let n = input.len();
	let mut accumulator = BitVector::zero(n);
	let mut start = 0;
	// windows that would extend past the end are dropped
	while start + window_size <= n {
		// the window bits as a big-endian integer, reduced mod 2^64
		let mut seed: u64 = 0;
		for i in start..start + window_size {
			seed = (seed << 1) | input.get(i) as u64;
		}
		let mut rng = random::rng_from_u64(seed);
		for _ in 0..samples {
			accumulator.set(random::draw_index(&mut rng, n));
		}
		start += window_step;
	}
	input | &accumulator
}

#[cfg(test)]
mod tests {
	use core::str::FromStr;

	use pprl_bitvec::BitVector;

	use super::{apply_chain, Hardener};

	fn sample_vector(len: usize) -> BitVector {
		let mut v = BitVector::zero(len);
		for i in 0..len {
			if i % 3 == 0 || i % 7 == 0 {
				v.set(i);
			}
		}
		v
	}

	#[test]
	fn balance_doubles_length_and_equalizes_density() {
		let mut v = BitVector::zero(64);
		for i in 0..27 {
			v.set(i * 2);
		}
		assert_eq!(v.count_ones(), 27);
		let balanced = Hardener::Balance.apply(&v);
		assert_eq!(balanced.len(), 128);
		assert_eq!(balanced.count_ones(), 64);
	}

	#[test]
	fn xor_fold_halves_and_inverts_balance() {
		let v = sample_vector(64);
		let folded = Hardener::XorFold.apply(&v);
		assert_eq!(folded.len(), 32);

		// balance then fold XORs the vector with its own complement
		let all_ones = Hardener::XorFold.apply(&Hardener::Balance.apply(&v));
		assert_eq!(all_ones.count_ones(), 64);
	}

	#[test]
	fn xor_fold_matches_manual_xor() {
		let v = BitVector::from_str("10110010").unwrap();
		assert_eq!(Hardener::XorFold.apply(&v).to_string(), "1001");
	}

	#[test]
	fn permute_preserves_popcount_and_inverts() {
		let v = sample_vector(128);
		let permuted = Hardener::Permute { seed: 99 }.apply(&v);
		assert_eq!(permuted.len(), v.len());
		assert_eq!(permuted.count_ones(), v.count_ones());
		assert_ne!(permuted, v);

		// applying the inverse permutation recovers the input
		let perm = crate::random::permutation(v.len(), 99);
		let mut recovered = BitVector::zero(v.len());
		for (i, &source) in perm.iter().enumerate() {
			if permuted.get(i) {
				recovered.set(source);
			}
		}
		assert_eq!(recovered, v);
	}

	#[test]
	fn randomized_response_zero_probability_is_identity() {
		let v = sample_vector(256);
		assert_eq!(Hardener::RandomizedResponse { seed: 5, probability: 0.0 }.apply(&v), v);
	}

	#[test]
	fn randomized_response_one_ignores_the_input() {
		let a = sample_vector(256);
		let b = BitVector::zero(256);
		let hardener = Hardener::RandomizedResponse { seed: 5, probability: 1.0 };
		assert_eq!(hardener.apply(&a), hardener.apply(&b));
	}

	#[test]
	fn randomized_response_is_seed_deterministic() {
		let v = sample_vector(256);
		let hardener = Hardener::RandomizedResponse { seed: 5, probability: 0.5 };
		assert_eq!(hardener.apply(&v), hardener.apply(&v));
		assert_ne!(
			hardener.apply(&v),
			Hardener::RandomizedResponse { seed: 6, probability: 0.5 }.apply(&v)
		);
	}

	#[test]
	fn rule_90_xors_neighbours_with_zero_boundaries() {
		let v = BitVector::from_str("01100101").unwrap();
		// out[i] = in[i-1] ^ in[i+1]
		assert_eq!(Hardener::Rule90.apply(&v).to_string(), "11111000");
	}

	#[test]
	fn rule_90_preserves_length() {
		let v = sample_vector(129);
		assert_eq!(Hardener::Rule90.apply(&v).len(), 129);
	}

	#[test]
	fn rehash_only_adds_bits() {
		let v = sample_vector(128);
		let hardener = Hardener::Rehash { window_size: 16, window_step: 8, samples: 3 };
		let rehashed = hardener.apply(&v);
		assert_eq!(rehashed.len(), v.len());
		assert_eq!(&rehashed | &v, rehashed);
		assert_eq!(hardener.apply(&v), rehashed);
	}

	#[test]
	fn rehash_drops_partial_windows() {
		// a window larger than the vector means no windows at all
		let v = sample_vector(32);
		let hardener = Hardener::Rehash { window_size: 64, window_step: 8, samples: 3 };
		assert_eq!(hardener.apply(&v), v);
	}

	#[test]
	fn chain_applies_in_declared_order() {
		let v = sample_vector(64);
		let chain = [Hardener::Balance, Hardener::Permute { seed: 3 }, Hardener::XorFold];
		let out = apply_chain(&chain, v.clone());
		assert_eq!(out.len(), 64);

		let by_hand = Hardener::XorFold
			.apply(&Hardener::Permute { seed: 3 }.apply(&Hardener::Balance.apply(&v)));
		assert_eq!(out, by_hand);
	}
}
