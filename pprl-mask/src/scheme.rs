// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{
	error::{Error, Result},
	random,
};

/// Turns a token's digest stream into `k` filter positions.
///
/// Integer seeds are little-endian 32-bit chunks read from the head of the
/// stream; all arithmetic is unsigned 64-bit with wrapping semantics before
/// the final reduction modulo the filter size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashScheme {
	/// `(h0 + j·h1) mod m`
	DoubleHash,
	/// `(h0 + j·h1 + (j³ − j)/6) mod m`
	EnhancedDoubleHash,
	/// `(h0 + j·h1 + ((j³ − j)/6)·h2) mod m`
	TripleHash,
	/// `k` draws from an RNG seeded by the stream head.
	RandomHash,
}

impl HashScheme {
	/// The number of digest-stream bytes the scheme consumes.
	pub fn stream_bytes_needed(&self) -> usize {
		match self {
			HashScheme::DoubleHash | HashScheme::EnhancedDoubleHash => 8,
			HashScheme::TripleHash => 12,
			// anything present seeds the RNG; zero-extension covers the rest
			HashScheme::RandomHash => 1,
		}
	}

	/// The `k` bit positions for one token, each in `[0, filter_size)`.
	pub fn positions(&self, stream: &[u8], k: usize, filter_size: usize) -> Result<Vec<usize>> {
		let m = filter_size as u64;
		match self {
			HashScheme::DoubleHash => {
				let (h0, h1) = (seed(stream, 0)?, seed(stream, 1)?);
				Ok((0..k as u64)
					.map(|j| (h0.wrapping_add(j.wrapping_mul(h1)) % m) as usize)
					.collect())
			},
			HashScheme::EnhancedDoubleHash => {
				let (h0, h1) = (seed(stream, 0)?, seed(stream, 1)?);
				Ok((0..k as u64)
					.map(|j| {
						(h0.wrapping_add(j.wrapping_mul(h1)).wrapping_add(tetrahedral(j)) % m)
							as usize
					})
					.collect())
			},
			HashScheme::TripleHash => {
				let (h0, h1, h2) = (seed(stream, 0)?, seed(stream, 1)?, seed(stream, 2)?);
				Ok((0..k as u64)
					.map(|j| {
						(h0.wrapping_add(j.wrapping_mul(h1))
							.wrapping_add(tetrahedral(j).wrapping_mul(h2)) % m) as usize
					})
					.collect())
			},
			HashScheme::RandomHash => {
				if stream.is_empty() {
					return Err(Error::ShortDigestStream { needed: 1, available: 0 });
				}
				let mut rng = random::rng_from_bytes(stream);
				Ok((0..k).map(|_| rng.gen_range(0..m) as usize).collect())
			},
		}
	}
}

/// `(j³ − j) / 6`, the binomial coefficient C(j+1, 3).
fn tetrahedral(j: u64) -> u64 {
	j.wrapping_mul(j).wrapping_mul(j).wrapping_sub(j) / 6
}

/// The `index`-th little-endian 32-bit integer of the digest stream.
fn seed(stream: &[u8], index: usize) -> Result<u64> {
	let start = index * 4;
	let chunk = stream
		.get(start..start + 4)
		.ok_or(Error::ShortDigestStream { needed: start + 4, available: stream.len() })?;
	let bytes: [u8; 4] = chunk.try_into().expect("slice is four bytes");
	Ok(u32::from_le_bytes(bytes) as u64)
}

#[cfg(test)]
mod tests {
	use super::HashScheme;

	/// A stream whose first two little-endian u32 values are 13 and 37.
	fn stream_13_37() -> Vec<u8> {
		vec![13, 0, 0, 0, 37, 0, 0, 0, 99, 0, 0, 0]
	}

	#[test]
	fn double_hash_reference_positions() {
		let positions = HashScheme::DoubleHash.positions(&stream_13_37(), 5, 32).unwrap();
		assert_eq!(positions, vec![13, 18, 23, 28, 1]);
	}

	#[test]
	fn enhanced_double_hash_adds_tetrahedral_offsets() {
		let positions =
			HashScheme::EnhancedDoubleHash.positions(&stream_13_37(), 5, 32).unwrap();
		// offsets (j³-j)/6 = 0, 0, 1, 4, 10 on top of the double-hash walk
		assert_eq!(positions, vec![13, 18, 24, 0, 11]);
	}

	#[test]
	fn triple_hash_scales_offsets_by_third_seed() {
		let positions = HashScheme::TripleHash.positions(&stream_13_37(), 5, 32).unwrap();
		// offsets scaled by h2 = 99: 0, 0, 99, 396, 990
		assert_eq!(positions, vec![13, 18, 26, 8, 31]);
	}

	#[test]
	fn random_hash_is_deterministic_and_in_range() {
		let a = HashScheme::RandomHash.positions(&stream_13_37(), 64, 512).unwrap();
		let b = HashScheme::RandomHash.positions(&stream_13_37(), 64, 512).unwrap();
		assert_eq!(a, b);
		assert!(a.iter().all(|&p| p < 512));
		let other = HashScheme::RandomHash.positions(&[1u8; 12], 64, 512).unwrap();
		assert_ne!(a, other);
	}

	#[test]
	fn short_streams_are_rejected() {
		assert!(HashScheme::TripleHash.positions(&stream_13_37()[..8], 3, 32).is_err());
		assert!(HashScheme::DoubleHash.positions(&[0, 1, 2], 3, 32).is_err());
	}
}
