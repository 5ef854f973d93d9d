// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{error, fmt};

/// Masking error.
///
/// Configuration variants are reported once, before any entity is processed;
/// the remaining variants are scoped to a single entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
	/// A filter or sub-filter was declared with zero bits.
	ZeroFilterSize,
	/// A hash count `k` of zero was declared.
	ZeroHashCount,
	/// The tokenizer was declared with `q = 0`.
	ZeroTokenLength,
	/// The configured digest algorithms (possibly none) yield fewer bytes
	/// than the hash scheme consumes.
	ShortDigestStream { needed: usize, available: usize },
	/// An RBF filter was declared without weighted attributes.
	NoWeightedAttributes,
	/// An RBF output size exceeding the concatenated sub-filter length.
	OversizedSample { output_size: usize, total: usize },
	/// A randomized-response probability outside `[0, 1]`.
	ProbabilityOutOfRange(f64),
	/// A rehash hardener with a zero window size or step.
	ZeroWindow,
	/// An xor-fold hardener would receive a vector of odd length.
	OddFoldLength(usize),
	/// A weighted attribute or salt source is missing on an entity.
	MissingAttribute { entity: String, attribute: String },
}

pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::ZeroFilterSize => write!(f, "filter size must be positive"),
			Error::ZeroHashCount => write!(f, "hash count k must be positive"),
			Error::ZeroTokenLength => write!(f, "q-gram length must be positive"),
			Error::ShortDigestStream { needed, available } => {
				write!(f, "hash scheme needs {} digest bytes but only {} are configured", needed, available)
			},
			Error::NoWeightedAttributes => write!(f, "rbf filter declares no attributes"),
			Error::OversizedSample { output_size, total } => {
				write!(f, "rbf output size {} exceeds {} concatenated sub-filter bits", output_size, total)
			},
			Error::ProbabilityOutOfRange(p) => {
				write!(f, "randomized response probability {} outside [0, 1]", p)
			},
			Error::ZeroWindow => write!(f, "rehash window size and step must be positive"),
			Error::OddFoldLength(len) => {
				write!(f, "xor fold would receive a vector of odd length {}", len)
			},
			Error::MissingAttribute { entity, attribute } => {
				write!(f, "entity {:?} lacks configured attribute {:?}", entity, attribute)
			},
		}
	}
}

impl error::Error for Error {}
