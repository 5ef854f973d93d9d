// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Set similarity and threshold matching over masked records.
//!
//! Matching is an exhaustive pairwise scan: every domain entity is compared
//! against every range entity and a pair is emitted whenever its similarity
//! reaches the configured threshold. There is no deduplication, no blocking
//! and no nearest-neighbour filtering; emission order follows the outer
//! iteration over the domain, inner over the range.

use log::debug;
use serde::{Deserialize, Serialize};

use pprl_bitvec::{BitVector, BitVectorEntity};

/// The supported set-similarity measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMeasure {
	Dice,
	Cosine,
	Jaccard,
}

impl SimilarityMeasure {
	/// The similarity of two equal-length vectors, in `[0, 1]`. Two empty
	/// vectors score `0` by convention under every measure.
	///
	/// # Panics
	///
	/// If the vectors differ in length; that is a programming error, not a
	/// data condition.
	pub fn compute(&self, a: &BitVector, b: &BitVector) -> f64 {
		assert_eq!(a.len(), b.len(), "similarity over vectors of unequal length");
		let ones_a = a.count_ones() as f64;
		let ones_b = b.count_ones() as f64;
		let ones_both = (a & b).count_ones() as f64;
		match self {
			SimilarityMeasure::Dice => {
				if ones_a + ones_b == 0.0 {
					0.0
				} else {
					2.0 * ones_both / (ones_a + ones_b)
				}
			},
			SimilarityMeasure::Cosine => {
				if ones_a == 0.0 || ones_b == 0.0 {
					0.0
				} else {
					ones_both / (ones_a * ones_b).sqrt()
				}
			},
			SimilarityMeasure::Jaccard => {
				let union = ones_a + ones_b - ones_both;
				if union == 0.0 {
					0.0
				} else {
					ones_both / union
				}
			},
		}
	}
}

/// Matching configuration: the measure and an inclusion threshold in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
	pub measure: SimilarityMeasure,
	pub threshold: f64,
}

/// One emitted pair: the two identifiers and their similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPair {
	pub domain: String,
	pub range: String,
	pub similarity: f64,
}

/// Scans `domain × range` and emits every pair whose similarity meets the
/// threshold.
pub fn find_matches(
	config: &MatchConfig,
	domain: &[BitVectorEntity],
	range: &[BitVectorEntity],
) -> Vec<MatchPair> {
	debug!("matching {} x {} vectors at threshold {}", domain.len(), range.len(), config.threshold);
	let mut pairs = Vec::new();
	for d in domain {
		for r in range {
			let similarity = config.measure.compute(&d.value, &r.value);
			if similarity >= config.threshold {
				pairs.push(MatchPair {
					domain: d.id.clone(),
					range: r.id.clone(),
					similarity,
				});
			}
		}
	}
	debug!("emitted {} pairs", pairs.len());
	pairs
}
