// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attribute statistics over a sample population, the input to weight
//! estimation for the weighted filter layouts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pprl_transform::{Entity, Tokenizer};

/// Per-attribute statistics over normalized values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeStats {
	/// Mean number of q-grams a value of this attribute yields.
	pub average_tokens: f64,
	/// Shannon entropy (bits) of the empirical q-gram distribution.
	pub ngram_entropy: f64,
}

#[derive(Default)]
struct Accumulator {
	values: usize,
	token_total: usize,
	grams: BTreeMap<String, usize>,
	gram_total: usize,
}

/// Computes per-attribute token-count and entropy statistics over a
/// population. Values are expected to be transformed already; the tokenizer
/// is applied without attribute prefixes so the gram distribution reflects
/// the text alone.
pub fn compute_stats(
	entities: &[Entity],
	tokenizer: &Tokenizer,
) -> BTreeMap<String, AttributeStats> {
	let plain = Tokenizer { prepend_attribute_name: false, ..tokenizer.clone() };
	let mut accumulators: BTreeMap<String, Accumulator> = BTreeMap::new();
	for entity in entities {
		for (name, value) in &entity.attributes {
			let acc = accumulators.entry(name.clone()).or_default();
			acc.values += 1;
			acc.token_total += plain.token_count(value.chars().count());
			for gram in plain.tokenize(name, value) {
				*acc.grams.entry(gram).or_insert(0) += 1;
				acc.gram_total += 1;
			}
		}
	}

	accumulators
		.into_iter()
		.map(|(name, acc)| {
			let average_tokens = acc.token_total as f64 / acc.values as f64;
			let total = acc.gram_total as f64;
			let ngram_entropy = -acc
				.grams
				.values()
				.map(|&count| {
					let p = count as f64 / total;
					p * p.log2()
				})
				.sum::<f64>();
			(name, AttributeStats { average_tokens, ngram_entropy })
		})
		.collect()
}

/// Converts attribute weights into per-attribute hash counts for a CLK-RBF
/// filter: `k_a = max(1, round(base_k · w_a / max_w))`.
///
/// # Panics
///
/// If any weight is not a positive finite number.
pub fn effective_k(base_k: usize, weights: &BTreeMap<String, f64>) -> BTreeMap<String, usize> {
	for (name, weight) in weights {
		assert!(
			weight.is_finite() && *weight > 0.0,
			"weight for attribute {:?} must be positive and finite, got {}",
			name,
			weight,
		);
	}
	let max = weights.values().cloned().fold(0.0f64, f64::max);
	weights
		.iter()
		.map(|(name, weight)| {
			let k = (base_k as f64 * weight / max).round() as usize;
			(name.clone(), k.max(1))
		})
		.collect()
}
