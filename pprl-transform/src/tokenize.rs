// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use serde::{Deserialize, Serialize};

fn default_padding() -> char {
	'_'
}

/// Splits a transformed attribute value into overlapping q-grams.
///
/// The value is surrounded by `q - 1` copies of the padding character on each
/// side, so boundary characters occur in as many grams as interior ones.
/// With `prepend_attribute_name` the attribute name and a `:` separator are
/// prefixed to every token, making identical grams of different attributes
/// hash to different positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tokenizer {
	pub q: usize,
	#[serde(default = "default_padding")]
	pub padding: char,
	#[serde(default)]
	pub prepend_attribute_name: bool,
}

impl Tokenizer {
	pub fn new(q: usize) -> Self {
		Tokenizer { q, padding: default_padding(), prepend_attribute_name: false }
	}

	/// Emits the token stream for one attribute value.
	///
	/// # Panics
	///
	/// If `q` is zero; masking validates that before processing.
	pub fn tokenize(&self, attribute: &str, value: &str) -> Vec<String> {
		assert!(self.q > 0, "q-gram length must be positive");
		let pad = self.q - 1;
		let padded: Vec<char> = core::iter::repeat(self.padding)
			.take(pad)
			.chain(value.chars())
			.chain(core::iter::repeat(self.padding).take(pad))
			.collect();
		if padded.len() < self.q {
			return Vec::new();
		}
		padded
			.windows(self.q)
			.map(|window| {
				let gram: String = window.iter().collect();
				if self.prepend_attribute_name {
					format!("{}:{}", attribute, gram)
				} else {
					gram
				}
			})
			.collect()
	}

	/// The number of tokens a value of `chars` characters yields.
	pub fn token_count(&self, chars: usize) -> usize {
		(chars + self.q).saturating_sub(1)
	}
}

#[cfg(test)]
mod tests {
	use super::Tokenizer;

	#[test]
	fn bigrams_with_padding() {
		let tokens = Tokenizer::new(2).tokenize("first_name", "ada");
		assert_eq!(tokens, vec!["_a", "ad", "da", "a_"]);
	}

	#[test]
	fn trigrams_pad_twice() {
		let tokens = Tokenizer::new(3).tokenize("n", "ab");
		assert_eq!(tokens, vec!["__a", "_ab", "ab_", "b__"]);
	}

	#[test]
	fn unigrams_have_no_padding() {
		let tokens = Tokenizer::new(1).tokenize("n", "ab");
		assert_eq!(tokens, vec!["a", "b"]);
		assert!(Tokenizer::new(1).tokenize("n", "").is_empty());
	}

	#[test]
	fn attribute_prefix_distinguishes_tokens() {
		let tokenizer =
			Tokenizer { prepend_attribute_name: true, ..Tokenizer::new(2) };
		let tokens = tokenizer.tokenize("city", "x");
		assert_eq!(tokens, vec!["city:_x", "city:x_"]);
	}

	#[test]
	fn token_count_matches_emitted_tokens() {
		for q in 1..4 {
			let tokenizer = Tokenizer::new(q);
			for value in ["", "a", "ada", "lovelace"] {
				assert_eq!(
					tokenizer.tokenize("n", value).len(),
					tokenizer.token_count(value.chars().count()),
					"q={} value={}",
					q,
					value,
				);
			}
		}
	}

	#[test]
	fn gram_multiset_is_stable() {
		let tokenizer = Tokenizer::new(2);
		let mut a = tokenizer.tokenize("n", "banana");
		let mut b = tokenizer.tokenize("n", "banana");
		a.sort();
		b.sort();
		assert_eq!(a, b);
	}
}
