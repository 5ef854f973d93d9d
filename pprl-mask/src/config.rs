// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pprl_transform::{Entity, Tokenizer};

use crate::{
	digest::HashAlgorithm,
	error::{Error, Result},
	hardener::Hardener,
	scheme::HashScheme,
};

/// Digest configuration: the ordered algorithm list, an optional shared key
/// (HMAC mode when present), and the position scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashConfig {
	pub algorithms: Vec<HashAlgorithm>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
	pub scheme: HashScheme,
}

/// A per-attribute salt, concatenated with each token before digesting.
/// The externally tagged representation makes "exactly one of value or
/// attribute" the only expressible configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Salt {
	/// A literal string.
	Value(String),
	/// The value of another attribute of the same entity.
	Attribute(String),
}

/// One attribute of an RBF filter: its own sub-filter size and hash count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RbfAttribute {
	pub name: String,
	pub size: usize,
	pub k: usize,
}

/// The filter layout. The tagged representation doubles as the wire schema;
/// uniform and weighted layouts cannot be mixed by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterSpec {
	/// One shared filter, all attributes inserted with the same `k`.
	Clk { size: usize, k: usize },
	/// Per-attribute sub-filters concatenated in declared order, then
	/// reduced to `output_size` bits sampled by a seeded permutation.
	Rbf { attributes: Vec<RbfAttribute>, output_size: usize, seed: u64 },
	/// One shared filter with per-attribute hash counts, typically derived
	/// from attribute weights via [`effective_k`](crate::effective_k).
	#[serde(rename = "clkrbf")]
	ClkRbf { size: usize, k: BTreeMap<String, usize> },
}

impl FilterSpec {
	/// The length of the vector this layout emits, before hardeners.
	pub fn output_len(&self) -> usize {
		match self {
			FilterSpec::Clk { size, .. } => *size,
			FilterSpec::Rbf { output_size, .. } => *output_size,
			FilterSpec::ClkRbf { size, .. } => *size,
		}
	}

	/// The attribute names a weighted layout requires on every entity.
	fn required_attributes(&self) -> Vec<&str> {
		match self {
			FilterSpec::Clk { .. } => Vec::new(),
			FilterSpec::Rbf { attributes, .. } =>
				attributes.iter().map(|a| a.name.as_str()).collect(),
			FilterSpec::ClkRbf { k, .. } => k.keys().map(String::as_str).collect(),
		}
	}
}

/// The full configuration of one masking job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskConfig {
	pub tokenizer: Tokenizer,
	pub hash: HashConfig,
	pub filter: FilterSpec,
	#[serde(default)]
	pub hardeners: Vec<Hardener>,
	#[serde(default)]
	pub salts: BTreeMap<String, Salt>,
	/// When set, a failing entity is logged and dropped instead of failing
	/// the batch.
	#[serde(default)]
	pub skip_failed_entities: bool,
}

impl MaskConfig {
	pub fn new(tokenizer: Tokenizer, hash: HashConfig, filter: FilterSpec) -> Self {
		MaskConfig {
			tokenizer,
			hash,
			filter,
			hardeners: Vec::new(),
			salts: BTreeMap::new(),
			skip_failed_entities: false,
		}
	}

	/// Validates the configuration against a batch, before any entity is
	/// processed.
	pub fn validate(&self, entities: &[Entity]) -> Result<()> {
		if self.tokenizer.q == 0 {
			return Err(Error::ZeroTokenLength);
		}
		// every scheme consumes at least one stream byte, so an empty
		// algorithm list is rejected here too
		let available: usize =
			self.hash.algorithms.iter().map(HashAlgorithm::output_len).sum();
		let needed = self.hash.scheme.stream_bytes_needed();
		if available < needed {
			return Err(Error::ShortDigestStream { needed, available });
		}

		match &self.filter {
			FilterSpec::Clk { size, k } => {
				if *size == 0 {
					return Err(Error::ZeroFilterSize);
				}
				if *k == 0 {
					return Err(Error::ZeroHashCount);
				}
			},
			FilterSpec::Rbf { attributes, output_size, .. } => {
				if attributes.is_empty() {
					return Err(Error::NoWeightedAttributes);
				}
				if *output_size == 0 || attributes.iter().any(|a| a.size == 0) {
					return Err(Error::ZeroFilterSize);
				}
				if attributes.iter().any(|a| a.k == 0) {
					return Err(Error::ZeroHashCount);
				}
				let total: usize = attributes.iter().map(|a| a.size).sum();
				if *output_size > total {
					return Err(Error::OversizedSample { output_size: *output_size, total });
				}
			},
			FilterSpec::ClkRbf { size, k } => {
				if *size == 0 {
					return Err(Error::ZeroFilterSize);
				}
				if k.is_empty() {
					return Err(Error::NoWeightedAttributes);
				}
				if k.values().any(|&k| k == 0) {
					return Err(Error::ZeroHashCount);
				}
			},
		}

		// walk the hardener chain with the declared filter length so length
		// contract violations surface here instead of mid-batch
		let mut len = self.filter.output_len();
		for hardener in &self.hardeners {
			match hardener {
				Hardener::Balance => len *= 2,
				Hardener::XorFold => {
					if len % 2 != 0 {
						return Err(Error::OddFoldLength(len));
					}
					len /= 2;
				},
				Hardener::RandomizedResponse { probability, .. } => {
					if !(0.0..=1.0).contains(probability) {
						return Err(Error::ProbabilityOutOfRange(*probability));
					}
				},
				Hardener::Rehash { window_size, window_step, .. } => {
					if *window_size == 0 || *window_step == 0 {
						return Err(Error::ZeroWindow);
					}
				},
				Hardener::Permute { .. } | Hardener::Rule90 => {},
			}
		}

		// weighted layouts and attribute salts must resolve on every entity;
		// with skip_failed_entities the check moves to processing time so a
		// partially attributed entity is dropped instead of failing the batch
		if self.skip_failed_entities {
			return Ok(());
		}
		let required = self.filter.required_attributes();
		for entity in entities {
			for attribute in &required {
				if !entity.attributes.contains_key(*attribute) {
					return Err(Error::MissingAttribute {
						entity: entity.id.clone(),
						attribute: (*attribute).into(),
					});
				}
			}
			for salt in self.salts.values() {
				if let Salt::Attribute(attribute) = salt {
					if !entity.attributes.contains_key(attribute) {
						return Err(Error::MissingAttribute {
							entity: entity.id.clone(),
							attribute: attribute.clone(),
						});
					}
				}
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use pprl_transform::{Entity, Tokenizer};

	use super::{FilterSpec, HashConfig, MaskConfig, RbfAttribute, Salt};
	use crate::{digest::HashAlgorithm, error::Error, hardener::Hardener, scheme::HashScheme};

	fn sha1_config(filter: FilterSpec) -> MaskConfig {
		MaskConfig::new(
			Tokenizer::new(2),
			HashConfig {
				algorithms: vec![HashAlgorithm::Sha1],
				key: None,
				scheme: HashScheme::DoubleHash,
			},
			filter,
		)
	}

	#[test]
	fn accepts_a_plain_clk() {
		let config = sha1_config(FilterSpec::Clk { size: 64, k: 3 });
		assert_eq!(config.validate(&[]), Ok(()));
	}

	#[test]
	fn rejects_zero_size_and_k() {
		assert_eq!(
			sha1_config(FilterSpec::Clk { size: 0, k: 3 }).validate(&[]),
			Err(Error::ZeroFilterSize)
		);
		assert_eq!(
			sha1_config(FilterSpec::Clk { size: 64, k: 0 }).validate(&[]),
			Err(Error::ZeroHashCount)
		);
	}

	#[test]
	fn rejects_digest_streams_shorter_than_the_scheme_needs() {
		let mut config = sha1_config(FilterSpec::Clk { size: 64, k: 3 });
		config.hash.scheme = HashScheme::TripleHash;
		// a single md5 digest is 16 bytes, enough for three 4-byte seeds
		config.hash.algorithms = vec![HashAlgorithm::Md5];
		assert_eq!(config.validate(&[]), Ok(()));
		// no algorithms at all yields a zero-byte stream, short for any scheme
		config.hash.algorithms = vec![];
		assert_eq!(
			config.validate(&[]),
			Err(Error::ShortDigestStream { needed: 12, available: 0 })
		);
		config.hash.scheme = HashScheme::RandomHash;
		assert_eq!(
			config.validate(&[]),
			Err(Error::ShortDigestStream { needed: 1, available: 0 })
		);
	}

	#[test]
	fn rejects_oversized_rbf_sampling() {
		let filter = FilterSpec::Rbf {
			attributes: vec![RbfAttribute { name: "a".into(), size: 32, k: 2 }],
			output_size: 64,
			seed: 1,
		};
		assert_eq!(
			sha1_config(filter).validate(&[]),
			Err(Error::OversizedSample { output_size: 64, total: 32 })
		);
	}

	#[test]
	fn walks_hardener_lengths() {
		let mut config = sha1_config(FilterSpec::Clk { size: 33, k: 3 });
		config.hardeners = vec![Hardener::XorFold];
		assert_eq!(config.validate(&[]), Err(Error::OddFoldLength(33)));

		// balance first makes the length even again
		config.hardeners = vec![Hardener::Balance, Hardener::XorFold];
		assert_eq!(config.validate(&[]), Ok(()));
	}

	#[test]
	fn rejects_probability_outside_unit_interval() {
		let mut config = sha1_config(FilterSpec::Clk { size: 64, k: 3 });
		config.hardeners = vec![Hardener::RandomizedResponse { seed: 1, probability: 1.5 }];
		assert_eq!(config.validate(&[]), Err(Error::ProbabilityOutOfRange(1.5)));
	}

	#[test]
	fn weighted_layouts_require_attributes_on_every_entity() {
		let filter = FilterSpec::ClkRbf {
			size: 64,
			k: [("last_name".to_string(), 3)].into_iter().collect(),
		};
		let config = sha1_config(filter);
		let with = Entity::new("1").with_attribute("last_name", "miller");
		let without = Entity::new("2").with_attribute("first_name", "ada");
		assert_eq!(config.validate(&[with.clone()]), Ok(()));
		assert_eq!(
			config.validate(&[with, without]),
			Err(Error::MissingAttribute { entity: "2".into(), attribute: "last_name".into() })
		);
	}

	#[test]
	fn attribute_salts_must_resolve() {
		let mut config = sha1_config(FilterSpec::Clk { size: 64, k: 3 });
		config.salts = BTreeMap::from([(
			"last_name".to_string(),
			Salt::Attribute("dob".to_string()),
		)]);
		let entity = Entity::new("1").with_attribute("last_name", "miller");
		assert_eq!(
			config.validate(&[entity]),
			Err(Error::MissingAttribute { entity: "1".into(), attribute: "dob".into() })
		);
	}

	#[test]
	fn salt_wire_schema_is_exactly_one_of() {
		let value: Salt = serde_json::from_str(r#"{"value":"pepper"}"#).unwrap();
		assert_eq!(value, Salt::Value("pepper".into()));
		let attribute: Salt = serde_json::from_str(r#"{"attribute":"dob"}"#).unwrap();
		assert_eq!(attribute, Salt::Attribute("dob".into()));
		assert!(serde_json::from_str::<Salt>(r#"{"value":"x","attribute":"y"}"#).is_err());
	}

	#[test]
	fn filter_wire_schema_round_trips() {
		let json = r#"{"type":"clkrbf","size":128,"k":{"dob":2,"last_name":4}}"#;
		let filter: FilterSpec = serde_json::from_str(json).unwrap();
		assert_eq!(serde_json::to_string(&filter).unwrap(), json);
	}
}
