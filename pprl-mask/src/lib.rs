// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The Bloom-filter masking engine.
//!
//! Masking converts an entity's attribute values into one fixed-length bit
//! vector: each value is tokenized into q-grams, every token is digested by
//! the configured algorithms (optionally HMAC-keyed), the digest stream is
//! turned into `k` bit positions under one of four hash schemes, the
//! positions are set in a uniform ([CLK]) or weighted ([RBF] / [CLK-RBF])
//! filter layout, and an ordered hardener chain re-randomizes the result.
//!
//! The whole pipeline is deterministic: for a fixed configuration, token
//! stream and key, the output vector is byte-identical across runs and hosts.
//! Every seeded step draws from `XorShiftRng`, the one PRNG this crate uses,
//! and ranged draws sample `u64` so pointer width cannot change outputs.
//!
//! [CLK]: FilterSpec::Clk
//! [RBF]: FilterSpec::Rbf
//! [CLK-RBF]: FilterSpec::ClkRbf
//!
//! ```
//! use pprl_mask::{mask, HashAlgorithm, HashConfig, HashScheme, FilterSpec, MaskConfig};
//! use pprl_transform::{Entity, Tokenizer};
//!
//! let config = MaskConfig::new(
//! 	Tokenizer::new(2),
//! 	HashConfig {
//! 		algorithms: vec![HashAlgorithm::Sha1],
//! 		key: Some("s3cr3t".into()),
//! 		scheme: HashScheme::DoubleHash,
//! 	},
//! 	FilterSpec::Clk { size: 512, k: 5 },
//! );
//! let entities = vec![Entity::new("1").with_attribute("last_name", "miller")];
//! let masked = mask(&config, &entities).unwrap();
//! assert_eq!(masked[0].value.len(), 512);
//! ```

mod config;
mod digest;
mod error;
mod hardener;
mod mask;
mod random;
mod scheme;
mod stats;

pub use self::{
	config::{FilterSpec, HashConfig, MaskConfig, RbfAttribute, Salt},
	digest::{digest_stream, HashAlgorithm},
	error::{Error, Result},
	hardener::{apply_chain, Hardener},
	mask::mask,
	random::permutation,
	scheme::HashScheme,
	stats::{compute_stats, effective_k, AttributeStats},
};
