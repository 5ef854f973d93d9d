// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attribute value preparation for record-linkage encodings.
//!
//! Raw attribute values pass through an ordered pipeline of value-to-value
//! transforms (normalization, character filtering, table mappings, number and
//! date-time reformatting, phonetic codes) before a [`Tokenizer`] splits the
//! padded result into overlapping q-grams. Global *before* transforms run on
//! every attribute, then the per-attribute chains, then global *after*
//! transforms.
//!
//! ```
//! use pprl_transform::{transform, Entity, Transform, TransformConfig};
//!
//! let config = TransformConfig {
//! 	global_before: vec![Transform::Normalize],
//! 	..Default::default()
//! };
//! let entity = Entity::new("1").with_attribute("last_name", "  Müller-Ludenscheidt ");
//! let out = transform(&config, &[entity]).unwrap();
//! assert_eq!(out[0].attributes["last_name"], "muller-ludenscheidt");
//! ```

mod entity;
mod error;
mod phonetic;
mod tokenize;
mod transform;

pub use self::{
	entity::Entity,
	error::{Error, Result},
	phonetic::PhoneticAlgorithm,
	tokenize::Tokenizer,
	transform::{transform, EmptyValueHandling, Transform, TransformConfig},
};
