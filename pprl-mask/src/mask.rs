// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use log::{debug, warn};

use pprl_bitvec::{BitVector, BitVectorEntity};
use pprl_transform::Entity;

use crate::{
	config::{FilterSpec, MaskConfig, Salt},
	digest::digest_stream,
	error::{Error, Result},
	hardener::apply_chain,
	random::permutation,
};

/// Masks a batch of entities into bit-vector entities.
///
/// The configuration is validated against the batch before any entity is
/// processed. Per-entity failures fail the batch unless
/// `skip_failed_entities` is set, in which case the entity is logged and
/// dropped.
pub fn mask(config: &MaskConfig, entities: &[Entity]) -> Result<Vec<BitVectorEntity>> {
	config.validate(entities)?;

	// the RBF bit-sampling permutation depends only on the seed, so it is
	// computed once per job and shared by every entity
	let sampling = match &config.filter {
		FilterSpec::Rbf { attributes, output_size, seed } => {
			let total: usize = attributes.iter().map(|a| a.size).sum();
			let mut perm = permutation(total, *seed);
			perm.truncate(*output_size);
			Some(perm)
		},
		_ => None,
	};

	debug!("masking {} entities into {}-bit vectors", entities.len(), config.filter.output_len());
	let mut out = Vec::with_capacity(entities.len());
	for entity in entities {
		match mask_entity(config, sampling.as_deref(), entity) {
			Ok(value) => out.push(BitVectorEntity::new(entity.id.clone(), value)),
			Err(e) if config.skip_failed_entities => {
				warn!("skipping entity {}: {}", entity.id, e);
			},
			Err(e) => return Err(e),
		}
	}
	Ok(out)
}

fn mask_entity(
	config: &MaskConfig,
	sampling: Option<&[usize]>,
	entity: &Entity,
) -> Result<BitVector> {
	let filter = match &config.filter {
		FilterSpec::Clk { size, k } => {
			let mut filter = BitVector::zero(*size);
			for (name, value) in &entity.attributes {
				insert_attribute(config, entity, name, value, *k, &mut filter)?;
			}
			filter
		},
		FilterSpec::Rbf { attributes, output_size, .. } => {
			let mut concatenated = BitVector::zero(0);
			for spec in attributes {
				let value = required_attribute(entity, &spec.name)?;
				let mut sub = BitVector::zero(spec.size);
				insert_attribute(config, entity, &spec.name, value, spec.k, &mut sub)?;
				concatenated = concatenated.concat(&sub);
			}
			let sampling = sampling.expect("sampling permutation is precomputed for rbf");
			let mut reduced = BitVector::zero(*output_size);
			for (i, &source) in sampling.iter().enumerate() {
				if concatenated.get(source) {
					reduced.set(i);
				}
			}
			reduced
		},
		FilterSpec::ClkRbf { size, k } => {
			let mut filter = BitVector::zero(*size);
			for (name, k_a) in k {
				let value = required_attribute(entity, name)?;
				insert_attribute(config, entity, name, value, *k_a, &mut filter)?;
			}
			filter
		},
	};
	Ok(apply_chain(&config.hardeners, filter))
}

fn required_attribute<'a>(entity: &'a Entity, name: &str) -> Result<&'a String> {
	entity.attributes.get(name).ok_or_else(|| Error::MissingAttribute {
		entity: entity.id.clone(),
		attribute: name.into(),
	})
}

/// Tokenizes one attribute value and sets `k` positions per token.
fn insert_attribute(
	config: &MaskConfig,
	entity: &Entity,
	name: &str,
	value: &str,
	k: usize,
	filter: &mut BitVector,
) -> Result<()> {
	let salt = match config.salts.get(name) {
		None => None,
		Some(Salt::Value(literal)) => Some(literal.as_str()),
		Some(Salt::Attribute(attribute)) => {
			Some(required_attribute(entity, attribute)?.as_str())
		},
	};
	let key = config.hash.key.as_deref().map(str::as_bytes);
	let size = filter.len();
	for token in config.tokenizer.tokenize(name, value) {
		let mut data = token.into_bytes();
		if let Some(salt) = salt {
			data.extend_from_slice(salt.as_bytes());
		}
		let stream = digest_stream(&config.hash.algorithms, key, &data);
		for position in config.hash.scheme.positions(&stream, k, size)? {
			filter.set(position);
		}
	}
	Ok(())
}
