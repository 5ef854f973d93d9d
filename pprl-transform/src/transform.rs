// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::{
	error::{Error, Result},
	Entity, PhoneticAlgorithm,
};

/// Policy for a value that is empty after the global pre-transform stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyValueHandling {
	/// Keep the attribute; the empty value passes through untouched.
	#[default]
	Ignore,
	/// Drop the attribute from the entity.
	Skip,
	/// Fail the request.
	Error,
}

/// A value-to-value transform. The tagged representation doubles as the wire
/// schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Transform {
	/// NFKD decomposition, diacritic removal, lowercasing, whitespace-run
	/// collapsing and trimming. Idempotent.
	Normalize,
	/// Removes every code point of `characters` from the value.
	CharacterFilter { characters: String },
	/// Replaces by table lookup. With `inline`, every occurrence of a key is
	/// replaced by its value, longest key first; otherwise the whole value is
	/// the key and `default` backs a missing entry.
	Mapping {
		table: BTreeMap<String, String>,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		default: Option<String>,
		#[serde(default)]
		inline: bool,
	},
	/// Parses a decimal number and re-renders it with exactly `decimals`
	/// fractional digits, rounding half to even.
	Number { decimals: usize },
	/// Parses under `input_format` and renders under `output_format`,
	/// strftime grammar.
	DateTime { input_format: String, output_format: String },
	/// Replaces the value with its phonetic code.
	PhoneticCode { algorithm: PhoneticAlgorithm },
}

impl Transform {
	/// Applies the transform to one attribute value.
	pub fn apply(&self, attribute: &str, value: &str) -> Result<String> {
		match self {
			Transform::Normalize => Ok(normalize(value)),
			Transform::CharacterFilter { characters } => {
				Ok(value.chars().filter(|c| !characters.contains(*c)).collect())
			},
			Transform::Mapping { table, default, inline } => {
				if *inline {
					Ok(replace_inline(table, value))
				} else {
					table
						.get(value)
						.or(default.as_ref())
						.cloned()
						.ok_or_else(|| Error::MappingMiss {
							attribute: attribute.into(),
							value: value.into(),
						})
				}
			},
			Transform::Number { decimals } => {
				let parsed: f64 = value.trim().parse().map_err(|_| Error::NotANumber {
					attribute: attribute.into(),
					value: value.into(),
				})?;
				Ok(format!("{:.*}", decimals, parsed))
			},
			Transform::DateTime { input_format, output_format } => {
				reformat_date_time(value, input_format, output_format).ok_or_else(|| {
					Error::DateTime { attribute: attribute.into(), value: value.into() }
				})
			},
			Transform::PhoneticCode { algorithm } => Ok(algorithm.encode(value)),
		}
	}
}

/// NFKD, strip combining marks, lowercase, collapse whitespace runs, trim.
fn normalize(value: &str) -> String {
	let stripped: String = value.nfkd().filter(|c| !is_combining_mark(*c)).collect();
	let lowered = stripped.to_lowercase();
	lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Longest-match-first inline replacement. Candidate keys are ordered by
/// descending length, ties broken lexicographically, so the result does not
/// depend on map iteration order. The scan resumes after each replacement.
fn replace_inline(table: &BTreeMap<String, String>, value: &str) -> String {
	let mut keys: Vec<&String> = table.keys().filter(|k| !k.is_empty()).collect();
	keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

	let mut out = String::with_capacity(value.len());
	let mut rest = value;
	'scan: while !rest.is_empty() {
		for key in &keys {
			if rest.starts_with(key.as_str()) {
				out.push_str(&table[*key]);
				rest = &rest[key.len()..];
				continue 'scan;
			}
		}
		let ch = rest.chars().next().expect("rest is non-empty");
		out.push(ch);
		rest = &rest[ch.len_utf8()..];
	}
	out
}

/// Parses as datetime, then date, then time; `None` when the value does not
/// parse or the output format names fields the parsed value lacks.
fn reformat_date_time(value: &str, input_format: &str, output_format: &str) -> Option<String> {
	fn render(formatted: impl std::fmt::Display) -> Option<String> {
		let mut out = String::new();
		write!(out, "{}", formatted).ok()?;
		Some(out)
	}

	if let Ok(dt) = NaiveDateTime::parse_from_str(value, input_format) {
		return render(dt.format(output_format));
	}
	if let Ok(date) = NaiveDate::parse_from_str(value, input_format) {
		return render(date.format(output_format));
	}
	if let Ok(time) = NaiveTime::parse_from_str(value, input_format) {
		return render(time.format(output_format));
	}
	None
}

/// The transform stages of one masking or matching request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
	#[serde(default)]
	pub empty_value: EmptyValueHandling,
	#[serde(default)]
	pub global_before: Vec<Transform>,
	#[serde(default)]
	pub attribute_transforms: BTreeMap<String, Vec<Transform>>,
	#[serde(default)]
	pub global_after: Vec<Transform>,
}

/// Runs the full pipeline over a batch of entities: global *before*
/// transforms, the per-attribute chains, then global *after* transforms,
/// with the empty-value policy applied between the first two stages.
pub fn transform(config: &TransformConfig, entities: &[Entity]) -> Result<Vec<Entity>> {
	entities.iter().map(|entity| transform_entity(config, entity)).collect()
}

fn transform_entity(config: &TransformConfig, entity: &Entity) -> Result<Entity> {
	let mut attributes = BTreeMap::new();
	for (name, value) in &entity.attributes {
		let mut current = value.clone();
		for stage in &config.global_before {
			current = stage.apply(name, &current)?;
		}
		if current.is_empty() {
			match config.empty_value {
				EmptyValueHandling::Ignore => {
					attributes.insert(name.clone(), current);
					continue;
				},
				EmptyValueHandling::Skip => continue,
				EmptyValueHandling::Error => {
					return Err(Error::EmptyValue { attribute: name.clone() })
				},
			}
		}
		if let Some(chain) = config.attribute_transforms.get(name) {
			for stage in chain {
				current = stage.apply(name, &current)?;
			}
		}
		for stage in &config.global_after {
			current = stage.apply(name, &current)?;
		}
		attributes.insert(name.clone(), current);
	}
	Ok(Entity { id: entity.id.clone(), attributes })
}
