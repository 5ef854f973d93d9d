// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An input record: an opaque identifier plus named attribute values.
///
/// Identifiers are preserved verbatim and carry no ordering semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
	pub id: String,
	#[serde(default)]
	pub attributes: BTreeMap<String, String>,
}

impl Entity {
	pub fn new(id: impl Into<String>) -> Self {
		Entity { id: id.into(), attributes: BTreeMap::new() }
	}

	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name.into(), value.into());
		self
	}
}
