// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use serde::{Deserialize, Serialize};

use crate::BitVector;

/// An identified bit vector, the unit record of masking output and matching
/// input. Identifiers are opaque and preserved verbatim; vector lengths are
/// identical across the entities of one masking job by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitVectorEntity {
	pub id: String,
	pub value: BitVector,
}

impl BitVectorEntity {
	pub fn new(id: impl Into<String>, value: BitVector) -> Self {
		BitVectorEntity { id: id.into(), value }
	}
}
