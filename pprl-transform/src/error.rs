// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{error, fmt};

/// Transform pipeline error.
///
/// Every variant is scoped to a single attribute of a single entity; whether
/// it terminates the whole batch is the caller's policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
	/// A value was empty after the pre-transform stage and the configured
	/// policy treats that as a failure.
	EmptyValue { attribute: String },
	/// The `number` transform received something that does not parse as a
	/// decimal number.
	NotANumber { attribute: String, value: String },
	/// The `date_time` transform could not parse the value under the input
	/// format, or could not render it under the output format.
	DateTime { attribute: String, value: String },
	/// A non-inline `mapping` had no entry for the value and no default.
	MappingMiss { attribute: String, value: String },
}

pub type Result<T> = core::result::Result<T, Error>;

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::EmptyValue { attribute } => {
				write!(f, "attribute {:?} is empty", attribute)
			},
			Error::NotANumber { attribute, value } => {
				write!(f, "attribute {:?}: {:?} is not a number", attribute, value)
			},
			Error::DateTime { attribute, value } => {
				write!(f, "attribute {:?}: cannot reformat date-time {:?}", attribute, value)
			},
			Error::MappingMiss { attribute, value } => {
				write!(f, "attribute {:?}: no mapping for {:?} and no default", attribute, value)
			},
		}
	}
}

impl error::Error for Error {}
