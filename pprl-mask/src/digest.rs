// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use digest::Digest;
use hmac::{Hmac, Mac};
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

/// Supported digest algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
	Md5,
	Sha1,
	Sha256,
	Sha512,
}

impl HashAlgorithm {
	/// The digest output length in bytes.
	pub fn output_len(&self) -> usize {
		match self {
			HashAlgorithm::Md5 => 16,
			HashAlgorithm::Sha1 => 20,
			HashAlgorithm::Sha256 => 32,
			HashAlgorithm::Sha512 => 64,
		}
	}

	fn write_digest(&self, data: &[u8], out: &mut Vec<u8>) {
		match self {
			HashAlgorithm::Md5 => out.extend_from_slice(&Md5::digest(data)),
			HashAlgorithm::Sha1 => out.extend_from_slice(&Sha1::digest(data)),
			HashAlgorithm::Sha256 => out.extend_from_slice(&Sha256::digest(data)),
			HashAlgorithm::Sha512 => out.extend_from_slice(&Sha512::digest(data)),
		}
	}

	fn write_keyed_digest(&self, key: &[u8], data: &[u8], out: &mut Vec<u8>) {
		// HMAC accepts keys of any length, so construction cannot fail
		match self {
			HashAlgorithm::Md5 => {
				let mut mac = Hmac::<Md5>::new_from_slice(key).expect("any key length is valid");
				mac.update(data);
				out.extend_from_slice(&mac.finalize().into_bytes());
			},
			HashAlgorithm::Sha1 => {
				let mut mac = Hmac::<Sha1>::new_from_slice(key).expect("any key length is valid");
				mac.update(data);
				out.extend_from_slice(&mac.finalize().into_bytes());
			},
			HashAlgorithm::Sha256 => {
				let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("any key length is valid");
				mac.update(data);
				out.extend_from_slice(&mac.finalize().into_bytes());
			},
			HashAlgorithm::Sha512 => {
				let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("any key length is valid");
				mac.update(data);
				out.extend_from_slice(&mac.finalize().into_bytes());
			},
		}
	}
}

/// Concatenates the configured digests of `data`, HMAC-keyed when a key is
/// present. The order of `algorithms` is part of the wire contract: hash
/// schemes read their integer seeds from the head of this stream, so
/// reordering algorithms changes every output vector.
pub fn digest_stream(algorithms: &[HashAlgorithm], key: Option<&[u8]>, data: &[u8]) -> Vec<u8> {
	let capacity = algorithms.iter().map(HashAlgorithm::output_len).sum();
	let mut out = Vec::with_capacity(capacity);
	for algorithm in algorithms {
		match key {
			Some(key) => algorithm.write_keyed_digest(key, data, &mut out),
			None => algorithm.write_digest(data, &mut out),
		}
	}
	out
}
