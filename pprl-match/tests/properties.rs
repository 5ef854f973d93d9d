// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use pprl_bitvec::BitVector;
use pprl_match::SimilarityMeasure;
use quickcheck::quickcheck;

const MEASURES: [SimilarityMeasure; 3] =
	[SimilarityMeasure::Dice, SimilarityMeasure::Cosine, SimilarityMeasure::Jaccard];

fn equal_length(a: &[u8], b: &[u8]) -> (BitVector, BitVector) {
	let n = a.len().min(b.len());
	(BitVector::from_bytes(&a[..n]), BitVector::from_bytes(&b[..n]))
}

quickcheck! {
	fn similarity_is_within_the_unit_interval(a: Vec<u8>, b: Vec<u8>) -> bool {
		let (x, y) = equal_length(&a, &b);
		MEASURES.iter().all(|m| {
			let s = m.compute(&x, &y);
			(0.0..=1.0).contains(&s)
		})
	}

	fn similarity_is_symmetric(a: Vec<u8>, b: Vec<u8>) -> bool {
		let (x, y) = equal_length(&a, &b);
		MEASURES.iter().all(|m| m.compute(&x, &y) == m.compute(&y, &x))
	}

	fn self_similarity_is_one_for_non_empty_vectors(a: Vec<u8>) -> bool {
		let v = BitVector::from_bytes(&a);
		if v.count_ones() == 0 {
			return true;
		}
		MEASURES.iter().all(|m| m.compute(&v, &v) == 1.0)
	}
}
