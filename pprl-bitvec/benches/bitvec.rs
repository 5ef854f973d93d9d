// Copyright 2024 Parity Technologies
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{criterion_group, criterion_main, Criterion};
use pprl_bitvec::BitVector;

fn filter_pair() -> (BitVector, BitVector) {
	let mut a = BitVector::zero(1024);
	let mut b = BitVector::zero(1024);
	for i in 0..1024 {
		if i % 3 == 0 {
			a.set(i);
		}
		if i % 5 == 0 {
			b.set(i);
		}
	}
	(a, b)
}

fn popcount(c: &mut Criterion) {
	let (a, _) = filter_pair();
	c.bench_function("count_ones_1024", |bench| bench.iter(|| a.count_ones()));
}

fn intersection(c: &mut Criterion) {
	let (a, b) = filter_pair();
	c.bench_function("and_popcount_1024", |bench| bench.iter(|| (&a & &b).count_ones()));
}

fn base64_round_trip(c: &mut Criterion) {
	let (a, _) = filter_pair();
	c.bench_function("base64_round_trip_1024", |bench| {
		bench.iter(|| BitVector::from_base64(&a.to_base64()).unwrap())
	});
}

criterion_group!(benches, popcount, intersection, base64_round_trip);
criterion_main!(benches);
