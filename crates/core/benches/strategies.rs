// Copyright 2024-2025 Irreducible Inc.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_bigint::BigInt;
use polymul_core::{MulConfig, Strategy};
use polymul_math::{test_utils::random_poly, Coefficient};
use rand::{rngs::StdRng, SeedableRng};

fn bench_strategies<C: Coefficient>(c: &mut Criterion, group_name: &str, bound: i64) {
	let mut group = c.benchmark_group(group_name);
	let mut rng = StdRng::seed_from_u64(0);
	let config = MulConfig::default();

	for log_len in [8, 10, 12] {
		let len = 1usize << log_len;
		let p = random_poly::<C>(&mut rng, len, bound);
		let q = random_poly::<C>(&mut rng, len, bound);

		group.throughput(Throughput::Elements((len * len) as u64));
		for strategy in Strategy::ALL {
			group.bench_with_input(BenchmarkId::new(strategy.name(), len), &len, |b, _| {
				b.iter(|| strategy.multiply(&p, &q, &config));
			});
		}
	}
}

fn strategies_i64(c: &mut Criterion) {
	bench_strategies::<i64>(c, "mul_i64", 30);
}

fn strategies_bigint(c: &mut Criterion) {
	bench_strategies::<BigInt>(c, "mul_bigint", 30_000_000);
}

criterion_group!(multiplication, strategies_i64, strategies_bigint);
criterion_main!(multiplication);
