// Copyright 2024-2025 Irreducible Inc.

use polymul_math::{product_len, Coefficient};
use tracing::instrument;

use super::KaratsubaSplit;
use crate::{permit_pool::PermitPool, sequential::convolve, MulConfig};

/// Karatsuba multiplication with at most `config.max_tasks()` concurrently spawned branches.
///
/// A fresh [`PermitPool`] is created for the call and shared by every level of the recursion.
/// Each high or low sub-product is spawned as a task only if a permit is free at that moment and
/// is otherwise computed in place, so once the pool is saturated the recursion continues exactly
/// as the sequential one does.
#[instrument(
	skip_all,
	level = "debug",
	fields(len_p = p.len(), len_q = q.len(), max_tasks = config.max_tasks())
)]
pub fn mul_karatsuba_bounded<C: Coefficient>(p: &[C], q: &[C], config: &MulConfig) -> Vec<C> {
	let pool = PermitPool::new(config.max_tasks());
	karatsuba_bounded(p, q, config, &pool)
}

/// Same as [`mul_karatsuba_bounded`], drawing permits from a caller-owned pool.
pub fn mul_karatsuba_with_pool<C: Coefficient>(
	p: &[C],
	q: &[C],
	config: &MulConfig,
	pool: &PermitPool,
) -> Vec<C> {
	karatsuba_bounded(p, q, config, pool)
}

fn karatsuba_bounded<C: Coefficient>(
	p: &[C],
	q: &[C],
	config: &MulConfig,
	pool: &PermitPool,
) -> Vec<C> {
	if product_len(p.len(), q.len()) == 0 {
		return Vec::new();
	}
	if config.is_base_case(p.len(), q.len()) {
		return convolve(p, q);
	}

	let split = KaratsubaSplit::new(p, q);
	let mut r_high = Vec::new();
	let mut r_low = Vec::new();
	let r_mid_term = rayon::scope(|s| {
		spawn_or_run(s, pool, &mut r_high, || {
			karatsuba_bounded(split.high_p(), split.high_q(), config, pool)
		});
		spawn_or_run(s, pool, &mut r_low, || {
			karatsuba_bounded(split.low_p(), split.low_q(), config, pool)
		});
		karatsuba_bounded(&split.sum_p(), &split.sum_q(), config, pool)
	});
	split.recombine(&r_high, &r_mid_term, &r_low)
}

/// Runs `branch` on a new task holding a permit if one is free, otherwise runs it right here.
/// Either way `out` holds the result once the enclosing scope has finished.
fn spawn_or_run<'scope, C, F>(
	scope: &rayon::Scope<'scope>,
	pool: &'scope PermitPool,
	out: &'scope mut Vec<C>,
	branch: F,
) where
	C: Coefficient,
	F: FnOnce() -> Vec<C> + Send + 'scope,
{
	match pool.try_acquire() {
		Some(permit) => scope.spawn(move |_| {
			*out = branch();
			permit.release();
		}),
		None => *out = branch(),
	}
}

#[cfg(test)]
mod tests {
	use polymul_math::test_utils::random_poly;
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;
	use crate::mul_karatsuba;

	#[test]
	fn test_matches_sequential_karatsuba_for_any_capacity() {
		let mut rng = StdRng::seed_from_u64(0);
		let p = random_poly::<i64>(&mut rng, 300, 1 << 16);
		let q = random_poly::<i64>(&mut rng, 257, 1 << 16);
		let expected = mul_karatsuba(&p, &q, &MulConfig::new(16, 1));
		for max_tasks in [0, 1, 2, 3, 8, 64] {
			let config = MulConfig::new(16, max_tasks);
			assert_eq!(mul_karatsuba_bounded(&p, &q, &config), expected, "max_tasks={max_tasks}");
		}
	}

	#[test]
	fn test_permits_are_returned() {
		let mut rng = StdRng::seed_from_u64(1);
		let p = random_poly::<i64>(&mut rng, 200, 1000);
		let q = random_poly::<i64>(&mut rng, 200, 1000);
		let config = MulConfig::new(8, 4);
		let pool = PermitPool::new(4);

		mul_karatsuba_with_pool(&p, &q, &config, &pool);

		let permits = (0..4).map(|_| pool.try_acquire()).collect::<Vec<_>>();
		assert!(permits.iter().all(Option::is_some));
		assert!(pool.try_acquire().is_none());
	}

	#[test]
	fn test_saturated_pool_runs_inline() {
		let mut rng = StdRng::seed_from_u64(2);
		let p = random_poly::<i64>(&mut rng, 150, 1000);
		let q = random_poly::<i64>(&mut rng, 90, 1000);
		let config = MulConfig::new(8, 2);
		let pool = PermitPool::new(2);
		let _held = [pool.try_acquire(), pool.try_acquire()];

		assert_eq!(
			mul_karatsuba_with_pool(&p, &q, &config, &pool),
			mul_karatsuba(&p, &q, &config)
		);
	}
}
