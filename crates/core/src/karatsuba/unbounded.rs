// Copyright 2024-2025 Irreducible Inc.

use polymul_math::{product_len, Coefficient};
use tracing::instrument;

use super::KaratsubaSplit;
use crate::{sequential::convolve, MulConfig};

/// Karatsuba multiplication that spawns the high and low sub-products as new tasks at every level
/// above the cutoff, so the number of tasks grows as $2^{depth}$.
///
/// Only `config.cutoff()` is used.
#[instrument(skip_all, level = "debug", fields(len_p = p.len(), len_q = q.len()))]
pub fn mul_karatsuba_unbounded<C: Coefficient>(p: &[C], q: &[C], config: &MulConfig) -> Vec<C> {
	karatsuba_unbounded(p, q, config)
}

fn karatsuba_unbounded<C: Coefficient>(p: &[C], q: &[C], config: &MulConfig) -> Vec<C> {
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
		s.spawn(|_| r_high = karatsuba_unbounded(split.high_p(), split.high_q(), config));
		s.spawn(|_| r_low = karatsuba_unbounded(split.low_p(), split.low_q(), config));
		karatsuba_unbounded(&split.sum_p(), &split.sum_q(), config)
	});
	split.recombine(&r_high, &r_mid_term, &r_low)
}

#[cfg(test)]
mod tests {
	use num_bigint::BigInt;
	use polymul_math::test_utils::random_poly;
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;
	use crate::mul_sequential;

	#[test]
	fn test_deep_recursion_matches_sequential() {
		let mut rng = StdRng::seed_from_u64(0);
		let p = random_poly::<BigInt>(&mut rng, 129, 1 << 40);
		let q = random_poly::<BigInt>(&mut rng, 70, 1 << 40);
		let config = MulConfig::new(2, 1);
		assert_eq!(mul_karatsuba_unbounded(&p, &q, &config), mul_sequential(&p, &q));
	}
}
