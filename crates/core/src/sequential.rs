// Copyright 2024-2025 Irreducible Inc.

use polymul_math::{product_len, Coefficient};
use tracing::instrument;

/// Schoolbook multiplication in $O(pq)$.
///
/// This is the reference every other strategy must agree with, and the base case of the
/// Karatsuba recursions.
#[instrument(skip_all, level = "debug", fields(len_p = p.len(), len_q = q.len()))]
pub fn mul_sequential<C: Coefficient>(p: &[C], q: &[C]) -> Vec<C> {
	convolve(p, q)
}

pub(crate) fn convolve<C: Coefficient>(p: &[C], q: &[C]) -> Vec<C> {
	let mut result = vec![C::zero(); product_len(p.len(), q.len())];
	if result.is_empty() {
		return result;
	}

	for (i, p_i) in p.iter().enumerate() {
		if p_i.is_zero() {
			continue;
		}
		for (acc, q_j) in result[i..].iter_mut().zip(q) {
			acc.mul_add_assign(p_i, q_j);
		}
	}
	result
}

/// Coefficient `k` of the product: $\sum_{i + j = k} p_i q_j$.
///
/// `k` must be below `product_len(p.len(), q.len())`.
pub fn coefficient_at<C: Coefficient>(p: &[C], q: &[C], k: usize) -> C {
	debug_assert!(k < product_len(p.len(), q.len()));

	// Indices i with 0 <= k - i < q.len()
	let i_min = (k + 1).saturating_sub(q.len());
	let i_max = k.min(p.len() - 1);

	let mut acc = C::zero();
	for i in i_min..=i_max {
		acc.mul_add_assign(&p[i], &q[k - i]);
	}
	acc
}
