// Copyright 2024-2025 Irreducible Inc.

use rand::Rng;

use crate::Coefficient;

/// Random polynomial with `len` coefficients drawn uniformly from `-bound..bound`.
pub fn random_poly<C: Coefficient>(mut rng: impl Rng, len: usize, bound: i64) -> Vec<C> {
	(0..len)
		.map(|_| C::from_i64(rng.gen_range(-bound..bound)))
		.collect()
}

/// Converts a slice of machine integers into coefficients.
pub fn poly_from_i64<C: Coefficient>(coeffs: &[i64]) -> Vec<C> {
	coeffs.iter().map(|&c| C::from_i64(c)).collect()
}
