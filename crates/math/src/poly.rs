// Copyright 2024-2025 Irreducible Inc.

//! Coefficient-vector helpers shared by all multiplication strategies.
//!
//! A polynomial is represented as a slice of coefficients where index `i` holds the coefficient of
//! $X^i$. None of these functions mutate their inputs.

use std::borrow::Cow;

use crate::Coefficient;

/// Length of the product of polynomials with `len_p` and `len_q` coefficients.
///
/// The product of anything with the empty polynomial is empty.
#[inline]
pub fn product_len(len_p: usize, len_q: usize) -> usize {
	if len_p == 0 || len_q == 0 {
		0
	} else {
		len_p + len_q - 1
	}
}

/// Zero-extends `p` to `len` coefficients.
///
/// When `p` is already at least `len` long it is returned borrowed and untouched.
pub fn pad<C: Coefficient>(p: &[C], len: usize) -> Cow<'_, [C]> {
	if p.len() >= len {
		return Cow::Borrowed(p);
	}

	let mut padded = Vec::with_capacity(len);
	padded.extend_from_slice(p);
	padded.resize(len, C::zero());
	Cow::Owned(padded)
}

/// Coefficient-wise sum. The result is as long as the longer operand.
pub fn add<C: Coefficient>(p: &[C], q: &[C]) -> Vec<C> {
	let (long, short) = if p.len() >= q.len() { (p, q) } else { (q, p) };
	let mut result = long.to_vec();
	for (acc, x) in result.iter_mut().zip(short) {
		acc.add_assign_ref(x);
	}
	result
}

/// Coefficient-wise difference `p - q`. The result is as long as the longer operand.
pub fn sub<C: Coefficient>(p: &[C], q: &[C]) -> Vec<C> {
	let mut result = pad(p, q.len()).into_owned();
	for (acc, x) in result.iter_mut().zip(q) {
		acc.sub_assign_ref(x);
	}
	result
}

/// In-place `acc[offset..] += p`. `acc` must have room for all of `p` at `offset`.
pub fn add_assign_at<C: Coefficient>(acc: &mut [C], p: &[C], offset: usize) {
	assert!(offset + p.len() <= acc.len(), "shifted addend does not fit in the accumulator");
	for (dst, x) in acc[offset..].iter_mut().zip(p) {
		dst.add_assign_ref(x);
	}
}

/// Strips trailing zero coefficients, which do not change the polynomial.
pub fn trim_trailing_zeros<C: Coefficient>(p: &[C]) -> &[C] {
	let len = p.iter().rposition(|c| !c.is_zero()).map_or(0, |i| i + 1);
	&p[..len]
}

/// Polynomial equality: the coefficient sequences agree after trimming trailing zeros.
pub fn are_equal<C: Coefficient>(p: &[C], q: &[C]) -> bool {
	trim_trailing_zeros(p) == trim_trailing_zeros(q)
}

#[cfg(test)]
mod tests {
	use num_bigint::BigInt;
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn test_product_len() {
		assert_eq!(product_len(0, 0), 0);
		assert_eq!(product_len(0, 5), 0);
		assert_eq!(product_len(5, 0), 0);
		assert_eq!(product_len(1, 1), 1);
		assert_eq!(product_len(3, 4), 6);
	}

	#[test]
	fn test_pad_to_own_length_is_identity() {
		let p = vec![1i64, -2, 3];
		let padded = pad(&p, p.len());
		assert!(matches!(padded, Cow::Borrowed(_)));
		assert!(std::ptr::eq(&*padded, p.as_slice()));

		let shorter = pad(&p, 1);
		assert!(std::ptr::eq(&*shorter, p.as_slice()));
	}

	#[test]
	fn test_pad_extends_with_zeros() {
		let p = vec![BigInt::from(4), BigInt::from(-5)];
		let padded = pad(&p, 4);
		assert_eq!(
			&*padded,
			&[BigInt::from(4), BigInt::from(-5), BigInt::from(0), BigInt::from(0)]
		);
	}

	#[test]
	fn test_add_and_sub_uneven_lengths() {
		let p = [1i64, 2, 3];
		let q = [10i64, 20];
		assert_eq!(add(&p, &q), vec![11, 22, 3]);
		assert_eq!(add(&q, &p), vec![11, 22, 3]);
		assert_eq!(sub(&p, &q), vec![-9, -18, 3]);
		assert_eq!(sub(&q, &p), vec![9, 18, -3]);
		assert!(add::<i64>(&[], &[]).is_empty());
	}

	#[test]
	fn test_add_assign_at() {
		let mut acc = vec![1i64; 5];
		add_assign_at(&mut acc, &[1, 2], 3);
		assert_eq!(acc, vec![1, 1, 1, 2, 3]);
	}

	#[test]
	#[should_panic]
	fn test_add_assign_at_overflow() {
		let mut acc = vec![0i64; 2];
		add_assign_at(&mut acc, &[1, 2], 1);
	}

	#[test]
	fn test_equality_ignores_trailing_zeros() {
		assert!(are_equal(&[1i64, 2, 0, 0], &[1, 2]));
		assert!(are_equal::<i64>(&[0, 0], &[]));
		assert!(!are_equal(&[1i64, 2], &[1, 2, 3]));
		assert!(!are_equal(&[0i64, 1], &[1]));
		assert_eq!(trim_trailing_zeros(&[0i64, 5, 0]), &[0, 5]);
	}

	proptest! {
		#[test]
		fn test_sub_undoes_add(
			p in prop::collection::vec(any::<i64>(), 0..40),
			q in prop::collection::vec(any::<i64>(), 0..40),
		) {
			let sum = add(&p, &q);
			prop_assert_eq!(sum.len(), p.len().max(q.len()));
			prop_assert!(are_equal(&sub(&sum, &q), &p));
		}
	}
}
