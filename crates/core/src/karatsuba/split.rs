// Copyright 2024-2025 Irreducible Inc.

use std::borrow::Cow;

use polymul_math::{add, add_assign_at, pad, product_len, sub, Coefficient};

/// One of the three half-size products a Karatsuba level is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartialProduct {
	/// $P_{hi} \cdot Q_{hi}$
	High,
	/// $P_{lo} \cdot Q_{lo}$
	Low,
	/// $(P_{hi} + P_{lo}) \cdot (Q_{hi} + Q_{lo})$
	MidTerm,
}

/// One level of the Karatsuba decomposition.
///
/// Both operands are zero-padded to a common even length $m = 2n$ and viewed as
/// $P = P_{hi} X^n + P_{lo}$, $Q = Q_{hi} X^n + Q_{lo}$. The halves are borrowed from the padded
/// buffers, so they stay valid for as long as the split does and are never written.
#[derive(Debug)]
pub struct KaratsubaSplit<'a, C: Coefficient> {
	p: Cow<'a, [C]>,
	q: Cow<'a, [C]>,
	half: usize,
	product_len: usize,
}

impl<'a, C: Coefficient> KaratsubaSplit<'a, C> {
	pub fn new(p: &'a [C], q: &'a [C]) -> Self {
		let padded_len = p.len().max(q.len()).next_multiple_of(2);
		Self {
			p: pad(p, padded_len),
			q: pad(q, padded_len),
			half: padded_len / 2,
			product_len: product_len(p.len(), q.len()),
		}
	}

	/// Upper bound on the length of any partial product of this level.
	pub fn max_partial_len(&self) -> usize {
		(2 * self.half).saturating_sub(1)
	}

	pub fn high_p(&self) -> &[C] {
		&self.p[self.half..2 * self.half]
	}

	pub fn low_p(&self) -> &[C] {
		&self.p[..self.half]
	}

	pub fn high_q(&self) -> &[C] {
		&self.q[self.half..2 * self.half]
	}

	pub fn low_q(&self) -> &[C] {
		&self.q[..self.half]
	}

	/// $P_{hi} + P_{lo}$
	pub fn sum_p(&self) -> Vec<C> {
		add(self.high_p(), self.low_p())
	}

	/// $Q_{hi} + Q_{lo}$
	pub fn sum_q(&self) -> Vec<C> {
		add(self.high_q(), self.low_q())
	}

	/// The two factors of `product`. The mid-term factors are freshly allocated sums.
	pub fn operands(&self, product: PartialProduct) -> (Cow<'_, [C]>, Cow<'_, [C]>) {
		match product {
			PartialProduct::High => (Cow::Borrowed(self.high_p()), Cow::Borrowed(self.high_q())),
			PartialProduct::Low => (Cow::Borrowed(self.low_p()), Cow::Borrowed(self.low_q())),
			PartialProduct::MidTerm => (Cow::Owned(self.sum_p()), Cow::Owned(self.sum_q())),
		}
	}

	/// Assembles $R_{lo} + (R_{mid} - R_{hi} - R_{lo}) X^n + R_{hi} X^{2n}$, trimmed to the length
	/// of the unpadded product.
	///
	/// ## Panics
	///
	/// Panics if a partial product is longer than [`Self::max_partial_len`].
	pub fn recombine(&self, r_high: &[C], r_mid_term: &[C], r_low: &[C]) -> Vec<C> {
		let n = self.half;
		let r_mid = sub(&sub(r_mid_term, r_high), r_low);

		let mut result = vec![C::zero(); 4 * n];
		add_assign_at(&mut result, r_low, 0);
		add_assign_at(&mut result, &r_mid, n);
		add_assign_at(&mut result, r_high, 2 * n);

		debug_assert!(result[self.product_len..].iter().all(C::is_zero));
		result.truncate(self.product_len);
		result
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::sequential::convolve;

	#[test]
	fn test_halves_of_odd_length_operands() {
		let p = [1i64, 2, 3];
		let q = [4i64, 5];
		let split = KaratsubaSplit::new(&p, &q);
		assert_eq!(split.half, 2);
		assert_eq!(split.low_p(), &[1, 2]);
		assert_eq!(split.high_p(), &[3, 0]);
		assert_eq!(split.low_q(), &[4, 5]);
		assert_eq!(split.high_q(), &[0, 0]);
		assert_eq!(split.sum_p(), vec![4, 2]);
		assert_eq!(split.sum_q(), vec![4, 5]);
	}

	#[test]
	fn test_even_operand_is_borrowed_not_copied() {
		let p = vec![1i64, 2, 3, 4];
		let split = KaratsubaSplit::new(&p, &p);
		assert!(std::ptr::eq(split.low_p(), &p[..2]));
		assert!(std::ptr::eq(split.high_q(), &p[2..]));
	}

	#[test]
	fn test_recombine_one_level() {
		let p = [1i64, 3, -2];
		let q = [4i64, -1, 5];
		let split = KaratsubaSplit::new(&p, &q);

		let [r_high, r_mid_term, r_low] =
			[PartialProduct::High, PartialProduct::MidTerm, PartialProduct::Low].map(|product| {
				let (a, b) = split.operands(product);
				assert_eq!(a.len(), split.half);
				let r = convolve(&a, &b);
				assert!(r.len() <= split.max_partial_len());
				r
			});

		assert_eq!(split.recombine(&r_high, &r_mid_term, &r_low), vec![4, 11, -6, 17, -10]);
	}
}
