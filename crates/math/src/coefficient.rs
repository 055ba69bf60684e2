// Copyright 2024-2025 Irreducible Inc.

use std::fmt::Debug;

use num_bigint::BigInt;
use num_traits::{WrappingAdd, WrappingMul, WrappingSub, Zero};
use polymul_utils::serialization::{DeserializeBytes, SerializeBytes};

/// An element of the commutative ring the polynomial coefficients are drawn from.
///
/// Every strategy performs its arithmetic exclusively through this trait, so a strategy cannot
/// tell a bounded-width coefficient from an arbitrary-precision one. Fixed-width integers wrap on
/// overflow, i.e. they compute in $\mathbb{Z}/2^k\mathbb{Z}$. Karatsuba recombination is exact in
/// that ring, which keeps all strategies bit-identical even when intermediate sums overflow.
///
/// The serialization bounds let the distributed protocol ship coefficients between participants.
pub trait Coefficient:
	Clone + Debug + Eq + Ord + Send + Sync + SerializeBytes + DeserializeBytes + 'static
{
	fn zero() -> Self;

	/// Embeds a machine integer. Fixed-width types narrower than 64 bits truncate.
	fn from_i64(value: i64) -> Self;

	fn is_zero(&self) -> bool;

	fn add_assign_ref(&mut self, rhs: &Self);

	fn sub_assign_ref(&mut self, rhs: &Self);

	fn mul_ref(&self, rhs: &Self) -> Self;

	/// `self += lhs * rhs`
	#[inline]
	fn mul_add_assign(&mut self, lhs: &Self, rhs: &Self) {
		let term = lhs.mul_ref(rhs);
		self.add_assign_ref(&term);
	}
}

macro_rules! impl_wrapping_coefficient {
	($($ty:ty),* $(,)?) => {
		$(
			impl Coefficient for $ty {
				#[inline]
				fn zero() -> Self {
					0
				}

				#[inline]
				fn from_i64(value: i64) -> Self {
					value as $ty
				}

				#[inline]
				fn is_zero(&self) -> bool {
					*self == 0
				}

				#[inline]
				fn add_assign_ref(&mut self, rhs: &Self) {
					*self = <$ty as WrappingAdd>::wrapping_add(self, rhs);
				}

				#[inline]
				fn sub_assign_ref(&mut self, rhs: &Self) {
					*self = <$ty as WrappingSub>::wrapping_sub(self, rhs);
				}

				#[inline]
				fn mul_ref(&self, rhs: &Self) -> Self {
					<$ty as WrappingMul>::wrapping_mul(self, rhs)
				}
			}
		)*
	};
}

impl_wrapping_coefficient!(i32, i64, i128);

impl Coefficient for BigInt {
	fn zero() -> Self {
		Zero::zero()
	}

	fn from_i64(value: i64) -> Self {
		BigInt::from(value)
	}

	fn is_zero(&self) -> bool {
		Zero::is_zero(self)
	}

	fn add_assign_ref(&mut self, rhs: &Self) {
		*self += rhs;
	}

	fn sub_assign_ref(&mut self, rhs: &Self) {
		*self -= rhs;
	}

	fn mul_ref(&self, rhs: &Self) -> Self {
		self * rhs
	}
}
