// Copyright 2024-2025 Irreducible Inc.

use polymul_core::PartialProduct;

use crate::Tag;

/// Rank of the participant that holds the operands and assembles the result.
pub const COORDINATOR: usize = 0;

/// Smallest cluster that can run distributed Karatsuba: the coordinator plus one worker per
/// partial product.
pub const MIN_KARATSUBA_PARTICIPANTS: usize = 1 + ROLE_TABLE.len();

/// Worker ranks and the partial product each computes.
pub const ROLE_TABLE: [Role; 3] = [
	Role::new(1, PartialProduct::High),
	Role::new(2, PartialProduct::Low),
	Role::new(3, PartialProduct::MidTerm),
];

/// The messages exchanged between the coordinator and one Karatsuba worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
	LeftOperand = 0,
	RightOperand = 1,
	PartialProduct = 2,
}

/// A Karatsuba worker's assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
	pub rank: usize,
	pub product: PartialProduct,
}

impl Role {
	pub const fn new(rank: usize, product: PartialProduct) -> Self {
		Self { rank, product }
	}

	/// Tag of `payload` on this role's channel: `10 * rank + payload`, so every role uses a
	/// distinct block of tags.
	pub fn tag(&self, payload: Payload) -> Tag {
		Tag(10 * self.rank as u32 + payload as u32)
	}
}

/// The Karatsuba role of `rank`, if it has one.
pub fn role_for_rank(rank: usize) -> Option<Role> {
	ROLE_TABLE.into_iter().find(|role| role.rank == rank)
}
