// Copyright 2024-2025 Irreducible Inc.

use std::fmt;

use polymul_math::Coefficient;

use crate::{
	mul_karatsuba, mul_karatsuba_bounded, mul_karatsuba_unbounded, mul_parallel_chunked,
	mul_parallel_per_index, mul_sequential, MulConfig,
};

/// The single-process multiplication strategies.
///
/// All of them compute the same product; they differ only in algorithm and in how the work is
/// spread over threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
	/// Schoolbook convolution on the calling thread.
	Sequential,
	/// Schoolbook convolution with the output split into `max_tasks` contiguous chunks.
	ParallelChunked,
	/// Schoolbook convolution with one task per output coefficient.
	ParallelPerIndex,
	/// Recursive Karatsuba on the calling thread.
	Karatsuba,
	/// Karatsuba with at most `max_tasks` concurrently spawned branches.
	KaratsubaBounded,
	/// Karatsuba spawning two tasks at every level.
	KaratsubaUnbounded,
}

impl Strategy {
	pub const ALL: [Self; 6] = [
		Self::Sequential,
		Self::ParallelChunked,
		Self::ParallelPerIndex,
		Self::Karatsuba,
		Self::KaratsubaBounded,
		Self::KaratsubaUnbounded,
	];

	pub const fn name(self) -> &'static str {
		match self {
			Self::Sequential => "sequential",
			Self::ParallelChunked => "parallel-chunked",
			Self::ParallelPerIndex => "parallel-per-index",
			Self::Karatsuba => "karatsuba",
			Self::KaratsubaBounded => "karatsuba-bounded",
			Self::KaratsubaUnbounded => "karatsuba-unbounded",
		}
	}

	pub fn multiply<C: Coefficient>(self, p: &[C], q: &[C], config: &MulConfig) -> Vec<C> {
		match self {
			Self::Sequential => mul_sequential(p, q),
			Self::ParallelChunked => mul_parallel_chunked(p, q, config.max_tasks()),
			Self::ParallelPerIndex => mul_parallel_per_index(p, q),
			Self::Karatsuba => mul_karatsuba(p, q, config),
			Self::KaratsubaBounded => mul_karatsuba_bounded(p, q, config),
			Self::KaratsubaUnbounded => mul_karatsuba_unbounded(p, q, config),
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
