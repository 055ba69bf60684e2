// Copyright 2024-2025 Irreducible Inc.

//! Polynomial multiplication strategies over a common [`Coefficient`] ring.
//!
//! Every strategy returns exactly the coefficient vector that [`mul_sequential`] returns for the
//! same operands, of length `len(p) + len(q) - 1` (or empty if either operand is empty):
//!
//! * [`mul_sequential`]: schoolbook convolution, the reference
//! * [`mul_parallel_chunked`], [`mul_parallel_per_index`]: data-parallel convolution over output
//!   indices
//! * [`mul_karatsuba`]: recursive Karatsuba
//! * [`mul_karatsuba_bounded`]: Karatsuba with branch concurrency gated by a [`PermitPool`]
//! * [`mul_karatsuba_unbounded`]: Karatsuba spawning at every level
//!
//! [`Coefficient`]: polymul_math::Coefficient

mod config;
pub mod karatsuba;
mod parallel;
mod permit_pool;
mod sequential;
mod strategy;

pub use config::*;
pub use karatsuba::{
	mul_karatsuba, mul_karatsuba_bounded, mul_karatsuba_unbounded, mul_karatsuba_with_pool,
	KaratsubaSplit, PartialProduct,
};
pub use parallel::*;
pub use permit_pool::*;
pub use sequential::{coefficient_at, mul_sequential};
pub use strategy::*;
