// Copyright 2024-2025 Irreducible Inc.

//! Karatsuba multiplication: three half-size products per level instead of four.
//!
//! All three variants share [`KaratsubaSplit`] for splitting and recombination and differ only in
//! where the high and low sub-products run. The mid-term product always runs on the current task.

mod bounded;
mod split;
mod unbounded;

pub use bounded::*;
use polymul_math::{product_len, Coefficient};
pub use split::*;
use tracing::instrument;
pub use unbounded::*;

use crate::{sequential::convolve, MulConfig};

/// Single-threaded recursive Karatsuba multiplication.
#[instrument(skip_all, level = "debug", fields(len_p = p.len(), len_q = q.len()))]
pub fn mul_karatsuba<C: Coefficient>(p: &[C], q: &[C], config: &MulConfig) -> Vec<C> {
	karatsuba(p, q, config)
}

fn karatsuba<C: Coefficient>(p: &[C], q: &[C], config: &MulConfig) -> Vec<C> {
	if product_len(p.len(), q.len()) == 0 {
		return Vec::new();
	}
	if config.is_base_case(p.len(), q.len()) {
		return convolve(p, q);
	}

	let split = KaratsubaSplit::new(p, q);
	let r_high = karatsuba(split.high_p(), split.high_q(), config);
	let r_low = karatsuba(split.low_p(), split.low_q(), config);
	let r_mid_term = karatsuba(&split.sum_p(), &split.sum_q(), config);
	split.recombine(&r_high, &r_mid_term, &r_low)
}
