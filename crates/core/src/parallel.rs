// Copyright 2024-2025 Irreducible Inc.

//! Data-parallel convolution over the output index range.
//!
//! Output coefficients do not depend on each other, so the range can be cut into pieces that are
//! computed concurrently, each task writing only into its own disjoint slice of the result.

use std::{mem, ops::Range};

use polymul_math::{product_len, Coefficient};
use rayon::prelude::*;
use tracing::instrument;

use crate::sequential::coefficient_at;

/// Lengths of `n_chunks` contiguous chunks covering `total` elements.
///
/// The first `total % n_chunks` chunks get one extra element. A chunk count of zero is treated
/// as one.
pub fn chunk_lengths(total: usize, n_chunks: usize) -> impl Iterator<Item = usize> {
	let n_chunks = n_chunks.max(1);
	let base = total / n_chunks;
	let remainder = total % n_chunks;
	(0..n_chunks).map(move |k| base + usize::from(k < remainder))
}

/// Convolution split into `n_threads` contiguous output chunks, one task per chunk.
#[instrument(skip_all, level = "debug", fields(len_p = p.len(), len_q = q.len(), n_threads = n_threads))]
pub fn mul_parallel_chunked<C: Coefficient>(p: &[C], q: &[C], n_threads: usize) -> Vec<C> {
	mul_parallel_range(p, q, 0..product_len(p.len(), q.len()), n_threads)
}

/// Computes only the product coefficients with indices in `range`, split across `n_threads`
/// tasks. Element `i` of the result is coefficient `range.start + i` of the product.
///
/// ## Panics
///
/// Panics if `range` extends past the product length.
pub fn mul_parallel_range<C: Coefficient>(
	p: &[C],
	q: &[C],
	range: Range<usize>,
	n_threads: usize,
) -> Vec<C> {
	assert!(
		range.end <= product_len(p.len(), q.len()),
		"range {range:?} exceeds the product of lengths {} and {}",
		p.len(),
		q.len()
	);

	let mut result = vec![C::zero(); range.len()];
	rayon::scope(|s| {
		let mut rest = result.as_mut_slice();
		let mut start = range.start;
		for chunk_len in chunk_lengths(range.len(), n_threads) {
			let (chunk, tail) = mem::take(&mut rest).split_at_mut(chunk_len);
			rest = tail;
			if !chunk.is_empty() {
				s.spawn(move |_| {
					for (offset, slot) in chunk.iter_mut().enumerate() {
						*slot = coefficient_at(p, q, start + offset);
					}
				});
			}
			start += chunk_len;
		}
	});
	result
}

/// Convolution with one task per output coefficient.
#[instrument(skip_all, level = "debug", fields(len_p = p.len(), len_q = q.len()))]
pub fn mul_parallel_per_index<C: Coefficient>(p: &[C], q: &[C]) -> Vec<C> {
	(0..product_len(p.len(), q.len()))
		.into_par_iter()
		.map(|k| coefficient_at(p, q, k))
		.collect()
}
