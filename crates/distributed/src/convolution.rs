// Copyright 2024-2025 Irreducible Inc.

//! Distributed data-parallel convolution: both operands are broadcast, each worker computes a
//! contiguous range of output coefficients and the coordinator concatenates the ranges.

use std::ops::Range;

use polymul_core::{mul_parallel_chunked, mul_parallel_range};
use polymul_math::{product_len, Coefficient};
use polymul_utils::ensure;
use tracing::{debug, instrument, warn};

use crate::{
	codec::{broadcast_poly, recv_poly, send_poly},
	roles::COORDINATOR,
	Error, Tag, Transport,
};

/// Tag of a worker's output range.
const RANGE_TAG: Tag = Tag(0);

/// Output coefficients computed by worker `worker` of `n_workers`.
///
/// Every worker gets `total / n_workers` coefficients in rank order and the last one also takes
/// the remainder.
pub fn worker_range(worker: usize, total: usize, n_workers: usize) -> Range<usize> {
	assert!(worker < n_workers, "worker {worker} out of range for {n_workers} workers");
	let chunk = total / n_workers;
	let start = worker * chunk;
	let end = if worker + 1 == n_workers {
		total
	} else {
		start + chunk
	};
	start..end
}

/// Multiplies the coordinator's `p` by `q` with every participant other than the coordinator
/// computing one output range on `n_threads` local tasks.
///
/// Every participant must call this. Only the coordinator gets `Some(product)`. A cluster of one
/// multiplies locally.
#[instrument(
	skip_all,
	level = "debug",
	fields(rank = transport.rank(), size = transport.size())
)]
pub fn mul_distributed_convolution<C: Coefficient>(
	transport: &mut impl Transport,
	p: &[C],
	q: &[C],
	n_threads: usize,
) -> Result<Option<Vec<C>>, Error> {
	let rank = transport.rank();
	if transport.size() < 2 {
		if rank != COORDINATOR {
			return Ok(None);
		}
		warn!(
			size = transport.size(),
			"too few participants for distributed convolution, multiplying locally"
		);
		return Ok(Some(mul_parallel_chunked(p, q, n_threads)));
	}

	let p = broadcast_poly(transport, COORDINATOR, p)?;
	let q = broadcast_poly(transport, COORDINATOR, q)?;
	let total = product_len(p.len(), q.len());
	let n_workers = transport.size() - 1;

	if rank != COORDINATOR {
		let range = worker_range(rank - 1, total, n_workers);
		debug!(?range, "computing output range");
		let coefficients = mul_parallel_range(&p, &q, range, n_threads);
		send_poly(&*transport, COORDINATOR, RANGE_TAG, &coefficients)?;
		return Ok(None);
	}

	let mut result = Vec::with_capacity(total);
	for worker in 0..n_workers {
		let peer = worker + 1;
		let expected = worker_range(worker, total, n_workers).len();
		let coefficients = recv_poly::<C>(transport, peer, RANGE_TAG)?;
		ensure!(
			coefficients.len() == expected,
			Error::UnexpectedResultLength {
				peer,
				tag: RANGE_TAG,
				expected,
				actual: coefficients.len(),
			}
		);
		result.extend(coefficients);
	}
	Ok(Some(result))
}
