// Copyright 2024-2025 Irreducible Inc.

//! One-level distributed Karatsuba: the coordinator splits the operands once and hands each of
//! the three partial products to its own worker, which multiplies locally with bounded Karatsuba.

use polymul_core::{mul_karatsuba_bounded, mul_sequential, KaratsubaSplit, MulConfig, PartialProduct};
use polymul_math::Coefficient;
use polymul_utils::ensure;
use tracing::{debug, instrument, warn};

use crate::{
	codec::{recv_poly, send_poly},
	roles::{role_for_rank, Payload, Role, COORDINATOR, MIN_KARATSUBA_PARTICIPANTS, ROLE_TABLE},
	Error, Transport,
};

/// Multiplies `p` by `q` across the cluster.
///
/// Every participant must call this. Only the coordinator's operands are read and only the
/// coordinator gets `Some(product)`; every other participant returns `None` once its part is done.
///
/// With fewer than four participants the coordinator multiplies locally and no messages are
/// exchanged. When the operands are below `config`'s cutoff the coordinator still completes an
/// empty exchange with each worker and then multiplies directly.
#[instrument(
	skip_all,
	level = "debug",
	fields(rank = transport.rank(), size = transport.size())
)]
pub fn mul_distributed_karatsuba<C: Coefficient>(
	transport: &mut impl Transport,
	p: &[C],
	q: &[C],
	config: &MulConfig,
) -> Result<Option<Vec<C>>, Error> {
	let rank = transport.rank();
	if transport.size() < MIN_KARATSUBA_PARTICIPANTS {
		if rank != COORDINATOR {
			return Ok(None);
		}
		warn!(
			size = transport.size(),
			required = MIN_KARATSUBA_PARTICIPANTS,
			"too few participants for distributed Karatsuba, multiplying locally"
		);
		return Ok(Some(mul_karatsuba_bounded(p, q, config)));
	}

	if rank == COORDINATOR {
		return coordinate(transport, p, q, config).map(Some);
	}
	if let Some(role) = role_for_rank(rank) {
		work::<C>(transport, role, config)?;
	}
	Ok(None)
}

fn coordinate<C: Coefficient>(
	transport: &mut impl Transport,
	p: &[C],
	q: &[C],
	config: &MulConfig,
) -> Result<Vec<C>, Error> {
	if config.is_base_case(p.len(), q.len()) {
		debug!("operands below cutoff, exchanging empty payloads");
		for role in ROLE_TABLE {
			send_poly::<C>(&*transport, role.rank, role.tag(Payload::LeftOperand), &[])?;
			send_poly::<C>(&*transport, role.rank, role.tag(Payload::RightOperand), &[])?;
		}
		for role in ROLE_TABLE {
			recv_partial::<C>(transport, role, 0)?;
		}
		return Ok(mul_sequential(p, q));
	}

	let split = KaratsubaSplit::new(p, q);
	for role in ROLE_TABLE {
		let (left, right) = split.operands(role.product);
		send_poly(&*transport, role.rank, role.tag(Payload::LeftOperand), &left)?;
		send_poly(&*transport, role.rank, role.tag(Payload::RightOperand), &right)?;
	}

	let mut partials = PartialProducts::default();
	for role in ROLE_TABLE {
		let partial = recv_partial(transport, role, split.max_partial_len())?;
		*partials.get_mut(role.product) = partial;
	}
	Ok(split.recombine(&partials.high, &partials.mid_term, &partials.low))
}

/// Receives `role`'s partial product, which may not be longer than `max_len`.
fn recv_partial<C: Coefficient>(
	transport: &mut impl Transport,
	role: Role,
	max_len: usize,
) -> Result<Vec<C>, Error> {
	let tag = role.tag(Payload::PartialProduct);
	let partial = recv_poly(transport, role.rank, tag)?;
	ensure!(
		partial.len() <= max_len,
		Error::UnexpectedResultLength {
			peer: role.rank,
			tag,
			expected: max_len,
			actual: partial.len(),
		}
	);
	Ok(partial)
}

fn work<C: Coefficient>(
	transport: &mut impl Transport,
	role: Role,
	config: &MulConfig,
) -> Result<(), Error> {
	let left = recv_poly::<C>(transport, COORDINATOR, role.tag(Payload::LeftOperand))?;
	let right = recv_poly::<C>(transport, COORDINATOR, role.tag(Payload::RightOperand))?;
	debug!(
		product = ?role.product,
		len_left = left.len(),
		len_right = right.len(),
		"computing partial product"
	);

	let partial = mul_karatsuba_bounded(&left, &right, config);
	send_poly(&*transport, COORDINATOR, role.tag(Payload::PartialProduct), &partial)
}

struct PartialProducts<C> {
	high: Vec<C>,
	low: Vec<C>,
	mid_term: Vec<C>,
}

impl<C> Default for PartialProducts<C> {
	fn default() -> Self {
		Self {
			high: Vec::new(),
			low: Vec::new(),
			mid_term: Vec::new(),
		}
	}
}

impl<C> PartialProducts<C> {
	fn get_mut(&mut self, product: PartialProduct) -> &mut Vec<C> {
		match product {
			PartialProduct::High => &mut self.high,
			PartialProduct::Low => &mut self.low,
			PartialProduct::MidTerm => &mut self.mid_term,
		}
	}
}
