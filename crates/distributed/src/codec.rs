// Copyright 2024-2025 Irreducible Inc.

//! Polynomials on the wire.
//!
//! A polynomial travels as one message holding its coefficient count followed by the coefficients
//! (see [`polymul_utils::serialization`]). A broadcast polynomial is announced by a first message
//! carrying the encoded byte length.

use std::borrow::Cow;

use polymul_math::Coefficient;
use polymul_utils::{
	ensure,
	serialization::{from_bytes, to_bytes},
};
use tracing::debug;

use crate::{Error, Tag, Transport};

pub fn send_poly<C: Coefficient>(
	transport: &impl Transport,
	dest: usize,
	tag: Tag,
	poly: &[C],
) -> Result<(), Error> {
	let payload = to_bytes(poly)?;
	debug!(dest, ?tag, len = poly.len(), n_bytes = payload.len(), "sending polynomial");
	transport.send(dest, tag, payload)
}

pub fn recv_poly<C: Coefficient>(
	transport: &mut impl Transport,
	source: usize,
	tag: Tag,
) -> Result<Vec<C>, Error> {
	let payload = transport.recv(source, tag)?;
	Ok(from_bytes(&payload)?)
}

/// Broadcasts `poly` from `root` to every participant.
///
/// Only the root's `poly` is read; the root gets it back borrowed and every other participant gets
/// the decoded copy.
pub fn broadcast_poly<'a, C: Coefficient>(
	transport: &mut impl Transport,
	root: usize,
	poly: &'a [C],
) -> Result<Cow<'a, [C]>, Error> {
	if transport.rank() == root {
		let payload = to_bytes(poly)?;
		debug!(root, len = poly.len(), n_bytes = payload.len(), "broadcasting polynomial");
		transport.broadcast(root, Some(to_bytes(&(payload.len() as u64))?))?;
		transport.broadcast(root, Some(payload))?;
		return Ok(Cow::Borrowed(poly));
	}

	let expected = from_bytes::<u64>(&transport.broadcast(root, None)?)? as usize;
	let payload = transport.broadcast(root, None)?;
	ensure!(
		payload.len() == expected,
		Error::UnexpectedBroadcastLength {
			expected,
			actual: payload.len()
		}
	);
	Ok(Cow::Owned(from_bytes(&payload)?))
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use bytes::Bytes;
	use num_bigint::BigInt;
	use polymul_math::test_utils::poly_from_i64;

	use super::*;
	use crate::{run_local_cluster, LocalTransport};

	#[test]
	fn test_send_and_receive_bigint_poly() {
		let poly = poly_from_i64::<BigInt>(&[3, -1, 0, 7]);
		let mut cluster = LocalTransport::cluster(2);
		let mut receiver = cluster.pop().unwrap();
		let sender = cluster.pop().unwrap();

		send_poly(&sender, 1, Tag(4), &poly).unwrap();
		send_poly::<BigInt>(&sender, 1, Tag(5), &[]).unwrap();

		assert!(recv_poly::<BigInt>(&mut receiver, 0, Tag(5)).unwrap().is_empty());
		assert_eq!(recv_poly::<BigInt>(&mut receiver, 0, Tag(4)).unwrap(), poly);
	}

	#[test]
	fn test_broadcast_poly_reaches_every_participant() {
		let poly = poly_from_i64::<i64>(&[1, 2, 3, 4, 5]);
		let results = run_local_cluster(3, |mut transport| {
			let own = if transport.rank() == 1 { poly.clone() } else { Vec::new() };
			let received = broadcast_poly(&mut transport, 1, &own).unwrap();
			(matches!(received, Cow::Borrowed(_)), received.into_owned())
		})
		.unwrap();

		for (rank, (borrowed, received)) in results.into_iter().enumerate() {
			assert_eq!(borrowed, rank == 1);
			assert_eq!(received, poly);
		}
	}

	#[test]
	fn test_broadcast_length_mismatch() {
		let mut cluster = LocalTransport::cluster(2);
		let mut receiver = cluster.pop().unwrap();
		let root = cluster.pop().unwrap();

		root.send(1, Tag::BROADCAST, to_bytes(&100u64).unwrap()).unwrap();
		root.send(1, Tag::BROADCAST, Bytes::from_static(&[0; 8])).unwrap();

		assert_matches!(
			broadcast_poly::<i64>(&mut receiver, 0, &[]),
			Err(Error::UnexpectedBroadcastLength {
				expected: 100,
				actual: 8
			})
		);
	}

	#[test]
	fn test_malformed_payload() {
		let mut cluster = LocalTransport::cluster(2);
		let mut receiver = cluster.pop().unwrap();
		let sender = cluster.pop().unwrap();

		sender.send(1, Tag(0), Bytes::from_static(&[1, 2, 3])).unwrap();
		assert_matches!(
			recv_poly::<i64>(&mut receiver, 0, Tag(0)),
			Err(Error::Serialization(_))
		);
	}
}
