// Copyright 2024-2025 Irreducible Inc.

//! An in-process cluster: every participant runs on its own thread and owns one end of a
//! dedicated channel to each peer.
//!
//! A participant leaves the cluster by dropping its [`LocalTransport`]. Its peers then see
//! [`Error::Disconnected`] from any receive, or barrier, that would otherwise wait on it.

use std::{
	collections::{HashMap, VecDeque},
	thread,
};

use bytes::Bytes;
use crossbeam_channel::{unbounded, Receiver, Sender};
use polymul_utils::ensure;

use crate::{Error, Tag, Transport};

/// One participant's endpoint in an in-process cluster created by [`LocalTransport::cluster`].
#[derive(Debug)]
pub struct LocalTransport {
	rank: usize,
	/// `outboxes[dest]` carries messages from this participant to `dest`.
	outboxes: Vec<Sender<(Tag, Bytes)>>,
	/// `inboxes[source]` carries messages from `source` to this participant.
	inboxes: Vec<Receiver<(Tag, Bytes)>>,
	/// Messages already taken off an inbox while looking for a different tag.
	pending: HashMap<(usize, Tag), VecDeque<Bytes>>,
}

impl LocalTransport {
	/// Connects `size` participants pairwise and returns their endpoints ordered by rank.
	pub fn cluster(size: usize) -> Vec<Self> {
		// channels[source][dest]
		let (senders, receivers): (Vec<Vec<_>>, Vec<Vec<_>>) = (0..size)
			.map(|_| (0..size).map(|_| unbounded()).unzip())
			.unzip();

		let mut inboxes_by_dest = (0..size).map(|_| Vec::with_capacity(size)).collect::<Vec<_>>();
		for row in receivers {
			for (dest, receiver) in row.into_iter().enumerate() {
				inboxes_by_dest[dest].push(receiver);
			}
		}

		senders
			.into_iter()
			.zip(inboxes_by_dest)
			.enumerate()
			.map(|(rank, (outboxes, inboxes))| Self {
				rank,
				outboxes,
				inboxes,
				pending: HashMap::new(),
			})
			.collect()
	}

	fn check_peer(&self, peer: usize) -> Result<(), Error> {
		ensure!(
			peer < self.size(),
			Error::PeerOutOfRange {
				peer,
				size: self.size()
			}
		);
		Ok(())
	}
}

impl Transport for LocalTransport {
	fn rank(&self) -> usize {
		self.rank
	}

	fn size(&self) -> usize {
		self.outboxes.len()
	}

	fn send(&self, dest: usize, tag: Tag, payload: Bytes) -> Result<(), Error> {
		self.check_peer(dest)?;
		self.outboxes[dest]
			.send((tag, payload))
			.map_err(|_| Error::Disconnected { peer: dest })
	}

	fn recv(&mut self, source: usize, tag: Tag) -> Result<Bytes, Error> {
		self.check_peer(source)?;
		if let Some(payload) = self
			.pending
			.get_mut(&(source, tag))
			.and_then(VecDeque::pop_front)
		{
			return Ok(payload);
		}

		loop {
			let (received_tag, payload) = self.inboxes[source]
				.recv()
				.map_err(|_| Error::Disconnected { peer: source })?;
			if received_tag == tag {
				return Ok(payload);
			}
			self.pending
				.entry((source, received_tag))
				.or_default()
				.push_back(payload);
		}
	}

	/// Every participant sends one token to each peer and then waits for one token from each.
	fn barrier(&mut self) -> Result<(), Error> {
		let rank = self.rank;
		let peers = (0..self.size()).filter(|&peer| peer != rank).collect::<Vec<_>>();
		for &peer in &peers {
			self.send(peer, Tag::BARRIER, Bytes::new())?;
		}
		for &peer in &peers {
			self.recv(peer, Tag::BARRIER)?;
		}
		Ok(())
	}
}

/// Runs `participant` once per rank of a fresh `size`-participant cluster, each on its own named
/// thread, and returns the results ordered by rank.
pub fn run_local_cluster<R, F>(size: usize, participant: F) -> Result<Vec<R>, Error>
where
	F: Fn(LocalTransport) -> R + Sync,
	R: Send,
{
	let participant = &participant;
	thread::scope(|s| {
		let handles = LocalTransport::cluster(size)
			.into_iter()
			.map(|transport| {
				thread::Builder::new()
					.name(format!("participant-{}", transport.rank()))
					.spawn_scoped(s, move || participant(transport))
			})
			.collect::<Result<Vec<_>, _>>()?;

		// Join every participant before reporting any failure.
		let joined = handles
			.into_iter()
			.map(|handle| handle.join())
			.collect::<Vec<_>>();
		joined
			.into_iter()
			.enumerate()
			.map(|(rank, result)| result.map_err(|_| Error::ParticipantPanicked { rank }))
			.collect()
	})
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;

	use super::*;

	#[test]
	fn test_receipt_is_keyed_by_tag() {
		let mut cluster = LocalTransport::cluster(2);
		let mut receiver = cluster.pop().unwrap();
		let sender = cluster.pop().unwrap();

		sender.send(1, Tag(1), Bytes::from_static(b"first")).unwrap();
		sender.send(1, Tag(2), Bytes::from_static(b"second")).unwrap();
		sender.send(1, Tag(1), Bytes::from_static(b"third")).unwrap();

		assert_eq!(receiver.recv(0, Tag(2)).unwrap(), "second");
		assert_eq!(receiver.recv(0, Tag(1)).unwrap(), "first");
		assert_eq!(receiver.recv(0, Tag(1)).unwrap(), "third");
	}

	#[test]
	fn test_self_send() {
		let mut transport = LocalTransport::cluster(1).pop().unwrap();
		transport.send(0, Tag(7), Bytes::from_static(b"loop")).unwrap();
		assert_eq!(transport.recv(0, Tag(7)).unwrap(), "loop");
	}

	#[test]
	fn test_out_of_range_peer() {
		let mut transport = LocalTransport::cluster(2).pop().unwrap();
		assert_matches!(
			transport.send(2, Tag(0), Bytes::new()),
			Err(Error::PeerOutOfRange { peer: 2, size: 2 })
		);
		assert_matches!(transport.recv(5, Tag(0)), Err(Error::PeerOutOfRange { peer: 5, .. }));
	}

	#[test]
	fn test_dropped_peer_is_reported() {
		let mut cluster = LocalTransport::cluster(2);
		let mut survivor = cluster.remove(0);
		drop(cluster);

		assert_matches!(survivor.recv(1, Tag(0)), Err(Error::Disconnected { peer: 1 }));
		assert_matches!(
			survivor.send(1, Tag(0), Bytes::new()),
			Err(Error::Disconnected { peer: 1 })
		);
	}

	#[test]
	fn test_broadcast_and_barrier() {
		let results = run_local_cluster(4, |mut transport| {
			let payload = (transport.rank() == 2).then(|| Bytes::from_static(b"hello"));
			let received = transport.broadcast(2, payload).unwrap();
			transport.barrier().unwrap();
			received
		})
		.unwrap();

		assert!(results.iter().all(|payload| payload == "hello"));
	}

	#[test]
	fn test_broadcast_root_needs_payload() {
		let mut transport = LocalTransport::cluster(1).pop().unwrap();
		assert_matches!(transport.broadcast(0, None), Err(Error::MissingBroadcastPayload));
	}

	#[test]
	fn test_barrier_is_reusable() {
		let results = run_local_cluster(3, |mut transport| {
			for round in 0..5u32 {
				let token = Bytes::copy_from_slice(&round.to_le_bytes());
				let payload = (transport.rank() == 0).then(|| token.clone());
				assert_eq!(transport.broadcast(0, payload).unwrap(), token);
				transport.barrier().unwrap();
			}
		})
		.unwrap();
		assert_eq!(results.len(), 3);
	}

	#[test]
	fn test_barrier_fails_when_a_participant_leaves() {
		let results = run_local_cluster(3, |mut transport| {
			if transport.rank() == 2 {
				// Leaves without entering the barrier.
				return Ok(());
			}
			transport.barrier()
		})
		.unwrap();

		assert_matches!(results[0], Err(Error::Disconnected { .. }));
		assert_matches!(results[1], Err(Error::Disconnected { .. }));
		assert_matches!(results[2], Ok(()));
	}

	#[test]
	fn test_panicking_participant() {
		let result = run_local_cluster(2, |transport| {
			if transport.rank() == 1 {
				panic!("boom");
			}
		});
		assert_matches!(result, Err(Error::ParticipantPanicked { rank: 1 }));
	}
}
