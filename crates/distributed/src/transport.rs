// Copyright 2024-2025 Irreducible Inc.

use auto_impl::auto_impl;
use bytes::Bytes;

use crate::Error;

/// Message tag. Receipt is keyed by `(source, tag)`, so messages with different tags may be
/// received in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(pub u32);

impl Tag {
	/// Reserved for [`Transport::broadcast`].
	pub const BROADCAST: Self = Self(u32::MAX);
	/// Reserved for [`Transport::barrier`] implementations built on messages.
	pub const BARRIER: Self = Self(u32::MAX - 1);
}

/// Point-to-point messaging between a fixed set of participants numbered `0..size`.
///
/// Implementations must deliver messages reliably and in order for each `(sender, tag)` pair.
/// A transport value is this participant's handle on the cluster and is passed explicitly to every
/// protocol function.
#[auto_impl(&mut, Box)]
pub trait Transport {
	/// Index of this participant.
	fn rank(&self) -> usize;

	/// Number of participants.
	fn size(&self) -> usize;

	fn send(&self, dest: usize, tag: Tag, payload: Bytes) -> Result<(), Error>;

	/// Blocks until a message with `tag` from `source` is available.
	fn recv(&mut self, source: usize, tag: Tag) -> Result<Bytes, Error>;

	/// Blocks until every participant has entered the barrier. Fails instead of blocking forever
	/// when a participant leaves the cluster before entering it.
	fn barrier(&mut self) -> Result<(), Error>;

	/// Delivers the root's payload to every participant. Only the root supplies `payload`; every
	/// participant, the root included, gets it back.
	fn broadcast(&mut self, root: usize, payload: Option<Bytes>) -> Result<Bytes, Error> {
		if self.rank() != root {
			return self.recv(root, Tag::BROADCAST);
		}

		let payload = payload.ok_or(Error::MissingBroadcastPayload)?;
		for peer in (0..self.size()).filter(|&peer| peer != root) {
			self.send(peer, Tag::BROADCAST, payload.clone())?;
		}
		Ok(payload)
	}
}
