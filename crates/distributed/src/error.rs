// Copyright 2024-2025 Irreducible Inc.

use crate::Tag;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("participant {peer} is out of range for a cluster of {size}")]
	PeerOutOfRange { peer: usize, size: usize },
	#[error("participant {peer} disconnected")]
	Disconnected { peer: usize },
	#[error("the broadcast root must supply a payload")]
	MissingBroadcastPayload,
	#[error("broadcast announced {expected} bytes but delivered {actual}")]
	UnexpectedBroadcastLength { expected: usize, actual: usize },
	#[error("message {tag:?} from participant {peer} has {actual} coefficients, expected {expected}")]
	UnexpectedResultLength {
		peer: usize,
		tag: Tag,
		expected: usize,
		actual: usize,
	},
	#[error("participant {rank} panicked")]
	ParticipantPanicked { rank: usize },
	#[error("failed to spawn participant thread: {0}")]
	Spawn(#[from] std::io::Error),
	#[error("serialization error: {0}")]
	Serialization(#[from] polymul_utils::serialization::Error),
}
