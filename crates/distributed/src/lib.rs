// Copyright 2024-2025 Irreducible Inc.

//! Coordinator/worker polynomial multiplication over a message-passing [`Transport`].
//!
//! Participant 0 is the coordinator: it holds the operands and is the only participant that gets
//! the product back. Two protocols are provided:
//!
//! * [`mul_distributed_karatsuba`]: one Karatsuba level, with the high, low and mid-term partial
//!   products computed by participants 1, 2 and 3
//! * [`mul_distributed_convolution`]: both operands are broadcast and every other participant
//!   computes a contiguous range of output coefficients
//!
//! [`LocalTransport`] runs a cluster as threads within one process.

mod codec;
mod convolution;
mod error;
mod karatsuba;
mod local;
mod roles;
mod transport;

pub use codec::*;
pub use convolution::*;
pub use error::*;
pub use karatsuba::*;
pub use local::*;
pub use roles::*;
pub use transport::*;
