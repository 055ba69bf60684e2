// Copyright 2024-2025 Irreducible Inc.

use std::sync::atomic::{AtomicUsize, Ordering};

/// A fixed-capacity counting gate on concurrently running branches.
///
/// Acquisition never blocks: when all permits are out, [`PermitPool::try_acquire`] returns `None`
/// and the caller is expected to do the work on its own thread instead.
#[derive(Debug)]
pub struct PermitPool {
	capacity: usize,
	in_use: AtomicUsize,
}

/// A permit taken from a [`PermitPool`]. Dropping it returns it to the pool.
#[derive(Debug)]
#[must_use = "dropping a permit releases it immediately"]
pub struct Permit<'a> {
	pool: &'a PermitPool,
}

impl PermitPool {
	pub fn new(capacity: usize) -> Self {
		Self {
			capacity,
			in_use: AtomicUsize::new(0),
		}
	}

	/// Takes a permit if one is free.
	pub fn try_acquire(&self) -> Option<Permit<'_>> {
		self.in_use
			.fetch_update(Ordering::AcqRel, Ordering::Acquire, |in_use| {
				(in_use < self.capacity).then_some(in_use + 1)
			})
			.ok()
			.map(|_| Permit { pool: self })
	}

	fn release(&self) {
		let prev = self.in_use.fetch_sub(1, Ordering::AcqRel);
		debug_assert!(prev > 0, "released more permits than were acquired");
	}
}

impl Permit<'_> {
	/// Returns the permit to its pool.
	pub fn release(self) {
		drop(self)
	}
}

impl Drop for Permit<'_> {
	fn drop(&mut self) {
		self.pool.release();
	}
}
