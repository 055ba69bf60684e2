// Copyright 2024-2025 Irreducible Inc.

use polymul_utils::{env::usize_env_var, rayon::default_max_tasks};

/// Operand length below which Karatsuba recursion falls back to direct convolution.
pub const DEFAULT_KARATSUBA_CUTOFF: usize = 64;

/// Environment variable that overrides [`DEFAULT_KARATSUBA_CUTOFF`] in [`MulConfig::from_env`].
pub const CUTOFF_ENV_VAR: &str = "POLYMUL_CUTOFF";

/// Splitting operands shorter than this cannot shrink them, so it is a floor on the cutoff.
const MIN_EFFECTIVE_CUTOFF: usize = 2;

/// Tuning parameters shared by the multiplication strategies.
///
/// Neither parameter affects the result, only how it is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MulConfig {
	cutoff: usize,
	max_tasks: usize,
}

impl MulConfig {
	pub fn new(cutoff: usize, max_tasks: usize) -> Self {
		Self { cutoff, max_tasks }
	}

	/// Default configuration with the cutoff taken from `POLYMUL_CUTOFF` when it is set.
	pub fn from_env() -> Self {
		let config = Self::default();
		match usize_env_var(CUTOFF_ENV_VAR) {
			Some(cutoff) => config.with_cutoff(cutoff),
			None => config,
		}
	}

	pub fn with_cutoff(self, cutoff: usize) -> Self {
		Self { cutoff, ..self }
	}

	pub fn with_max_tasks(self, max_tasks: usize) -> Self {
		Self { max_tasks, ..self }
	}

	/// The configured cutoff. A value below 2 behaves as 2.
	pub fn cutoff(&self) -> usize {
		self.cutoff
	}

	/// Capacity of the permit pool for the bounded strategies, and the chunk count of the
	/// fixed-thread data-parallel convolution.
	pub fn max_tasks(&self) -> usize {
		self.max_tasks
	}

	/// Whether operands of these lengths are multiplied directly rather than split.
	#[inline]
	pub fn is_base_case(&self, len_p: usize, len_q: usize) -> bool {
		len_p.min(len_q) < self.cutoff.max(MIN_EFFECTIVE_CUTOFF)
	}
}

impl Default for MulConfig {
	fn default() -> Self {
		Self::new(DEFAULT_KARATSUBA_CUTOFF, default_max_tasks())
	}
}
