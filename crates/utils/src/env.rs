// Copyright 2024 Irreducible Inc.

/// Read a non-negative integer from the environment variable.
///
/// Unset variables yield `None`. Values that fail to parse are logged and ignored.
pub fn usize_env_var(name: &str) -> Option<usize> {
	let val = std::env::var(name).ok()?;
	match val.trim().parse() {
		Ok(parsed) => Some(parsed),
		Err(err) => {
			tracing::warn!(name, value = %val, %err, "ignoring malformed environment variable");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unset_variable() {
		assert_eq!(usize_env_var("POLYMUL_TEST_SURELY_UNSET_VAR"), None);
	}
}
