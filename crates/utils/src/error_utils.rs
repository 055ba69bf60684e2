// Copyright 2024-2025 Irreducible Inc.

//! Early-return helpers shared by the workspace crates.
//!
//! With the `bail_panic` feature enabled, `bail!` panics at the failure site instead of
//! returning, which gives a backtrace pointing at the protocol step that failed.

#[cfg(feature = "bail_panic")]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		panic!("{}", $err);
	};
}

#[cfg(not(feature = "bail_panic"))]
#[macro_export]
macro_rules! bail {
	($err:expr) => {
		return Err($err.into());
	};
}

#[macro_export]
macro_rules! ensure {
	($cond:expr, $err:expr) => {
		if !$cond {
			$crate::bail!($err);
		}
	};
}
