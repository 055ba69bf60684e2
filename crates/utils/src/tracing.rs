// Copyright 2023 Irreducible Inc.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber: an `EnvFilter` read from `RUST_LOG` (defaulting to `info`)
/// followed by the formatting layer.
///
/// Calling it again after a subscriber is set is a no-op, so tests and binaries may both call it.
pub fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_thread_names(true))
		.try_init();
}
