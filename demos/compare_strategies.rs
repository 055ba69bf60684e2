// Copyright 2024-2025 Irreducible Inc.

use std::time::{Duration, Instant};

use anyhow::{ensure, Result};
use clap::{value_parser, Parser};
use num_bigint::BigInt;
use polymul_core::{mul_sequential, MulConfig, Strategy};
use polymul_distributed::{
	mul_distributed_convolution, mul_distributed_karatsuba, run_local_cluster, Error,
	LocalTransport, Transport, COORDINATOR,
};
use polymul_math::{are_equal, test_utils::random_poly, Coefficient};
use polymul_utils::{rayon::adjust_thread_pool, tracing::init_tracing};
use rand::{rngs::StdRng, SeedableRng};

#[derive(Debug, Parser)]
struct Args {
	/// Number of coefficients of the first operand.
	#[arg(long, default_value_t = 10_000)]
	len_p: usize,
	/// Number of coefficients of the second operand.
	#[arg(long, default_value_t = 10_000)]
	len_q: usize,
	/// Coefficients are drawn uniformly from `-max_val..max_val`.
	#[arg(long, default_value_t = 1000, value_parser = value_parser!(i64).range(1..))]
	max_val: i64,
	/// Size of the in-process cluster used for the distributed runs.
	#[arg(short, long, default_value_t = 4, value_parser = value_parser!(u64).range(1..))]
	participants: u64,
	/// Operand length below which Karatsuba multiplies directly. Defaults to `POLYMUL_CUTOFF`, or
	/// 64 when that is unset.
	#[arg(long)]
	cutoff: Option<usize>,
	/// Concurrency limit of the bounded strategies. Defaults to the rayon thread count.
	#[arg(long)]
	max_tasks: Option<usize>,
	/// Use arbitrary-precision coefficients instead of 64-bit wrapping ones.
	#[arg(long)]
	bigint: bool,
	#[arg(long, default_value_t = 0)]
	seed: u64,
}

fn main() -> Result<()> {
	adjust_thread_pool()
		.as_ref()
		.expect("failed to init thread pool");

	let args = Args::parse();

	init_tracing();

	if args.bigint {
		run::<BigInt>(&args)
	} else {
		run::<i64>(&args)
	}
}

fn run<C: Coefficient>(args: &Args) -> Result<()> {
	let mut config = MulConfig::from_env();
	if let Some(cutoff) = args.cutoff {
		config = config.with_cutoff(cutoff);
	}
	if let Some(max_tasks) = args.max_tasks {
		config = config.with_max_tasks(max_tasks);
	}

	let mut rng = StdRng::seed_from_u64(args.seed);
	let p = random_poly::<C>(&mut rng, args.len_p, args.max_val);
	let q = random_poly::<C>(&mut rng, args.len_q, args.max_val);
	println!(
		"Multiplying polynomials of {} and {} coefficients, cutoff {}, {} tasks",
		p.len(),
		q.len(),
		config.cutoff(),
		config.max_tasks()
	);

	let expected = {
		let _scope = tracing::info_span!("reference product").entered();
		mul_sequential(&p, &q)
	};

	for strategy in Strategy::ALL {
		let start = Instant::now();
		let product = strategy.multiply(&p, &q, &config);
		report(strategy.name(), start.elapsed(), &product, &expected)?;
	}

	let participants = args.participants as usize;
	let results = run_local_cluster(participants, |mut transport| {
		run_participant(&mut transport, &p, &q, &config)
	})?;
	for result in results {
		if let Some(timings) = result? {
			for (name, elapsed, product) in timings {
				let name = format!("{name} ({participants} participants)");
				report(&name, elapsed, &product, &expected)?;
			}
		}
	}

	Ok(())
}

type Timing<C> = (&'static str, Duration, Vec<C>);

/// Runs both distributed protocols, each between two barriers so that the coordinator's timing
/// covers every participant.
fn run_participant<C: Coefficient>(
	transport: &mut LocalTransport,
	p: &[C],
	q: &[C],
	config: &MulConfig,
) -> Result<Option<Vec<Timing<C>>>, Error> {
	let (p, q) = if transport.rank() == COORDINATOR {
		(p, q)
	} else {
		(&[][..], &[][..])
	};

	transport.barrier()?;
	let start = Instant::now();
	let convolution = mul_distributed_convolution(&mut *transport, p, q, config.max_tasks())?;
	transport.barrier()?;
	let convolution_elapsed = start.elapsed();

	let start = Instant::now();
	let karatsuba = mul_distributed_karatsuba(&mut *transport, p, q, config)?;
	transport.barrier()?;
	let karatsuba_elapsed = start.elapsed();

	Ok(convolution.zip(karatsuba).map(|(convolution, karatsuba)| {
		vec![
			("distributed convolution", convolution_elapsed, convolution),
			("distributed Karatsuba", karatsuba_elapsed, karatsuba),
		]
	}))
}

fn report<C: Coefficient>(
	name: &str,
	elapsed: Duration,
	product: &[C],
	expected: &[C],
) -> Result<()> {
	println!("{name:>40}: {elapsed:?}");
	ensure!(are_equal(product, expected), "{name} disagrees with the sequential product");
	Ok(())
}
