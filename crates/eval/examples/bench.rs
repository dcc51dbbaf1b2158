// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Measures evaluations per second for both engines:
//
// ```bash
// $ cargo r --release --example bench -- --table rankings.dat
// lookup:     21493042 evals/sec
// twoplustwo: 159284023 evals/sec
// ```
//
// Without `--table` only the lookup engine is measured.
use clap::Parser;
use std::{path::PathBuf, time::Instant};

use showdown_eval::{Board, Evaluator, Hand, LookupEvaluator, TwoPlusTwoEvaluator};

#[derive(Debug, Parser)]
struct Cli {
    /// The number of evaluations per measurement.
    #[clap(long, short, default_value_t = 10_000_000)]
    runs: u32,
    /// Path to the Two-Plus-Two transition table file.
    #[clap(long, short)]
    table: Option<PathBuf>,
}

fn bench(name: &str, evaluator: &dyn Evaluator, runs: u32) {
    let hand = "AcAs".parse::<Hand>().unwrap();
    let board = "AdAhKsKcKd".parse::<Board>().unwrap();

    let started = Instant::now();
    let mut checksum = 0u64;
    for _ in 0..runs {
        checksum += evaluator.rank(&hand, &board) as u64;
    }

    let elapsed = started.elapsed().as_secs_f64();
    println!(
        "{name}: {:.0} evals/sec (checksum {checksum})",
        runs as f64 / elapsed
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let lookup = LookupEvaluator::new();
    bench("lookup", &lookup, cli.runs);

    if let Some(path) = &cli.table {
        let twoplustwo = TwoPlusTwoEvaluator::new(path)?;
        bench("twoplustwo", &twoplustwo, cli.runs);
    }

    Ok(())
}
