// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Estimates heads-up equity for two hands:
//
// ```bash
// $ cargo r --release --example heads_up -- AcAs 9d9h --board 9c2c2h
// AcAs win 8.51% lose 91.08% split 0.41%
// 9d9h win 91.08% lose 8.51% split 0.41%
// ```
use anyhow::Result;
use clap::Parser;

use showdown_equity::{Board, EquityCalculator, Hand};

#[derive(Debug, Parser)]
struct Cli {
    /// The first hand.
    hero: Hand,
    /// The second hand.
    villain: Hand,
    /// Community cards already dealt, as in 9c2c2h.
    #[clap(long, short, default_value = "")]
    board: Board,
    /// The number of showdowns to sample.
    #[clap(long, short, default_value_t = 100_000)]
    samples: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let calc = EquityCalculator::new()
        .samples(cli.samples)
        .board(cli.board.clone());

    let hands = [cli.hero, cli.villain];
    for (hand, equity) in hands.iter().zip(calc.calculate(&hands)?) {
        println!(
            "{hand} win {:.2}% lose {:.2}% split {:.2}%",
            equity.win() * 100.0,
            equity.lose() * 100.0,
            equity.split() * 100.0,
        );
    }

    Ok(())
}
