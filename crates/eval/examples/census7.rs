// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Counts hand categories over all 133,784,560 seven-card hands:
//
// ```bash
// $ cargo r --release --example census7
// ...
// High Card:       23294460
// One  Pair:       58627800
// Two Pairs:       31433400
// Three of a Kind: 6461620
// Straight:        6180020
// Flush:           4047644
// Full House:      3473184
// Four of a Kind:  224848
// Straight Flush:  41584
// ```
use std::time::Instant;

use showdown_eval::{Board, Deck, Evaluator, Hand, HandRank, LookupEvaluator};

#[rustfmt::skip]
fn main() {
    env_logger::init();

    let evaluator = LookupEvaluator::new();

    let now = Instant::now();
    let mut counts = [0u64; 9];

    Deck::default().for_each(7, |cards| {
        let hand = Hand::new(cards[0], cards[1]).expect("distinct deck cards");
        let board = Board::new(&cards[2..]).expect("distinct deck cards");
        counts[evaluator.value(&hand, &board) as usize] += 1;
    });

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<u64>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    println!("High Card:       {}", counts[HandRank::HighCard as usize]);
    println!("One  Pair:       {}", counts[HandRank::OnePair as usize]);
    println!("Two Pairs:       {}", counts[HandRank::TwoPair as usize]);
    println!("Three of a Kind: {}", counts[HandRank::ThreeOfAKind as usize]);
    println!("Straight:        {}", counts[HandRank::Straight as usize]);
    println!("Flush:           {}", counts[HandRank::Flush as usize]);
    println!("Full House:      {}", counts[HandRank::FullHouse as usize]);
    println!("Four of a Kind:  {}", counts[HandRank::FourOfAKind as usize]);
    println!("Straight Flush:  {}", counts[HandRank::StraightFlush as usize]);
}
