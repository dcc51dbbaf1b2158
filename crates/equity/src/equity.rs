// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Monte-Carlo equity estimation.
use ahash::AHashSet;
use anyhow::{Result, bail, ensure};
use rand::prelude::*;
use std::thread;

use showdown_cards::{Board, Card, Deck, Hand};
use showdown_eval::{Evaluator, LookupEvaluator};

use crate::Range;

/// Per-hand wins and splits over a number of trials.
type Tally = Vec<(u64, u64)>;

/// Showdown rates for a hand or range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Equity {
    win: f64,
    lose: f64,
    split: f64,
}

impl Equity {
    fn new(tally: (u64, u64), trials: u64) -> Self {
        let (wins, splits) = tally;
        Self {
            win: wins as f64 / trials as f64,
            lose: (trials - wins - splits) as f64 / trials as f64,
            split: splits as f64 / trials as f64,
        }
    }

    /// The rate this player wins the pot alone.
    pub fn win(&self) -> f64 {
        self.win
    }

    /// The rate this player loses the pot.
    pub fn lose(&self) -> f64 {
        self.lose
    }

    /// The rate this player splits the pot.
    pub fn split(&self) -> f64 {
        self.split
    }
}

/// Estimates showdown equity by sampling runouts.
///
/// The calculator deals the missing community cards for each trial, ranks
/// every player with its evaluator, and tallies wins and splits. It follows
/// the lookup engine's convention that lower ranks are stronger, so a
/// substituted evaluator must rank in the same direction.
///
/// Trials fan out over scoped threads, one tally per task.
pub struct EquityCalculator<E = LookupEvaluator> {
    evaluator: E,
    samples: usize,
    tasks: usize,
    board: Board,
    dead: Vec<Card>,
}

impl EquityCalculator<LookupEvaluator> {
    /// Creates a calculator using the lookup evaluator.
    pub fn new() -> Self {
        Self::with_evaluator(LookupEvaluator::new())
    }
}

impl Default for EquityCalculator<LookupEvaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Evaluator> EquityCalculator<E> {
    /// The default number of trials.
    pub const DEFAULT_SAMPLES: usize = 25_000;

    /// Creates a calculator using the given evaluator.
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            evaluator,
            samples: Self::DEFAULT_SAMPLES,
            tasks: thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            board: Board::empty(),
            dead: Vec::new(),
        }
    }

    /// Sets the number of trials.
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(1);
        self
    }

    /// Sets the number of parallel tasks.
    pub fn tasks(mut self, tasks: usize) -> Self {
        self.tasks = tasks.max(1);
        self
    }

    /// Sets the community cards already dealt.
    pub fn board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    /// Sets cards that are out of play.
    pub fn dead_cards(mut self, cards: &[Card]) -> Self {
        self.dead = cards.to_vec();
        self
    }

    /// Estimates the equity of each hand at showdown.
    ///
    /// Fails with fewer than two hands or when the hands, board, and dead
    /// cards overlap.
    pub fn calculate(&self, hands: &[Hand]) -> Result<Vec<Equity>> {
        ensure!(hands.len() >= 2, "equity needs at least two hands");

        let mut known = self.board.cards().to_vec();
        known.extend_from_slice(&self.dead);
        for hand in hands {
            known.extend_from_slice(&hand.cards());
        }
        ensure_distinct(&known)?;

        let stock = self.stock(&known);
        let draws = 5 - self.board.cards().len();
        let per_task = self.samples.div_ceil(self.tasks);

        let mut tallies = Vec::with_capacity(self.tasks);
        thread::scope(|s| {
            let handles = (0..self.tasks)
                .map(|_| {
                    s.spawn(|| {
                        let mut rng = SmallRng::from_os_rng();
                        let mut tally: Tally = vec![(0, 0); hands.len()];
                        for _ in 0..per_task {
                            let runout = draw(&stock, draws, &self.board, &mut rng);
                            self.showdown(hands, &runout, &mut tally);
                        }

                        tally
                    })
                })
                .collect::<Vec<_>>();

            for handle in handles {
                tallies.push(handle.join().expect("equity task panicked"));
            }
        });

        Ok(merge(tallies, per_task as u64 * self.tasks as u64))
    }

    /// Estimates the equity of each range at showdown.
    ///
    /// Each trial samples one hand per range honoring play weights and
    /// skips card collisions between the sampled hands. Fails with fewer
    /// than two ranges, when a defined hand conflicts with the board or
    /// dead cards, or when the ranges cannot produce disjoint hands.
    pub fn calculate_ranges(&self, ranges: &[Range]) -> Result<Vec<Equity>> {
        ensure!(ranges.len() >= 2, "equity needs at least two ranges");

        let mut known = self.board.cards().to_vec();
        known.extend_from_slice(&self.dead);
        ensure_distinct(&known)?;

        for range in ranges {
            ensure!(!range.is_empty(), "cannot compute equity of an empty range");
            for hand in range.hands() {
                ensure!(
                    !hand.cards().iter().any(|c| known.contains(c)),
                    "hand {hand} conflicts with the board or dead cards"
                );
            }
        }

        let stock = self.stock(&known);
        let per_task = self.samples.div_ceil(self.tasks);

        let mut tallies = Vec::with_capacity(self.tasks);
        thread::scope(|s| -> Result<()> {
            let handles = (0..self.tasks)
                .map(|_| {
                    s.spawn(|| -> Result<Tally> {
                        let mut rng = SmallRng::from_os_rng();
                        let mut tally: Tally = vec![(0, 0); ranges.len()];
                        let mut hands = Vec::with_capacity(ranges.len());
                        for _ in 0..per_task {
                            sample_hands(ranges, &mut hands, &mut rng)?;

                            let cards = stock
                                .iter()
                                .filter(|c| !hands.iter().any(|h: &Hand| h.cards().contains(*c)))
                                .copied()
                                .collect::<Vec<_>>();
                            let draws = 5 - self.board.cards().len();
                            let runout = draw(&cards, draws, &self.board, &mut rng);
                            self.showdown(&hands, &runout, &mut tally);
                        }

                        Ok(tally)
                    })
                })
                .collect::<Vec<_>>();

            for handle in handles {
                tallies.push(handle.join().expect("equity task panicked")?);
            }

            Ok(())
        })?;

        Ok(merge(tallies, per_task as u64 * self.tasks as u64))
    }

    /// The cards that can still be drawn.
    fn stock(&self, known: &[Card]) -> Vec<Card> {
        Deck::default()
            .into_iter()
            .filter(|c| !known.contains(c))
            .collect()
    }

    /// Ranks every hand on the runout and tallies the winners.
    fn showdown(&self, hands: &[Hand], runout: &Board, tally: &mut Tally) {
        let mut best = u32::MAX;
        let mut winners = 0u32;
        let mut winner = 0;
        for (pos, hand) in hands.iter().enumerate() {
            let rank = self.evaluator.rank(hand, runout);
            if rank < best {
                best = rank;
                winners = 1;
                winner = pos;
            } else if rank == best {
                winners += 1;
            }
        }

        if winners == 1 {
            tally[winner].0 += 1;
        } else {
            for (pos, hand) in hands.iter().enumerate() {
                if self.evaluator.rank(hand, runout) == best {
                    tally[pos].1 += 1;
                }
            }
        }
    }
}

/// Completes the board with cards drawn from the stock.
fn draw<R: Rng>(stock: &[Card], draws: usize, board: &Board, rng: &mut R) -> Board {
    let mut cards = board.cards().to_vec();
    cards.extend(stock.choose_multiple(rng, draws));
    Board::new(&cards).expect("drawn cards are distinct")
}

/// Samples one non-conflicting hand per range.
fn sample_hands<R: Rng>(ranges: &[Range], hands: &mut Vec<Hand>, rng: &mut R) -> Result<()> {
    const MAX_ATTEMPTS: usize = 1_000;

    for _ in 0..MAX_ATTEMPTS {
        hands.clear();
        for range in ranges {
            hands.push(range.sample(rng)?);
        }

        let cards = hands.iter().flat_map(|h| h.cards()).collect::<Vec<_>>();
        let unique = cards.iter().collect::<AHashSet<_>>();
        if unique.len() == cards.len() {
            return Ok(());
        }
    }

    bail!("ranges cannot produce disjoint hands")
}

/// Sums per-task tallies into equities.
fn merge(tallies: Vec<Tally>, trials: u64) -> Vec<Equity> {
    let players = tallies.first().map(Vec::len).unwrap_or(0);
    let mut totals: Tally = vec![(0, 0); players];
    for tally in tallies {
        for (total, t) in totals.iter_mut().zip(tally) {
            total.0 += t.0;
            total.1 += t.1;
        }
    }

    totals.into_iter().map(|t| Equity::new(t, trials)).collect()
}

/// Fails when the given cards overlap.
fn ensure_distinct(cards: &[Card]) -> Result<()> {
    let unique = cards.iter().collect::<AHashSet<_>>();
    ensure!(
        unique.len() == cards.len(),
        "hands, board, and dead cards must not share cards"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    #[test]
    fn rates_sum_to_one() {
        let calc = EquityCalculator::new().samples(2_000);
        let equities = calc.calculate(&[hand("AcAs"), hand("KcKs")]).unwrap();

        assert_eq!(equities.len(), 2);
        for e in &equities {
            let total = e.win() + e.lose() + e.split();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn aces_dominate() {
        let calc = EquityCalculator::new().samples(5_000);
        let equities = calc.calculate(&[hand("AcAs"), hand("9d9h")]).unwrap();

        // Aces win roughly 80% against nines preflop.
        assert!(equities[0].win() > 0.6);
        assert!(equities[1].win() < 0.4);
    }

    #[test]
    fn board_changes_equity() {
        let board = "9c2c2h".parse().unwrap();
        let calc = EquityCalculator::new().samples(5_000).board(board);
        let equities = calc.calculate(&[hand("9s9h"), hand("TdTs")]).unwrap();

        // Nines flopped a full house and dominate the overpair.
        assert!(equities[0].win() > 0.8);
        assert!(equities[1].win() < 0.2);
    }

    #[test]
    fn dead_cards_shift_equity() {
        let calc = EquityCalculator::new().samples(5_000);
        let fair = calc.calculate(&[hand("9s9h"), hand("TdTs")]).unwrap();

        let calc = EquityCalculator::new()
            .samples(5_000)
            .dead_cards(&["Tc".parse().unwrap(), "Th".parse().unwrap()]);
        let dead = calc.calculate(&[hand("9s9h"), hand("TdTs")]).unwrap();

        // With both remaining tens dead the nines pick up equity.
        assert!(dead[0].win() > fair[0].win() - 0.05);
        assert!(dead[1].win() < fair[1].win() + 0.05);
    }

    #[test]
    fn conflicts_rejected() {
        let calc = EquityCalculator::new().samples(100);

        // Hand sharing a card with another hand.
        assert!(calc.calculate(&[hand("9s9h"), hand("9sTd")]).is_err());

        // Hand sharing a card with the board.
        let board = "Qs2h3d".parse().unwrap();
        let calc = EquityCalculator::new().samples(100).board(board);
        assert!(calc.calculate(&[hand("Qs2c"), hand("9d9h")]).is_err());

        // One hand is not enough.
        let calc = EquityCalculator::new().samples(100);
        assert!(calc.calculate(&[hand("9s9h")]).is_err());
    }

    #[test]
    fn range_equity() {
        let mut a = Range::new();
        a.define(hand("AcAh"));
        a.define(hand("QsQh"));

        let mut b = Range::new();
        b.define(hand("KsKh"));
        b.define(hand("JsJh"));

        let calc = EquityCalculator::new().samples(2_000);
        let equities = calc.calculate_ranges(&[a, b]).unwrap();

        assert_eq!(equities.len(), 2);
        for e in &equities {
            let total = e.win() + e.lose() + e.split();
            assert!((total - 1.0).abs() < 1e-9);
        }

        // The overpair-heavy range is the favorite.
        assert!(equities[0].win() > equities[1].win());
    }

    #[test]
    fn range_conflicts_rejected() {
        let board = "Qs2h3d9s".parse::<Board>().unwrap();

        let mut a = Range::new();
        a.define(hand("Qs2h"));
        let mut b = Range::new();
        b.define(hand("3d9s"));

        let calc = EquityCalculator::new().samples(100).board(board);
        assert!(calc.calculate_ranges(&[a, b]).is_err());

        // Two ranges made of the same single hand can never be disjoint.
        let mut a = Range::new();
        a.define(hand("QsQd"));
        let mut b = Range::new();
        b.define(hand("QsQd"));

        let calc = EquityCalculator::new().samples(100);
        assert!(calc.calculate_ranges(&[a, b]).is_err());

        let calc = EquityCalculator::new().samples(100);
        assert!(calc.calculate_ranges(&[Range::new(), Range::new()]).is_err());
    }
}
