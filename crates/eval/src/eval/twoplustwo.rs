// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Transition-table evaluator using the Two-Plus-Two algorithm.
use anyhow::{Context, Result, ensure};
use std::{fs, path::Path, thread, time::Instant};

use showdown_cards::{Board, Card, Hand, Suit};

use super::{Evaluator, HandRank};

/// The number of entries in the transition table.
const TABLE_ENTRIES: usize = 32_487_834;

/// The state the walk starts from.
const START_STATE: usize = 53;

/// Right shift extracting the hand category from a final state.
const VALUE_SHIFT: u32 = 12;

/// Card offsets in the transition table's own index space.
///
/// The table orders cards by rank first and then by suit, a different
/// permutation than the prime encoding used by the rank table; the two
/// index spaces are never interchangeable.
fn card_offset(card: Card) -> usize {
    let suit = match card.suit() {
        Suit::Clubs => 1,
        Suit::Diamonds => 2,
        Suit::Hearts => 3,
        Suit::Spades => 4,
    };

    card.rank_bits() as usize * 4 + suit
}

/// Hand evaluator walking the Two-Plus-Two transition table.
///
/// Each consumed card is one array read, so ranking needs no combinatorial
/// enumeration at the cost of a ~124MB precomputed table. Ranks returned by
/// this engine grow with hand strength, the opposite direction of
/// [LookupEvaluator](super::LookupEvaluator).
pub struct TwoPlusTwoEvaluator {
    table: Vec<u32>,
}

impl TwoPlusTwoEvaluator {
    /// Creates the evaluator from a transition table file.
    ///
    /// The file is a raw dump of 32,487,834 little-endian 32-bit entries
    /// with no header. Fails if the file cannot be read or has the wrong
    /// size, the caller may fall back to the lookup evaluator.
    pub fn new<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let started = Instant::now();

        let bytes = fs::read(path)
            .with_context(|| format!("reading transition table {}", path.display()))?;
        ensure!(
            bytes.len() == TABLE_ENTRIES * 4,
            "transition table {} is {} bytes, expected {}",
            path.display(),
            bytes.len(),
            TABLE_ENTRIES * 4
        );

        // Decode in parallel, the table is tens of millions of entries.
        let mut table = vec![0u32; TABLE_ENTRIES];
        let tasks = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        let chunk = TABLE_ENTRIES.div_ceil(tasks);
        thread::scope(|s| {
            for (src, dst) in bytes.chunks(chunk * 4).zip(table.chunks_mut(chunk)) {
                s.spawn(move || {
                    for (entry, bytes) in dst.iter_mut().zip(src.chunks_exact(4)) {
                        *entry = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                    }
                });
            }
        });

        log::info!(
            "loaded transition table {} in {:.3}s",
            path.display(),
            started.elapsed().as_secs_f64()
        );

        Ok(Self { table })
    }

    /// Walks the table consuming the board cards and then the hand cards,
    /// the order the table was built for.
    fn walk(&self, hand: &Hand, board: &Board) -> usize {
        let mut state = START_STATE;
        for &card in board.cards() {
            state = self.table[state + card_offset(card)] as usize;
        }

        for card in hand.cards() {
            state = self.table[state + card_offset(card)] as usize;
        }

        // Terminal states for fewer than seven cards store one extra hop
        // to their final value.
        if board.cards().len() < 5 {
            state = self.table[state] as usize;
        }

        state
    }
}

impl Evaluator for TwoPlusTwoEvaluator {
    fn rank(&self, hand: &Hand, board: &Board) -> u32 {
        self.walk(hand, board) as u32
    }

    fn value(&self, hand: &Hand, board: &Board) -> HandRank {
        let value = (self.walk(hand, board) >> VALUE_SHIFT) as u32;
        HandRank::from_index(value - 1)
    }
}
