// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The hand ranking contract shared by the evaluation engines.
use showdown_cards::{Board, Hand};

mod lookup;
pub use lookup::LookupEvaluator;

mod twoplustwo;
pub use twoplustwo::TwoPlusTwoEvaluator;

/// A type that ranks a hand on a board.
///
/// The combined hand and board must hold at least five distinct cards, the
/// result of ranking fewer cards or duplicate cards is unspecified.
///
/// Rank numbers are comparable only within the same implementation: the
/// general contract is that ranks order hands by strength, but the numeric
/// direction is implementation-specific. [LookupEvaluator] ranks get lower
/// as hands get stronger, [TwoPlusTwoEvaluator] ranks get higher. The
/// [HandRank] returned by [value](Evaluator::value) agrees across
/// implementations.
pub trait Evaluator: Send + Sync {
    /// Ranks the hand on the given board.
    fn rank(&self, hand: &Hand, board: &Board) -> u32;

    /// The hand category of the hand on the given board.
    fn value(&self, hand: &Hand, board: &Board) -> HandRank;
}

/// Poker hands categories from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandRank {
    /// Hand with the highest card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
}

impl HandRank {
    /// Classifies a dense rank in the `[0, 7461]` space where 0 is the
    /// strongest hand.
    ///
    /// The thresholds are calibrated to the 7,462 distinct five-card hand
    /// classes and are part of the evaluator contract.
    pub fn from_rank(rank: u32) -> HandRank {
        if rank >= 6185 {
            HandRank::HighCard
        } else if rank >= 3325 {
            HandRank::OnePair
        } else if rank >= 2467 {
            HandRank::TwoPair
        } else if rank >= 1609 {
            HandRank::ThreeOfAKind
        } else if rank >= 1599 {
            HandRank::Straight
        } else if rank >= 322 {
            HandRank::Flush
        } else if rank >= 166 {
            HandRank::FullHouse
        } else if rank >= 10 {
            HandRank::FourOfAKind
        } else {
            HandRank::StraightFlush
        }
    }

    /// The category with the given index, 0 for [HandRank::HighCard] up to
    /// 8 for [HandRank::StraightFlush].
    ///
    /// Panics if the index is out of range.
    pub fn from_index(index: u32) -> HandRank {
        match index {
            0 => HandRank::HighCard,
            1 => HandRank::OnePair,
            2 => HandRank::TwoPair,
            3 => HandRank::ThreeOfAKind,
            4 => HandRank::Straight,
            5 => HandRank::Flush,
            6 => HandRank::FullHouse,
            7 => HandRank::FourOfAKind,
            8 => HandRank::StraightFlush,
            _ => panic!("invalid hand category index {index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_boundaries() {
        use HandRank::*;

        // Inclusive lower bound for each category going up in strength.
        let bounds = [
            (6185, 7461, HighCard),
            (3325, 6184, OnePair),
            (2467, 3324, TwoPair),
            (1609, 2466, ThreeOfAKind),
            (1599, 1608, Straight),
            (322, 1598, Flush),
            (166, 321, FullHouse),
            (10, 165, FourOfAKind),
            (0, 9, StraightFlush),
        ];

        for (lo, hi, value) in bounds {
            assert_eq!(HandRank::from_rank(lo), value);
            assert_eq!(HandRank::from_rank(hi), value);
        }

        // Each category is stronger than the previous one.
        for ((lo, ..), (.., hi, _)) in bounds.iter().zip(&bounds[1..]) {
            assert!(HandRank::from_rank(*lo) < HandRank::from_rank(*hi));
        }
    }

    #[test]
    fn category_indexing() {
        for index in 0..9 {
            assert_eq!(HandRank::from_index(index) as u32, index);
        }
    }
}
