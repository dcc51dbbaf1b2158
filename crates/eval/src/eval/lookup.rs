// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Combinatorial evaluator backed by the five-card rank table.
use ahash::AHashMap;

use showdown_cards::{Board, Card, Hand};

use super::{Evaluator, HandRank};

/// The bundled rank table, 7,462 big-endian signatures ordered by rank.
const RANK_DATA: &[u8] = include_bytes!("assets/ranks.bin");

/// The number of distinct five-card hand classes.
const DISTINCT_HANDS: usize = 7_462;

/// Flag set on the signature of a suited five-card hand.
const SUITED_MASK: u32 = 0x8000_0000;

/// The signature of an unordered five-card hand.
///
/// The product of the cards rank primes, with [SUITED_MASK] set when all
/// five cards share a suit. The product of the five largest primes fits in
/// 31 bits so the flag never collides with a product.
fn signature(cards: &[Card; 5]) -> u32 {
    let mut sig = 1u32;
    let mut suited = true;
    for card in cards {
        sig *= card.prime();
        suited &= card.suit_bits() == cards[0].suit_bits();
    }

    if suited { sig | SUITED_MASK } else { sig }
}

/// Calls `f` for every five-card subset of `cards`.
///
/// Subsets are generated with a combinadic bit vector so each of the
/// `C(n, 5)` subsets is visited exactly once for any n >= 5.
fn for_each_hand<F>(cards: &[Card], mut f: F)
where
    F: FnMut(&[Card; 5]),
{
    const K: usize = 5;

    let n = cards.len();
    debug_assert!(n >= K, "at least five cards required");

    // One-based card offsets, bits[0] is a terminator.
    let mut bits = [0usize; K + 1];
    for (pos, bit) in bits.iter_mut().enumerate() {
        *bit = pos;
    }

    let mut hand = [cards[0]; K];
    let mut end = 1;
    while end != 0 {
        for pos in 1..=K {
            hand[pos - 1] = cards[bits[pos] - 1];
        }
        f(&hand);

        end = K;
        while bits[end] == n - K + end {
            end -= 1;
            if end == 0 {
                break;
            }
        }

        bits[end] += 1;
        for pos in (end + 1).max(1)..=K {
            bits[pos] = bits[pos - 1] + 1;
        }
    }
}

/// Maps five-card signatures to their rank.
///
/// Ranks are dense in `[0, 7461]`, 0 the strongest class, and are implied
/// by the position of each signature in the bundled asset. The table is
/// immutable once built and safe for unsynchronized concurrent reads.
struct RankTable {
    ranks: AHashMap<u32, u16>,
}

impl RankTable {
    /// Builds the table from the bundled asset.
    ///
    /// Panics if the asset does not hold exactly one entry per distinct
    /// hand class, a partial table would leave hands unrankable.
    fn new() -> Self {
        assert_eq!(
            RANK_DATA.len(),
            DISTINCT_HANDS * 4,
            "corrupt rank table asset"
        );

        let mut ranks = AHashMap::with_capacity(DISTINCT_HANDS);
        for (rank, bytes) in RANK_DATA.chunks_exact(4).enumerate() {
            let sig = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            let prev = ranks.insert(sig, rank as u16);
            assert!(prev.is_none(), "duplicate signature 0x{sig:x} in rank table");
        }

        Self { ranks }
    }

    /// The rank of a five-card signature.
    fn rank(&self, sig: u32) -> u16 {
        *self
            .ranks
            .get(&sig)
            .unwrap_or_else(|| panic!("signature 0x{sig:x} not in rank table"))
    }
}

/// Hand evaluator using the Cactus Kev's five-card system adapted to 5-7
/// card hands with the 21-combinations method.
///
/// Ranking enumerates every five-card combination of the hand and board
/// cards, looks each one up in the rank table, and keeps the lowest
/// (strongest) rank. A seven-card evaluation costs 21 table lookups.
pub struct LookupEvaluator {
    table: RankTable,
}

impl LookupEvaluator {
    /// Creates the evaluator from the bundled rank table.
    ///
    /// Building the table costs a few milliseconds, construct once and
    /// share across callers.
    pub fn new() -> Self {
        Self {
            table: RankTable::new(),
        }
    }
}

impl Default for LookupEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator for LookupEvaluator {
    fn rank(&self, hand: &Hand, board: &Board) -> u32 {
        let mut cards = Vec::with_capacity(7);
        cards.extend_from_slice(&hand.cards());
        cards.extend_from_slice(board.cards());

        let mut best = u16::MAX;
        for_each_hand(&cards, |hand| {
            best = best.min(self.table.rank(signature(hand)));
        });

        best as u32
    }

    fn value(&self, hand: &Hand, board: &Board) -> HandRank {
        HandRank::from_rank(self.rank(hand, board))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use showdown_cards::Deck;

    fn cards(s: &str) -> Vec<Card> {
        s.as_bytes()
            .chunks(2)
            .map(|c| std::str::from_utf8(c).unwrap().parse().unwrap())
            .collect()
    }

    #[test]
    fn rank_table_density() {
        let table = RankTable::new();

        // Every rank in [0, 7461] appears exactly once.
        assert_eq!(table.ranks.len(), DISTINCT_HANDS);
        let ranks = table.ranks.values().collect::<HashSet<_>>();
        assert_eq!(ranks.len(), DISTINCT_HANDS);
        assert_eq!(table.ranks.values().copied().max(), Some(7_461));
    }

    #[test]
    fn five_card_ranks() {
        let table = RankTable::new();
        let rank5 = |s: &str| {
            let cards: [Card; 5] = cards(s).try_into().unwrap();
            table.rank(signature(&cards))
        };

        // Calibration hands at the category edges.
        assert_eq!(rank5("AsKsQsJsTs"), 0); // royal flush
        assert_eq!(rank5("5h4h3h2hAh"), 9); // steel wheel
        assert_eq!(rank5("AcAdAhAsKc"), 10); // best quads
        assert_eq!(rank5("2c2d2h2s3c"), 165); // worst quads
        assert_eq!(rank5("AcAdAhKcKd"), 166); // best full house
        assert_eq!(rank5("7d5d4d3d2d"), 1_598); // worst flush
        assert_eq!(rank5("AcKdQhJsTc"), 1_599); // best straight
        assert_eq!(rank5("5h4d3c2sAs"), 1_608); // worst straight
        assert_eq!(rank5("AcAdKhQsJc"), 3_325); // best pair
        assert_eq!(rank5("AcKdQhJs9c"), 6_185); // best high card
        assert_eq!(rank5("7c5d4h3s2c"), 7_461); // worst hand
    }

    #[test]
    fn subset_enumeration() {
        // The generator must yield C(n, 5) distinct subsets for any n, the
        // board may be partial during intermediate street evaluation.
        let deck = Deck::default().into_iter().collect::<Vec<_>>();

        for (n, expected) in [(5, 1), (6, 6), (7, 21)] {
            let mut seen = HashSet::default();
            let mut count = 0;
            for_each_hand(&deck[..n], |hand| {
                let mut ids = hand.iter().map(Card::id).collect::<Vec<_>>();
                ids.sort_unstable();
                seen.insert(ids);
                count += 1;
            });

            assert_eq!(count, expected, "n={n}");
            assert_eq!(seen.len(), expected, "n={n}");

            // All of the n cards get used.
            let used = seen.iter().flatten().collect::<HashSet<_>>();
            assert_eq!(used.len(), n);
        }
    }

    #[test]
    fn quads_on_paired_board() {
        let evaluator = LookupEvaluator::new();

        // Four aces with a king kicker is the strongest quads hand.
        let hand = "AcAs".parse().unwrap();
        let board = "AdAhKsKcKd".parse().unwrap();
        assert_eq!(evaluator.rank(&hand, &board), 10);
        assert_eq!(evaluator.value(&hand, &board), HandRank::FourOfAKind);
    }

    #[test]
    fn board_plays() {
        let evaluator = LookupEvaluator::new();

        // The hole cards do not improve a royal flush on the board.
        let hand = "2c7d".parse().unwrap();
        let board = "AsKsQsJsTs".parse().unwrap();
        assert_eq!(evaluator.rank(&hand, &board), 0);
        assert_eq!(evaluator.value(&hand, &board), HandRank::StraightFlush);
    }

    #[test]
    fn partial_board() {
        let evaluator = LookupEvaluator::new();

        // Nines full of deuces on the flop, only one five-card subset.
        let hand = "9s9h".parse().unwrap();
        let board = "9c2c2h".parse().unwrap();

        let rank = evaluator.rank(&hand, &board);
        assert!((166..=321).contains(&rank));
        assert_eq!(evaluator.value(&hand, &board), HandRank::FullHouse);
    }

    #[test]
    fn deterministic() {
        let evaluator = LookupEvaluator::new();

        let hand = "JdJc".parse().unwrap();
        let board = "Th9h8h4c2d".parse().unwrap();
        let rank = evaluator.rank(&hand, &board);
        for _ in 0..10 {
            assert_eq!(evaluator.rank(&hand, &board), rank);
        }
    }

    // Goes through all 2.6M five-card hands, slow in debug mode.
    #[test]
    #[ignore]
    fn five_card_census() {
        let table = RankTable::new();

        let mut counts = [0u32; 9];
        Deck::default().for_each(5, |cards| {
            let hand: [Card; 5] = cards.try_into().unwrap();
            let rank = table.rank(signature(&hand));
            counts[HandRank::from_rank(rank as u32) as usize] += 1;
        });

        assert_eq!(counts[HandRank::HighCard as usize], 1_302_540);
        assert_eq!(counts[HandRank::OnePair as usize], 1_098_240);
        assert_eq!(counts[HandRank::TwoPair as usize], 123_552);
        assert_eq!(counts[HandRank::ThreeOfAKind as usize], 54_912);
        assert_eq!(counts[HandRank::Straight as usize], 10_200);
        assert_eq!(counts[HandRank::Flush as usize], 5_108);
        assert_eq!(counts[HandRank::FullHouse as usize], 3_744);
        assert_eq!(counts[HandRank::FourOfAKind as usize], 624);
        assert_eq!(counts[HandRank::StraightFlush as usize], 40);
    }
}
