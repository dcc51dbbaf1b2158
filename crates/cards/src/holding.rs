// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hole cards and community board types.
use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{Card, Deck, cards::parse_cards};

/// A player's two hole cards.
///
/// A hand is an unordered pair, `"AcKs"` and `"KsAc"` are the same hand:
///
/// ```
/// # use showdown_cards::Hand;
/// let h1: Hand = "AcKs".parse().unwrap();
/// let h2: Hand = "KsAc".parse().unwrap();
/// assert_eq!(h1, h2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    cards: [Card; 2],
}

impl Hand {
    /// Creates a hand from two distinct cards.
    pub fn new(first: Card, second: Card) -> Result<Self> {
        ensure!(
            first != second,
            "hand cannot hold duplicate card {first}{second}"
        );

        // Normalize the pair so equal hands compare equal.
        let cards = if first.id() > second.id() {
            [first, second]
        } else {
            [second, first]
        };

        Ok(Self { cards })
    }

    /// The two hole cards.
    pub fn cards(&self) -> [Card; 2] {
        self.cards
    }

    /// Returns all 1,326 distinct hands.
    pub fn all() -> Vec<Hand> {
        let mut hands = Vec::with_capacity(1_326);
        Deck::default().for_each(2, |cards| {
            hands.push(Hand::new(cards[0], cards[1]).expect("deck cards are distinct"));
        });
        hands
    }
}

impl FromStr for Hand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let cards = parse_cards(s)?;
        ensure!(cards.len() == 2, "invalid hand '{s}', expected two cards");
        Hand::new(cards[0], cards[1])
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.cards[0], self.cards[1])
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hand({}{})", self.cards[0], self.cards[1])
    }
}

/// A board dealing street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    /// No community cards dealt.
    Preflop,
    /// Three community cards dealt.
    Flop,
    /// Four community cards dealt.
    Turn,
    /// Five community cards dealt.
    River,
}

impl Street {
    /// The number of community cards dealt on this street.
    pub fn num_cards(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }
}

/// The community cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Creates a board with no community cards.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a board from the given cards.
    ///
    /// Fails unless the cards are distinct and make up a street.
    pub fn new(cards: &[Card]) -> Result<Self> {
        if !matches!(cards.len(), 0 | 3 | 4 | 5) {
            bail!(
                "invalid board of {} cards, expected 0, 3, 4, or 5",
                cards.len()
            );
        }

        for (pos, card) in cards.iter().enumerate() {
            ensure!(
                !cards[..pos].contains(card),
                "board cannot hold duplicate card {card}"
            );
        }

        Ok(Self {
            cards: cards.to_vec(),
        })
    }

    /// Deals a board for the given street from a deck.
    ///
    /// Panics if the deck has fewer cards than the street needs.
    pub fn deal(deck: &mut Deck, street: Street) -> Self {
        let cards = (0..street.num_cards()).map(|_| deck.deal()).collect();
        Self { cards }
    }

    /// The community cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The street this board is at.
    pub fn street(&self) -> Street {
        match self.cards.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            _ => Street::River,
        }
    }

    /// True when all five community cards are dealt.
    pub fn is_complete(&self) -> bool {
        self.cards.len() == Street::River.num_cards()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Board::new(&parse_cards(s)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{card}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn hand_identity() {
        let h1 = "AcKs".parse::<Hand>().unwrap();
        let h2 = "KsAc".parse::<Hand>().unwrap();
        assert_eq!(h1, h2);
        assert_eq!(h1.to_string(), h2.to_string());

        assert!("AcAc".parse::<Hand>().is_err());
        assert!("Ac".parse::<Hand>().is_err());
        assert!("AcKsQh".parse::<Hand>().is_err());
    }

    #[test]
    fn hand_enumeration() {
        let hands = Hand::all();
        assert_eq!(hands.len(), 1_326);
        assert_eq!(hands.iter().collect::<HashSet<_>>().len(), 1_326);
    }

    #[test]
    fn board_streets() {
        assert_eq!(Board::empty().street(), Street::Preflop);

        let flop = "9c2c2h".parse::<Board>().unwrap();
        assert_eq!(flop.street(), Street::Flop);
        assert_eq!(flop.cards().len(), 3);

        let turn = "9c2c2h9s".parse::<Board>().unwrap();
        assert_eq!(turn.street(), Street::Turn);

        let river = "AdAhKsKcKd".parse::<Board>().unwrap();
        assert_eq!(river.street(), Street::River);
        assert!(river.is_complete());

        assert!("9c2c".parse::<Board>().is_err());
        assert!("9c2c2h9s9h5d".parse::<Board>().is_err());
        assert!("9c2c9c".parse::<Board>().is_err());
    }

    #[test]
    fn board_dealing() {
        let mut deck = Deck::new_and_shuffled(&mut rand::rng());
        let board = Board::deal(&mut deck, Street::River);
        assert!(board.is_complete());
        assert_eq!(deck.count(), Deck::SIZE - 5);

        let unique = board.cards().iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), 5);
    }
}
