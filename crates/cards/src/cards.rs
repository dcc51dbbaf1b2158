// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use anyhow::{Result, anyhow, bail};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Primes used to encode a card rank.
const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// A Poker card.
///
/// A card is represented using the encoding in the [Cactus Kev's][kevlink] Poker
/// hand evaluator with each card having the following format:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxbbbbb|bbbbbbbb|cdhsrrrr|xxpppppp|
///   +--------+--------+--------+--------+
///   p = prime number of rank (deuce=2,trey=3,four=5,five=7,...,ace=41)
///   r = rank of card (deuce=0,trey=1,four=2,five=3,...,ace=12)
///   cdhs = suit of card
///   b = bit turned on depending on rank of card
/// ```
///
/// [kevlink]: http://suffe.cool/poker/evaluator.html
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card(u32);

impl Card {
    /// Create a card given a suit and rank.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        let (rank, suit) = (rank as u32, suit as u32);
        Self(PRIMES[rank as usize] | (rank << 8) | (suit << 12) | (1 << (rank + 16)))
    }

    /// This card unique id.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// The prime number encoding this card's rank.
    #[inline]
    pub fn prime(&self) -> u32 {
        self.0 & 0xff
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.suit_bits() {
            0x8 => Suit::Clubs,
            0x4 => Suit::Diamonds,
            0x2 => Suit::Hearts,
            0x1 => Suit::Spades,
            _ => panic!("Invalid suit value 0x{:x}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        match self.rank_bits() {
            0 => Rank::Deuce,
            1 => Rank::Trey,
            2 => Rank::Four,
            3 => Rank::Five,
            4 => Rank::Six,
            5 => Rank::Seven,
            6 => Rank::Eight,
            7 => Rank::Nine,
            8 => Rank::Ten,
            9 => Rank::Jack,
            10 => Rank::Queen,
            11 => Rank::King,
            12 => Rank::Ace,
            _ => panic!("Invalid rank 0x{:x}", self.0),
        }
    }

    /// Returns the rank bits.
    #[inline]
    pub fn rank_bits(&self) -> u8 {
        ((self.0 >> 8) & 0xf) as u8
    }

    /// Returns the suit bits.
    #[inline]
    pub fn suit_bits(&self) -> u8 {
        ((self.0 >> 12) & 0xf) as u8
    }
}

impl FromStr for Card {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("invalid card '{s}', expected rank and suit as in 'Ac'");
        };

        let rank = match rank.to_ascii_uppercase() {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            c => bail!("invalid rank '{c}' in card '{s}'"),
        };

        let suit = match suit.to_ascii_lowercase() {
            'c' => Suit::Clubs,
            'd' => Suit::Diamonds,
            'h' => Suit::Hearts,
            's' => Suit::Spades,
            c => bail!("invalid suit '{c}' in card '{s}'"),
        };

        Ok(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 8,
    /// Diamonds suit.
    Diamonds = 4,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 1,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };

        write!(f, "{suit}")
    }
}

/// A cards Deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// Deals a card from the deck.
    ///
    /// Panics if the deck is empty.
    pub fn deal(&mut self) -> Card {
        self.cards.pop().expect("dealing from an empty deck")
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Hands are visited in canonical combinadic order, each exactly once.
    ///
    /// Panics if k is not 2 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((2..=7).contains(&k), "2 <= k <= 7");

        let n = self.cards.len();
        if k > n {
            return;
        }

        // Algorithm L from TAOCP 4a, on positions c[0] < c[1] < .. < c[k-1]
        // with a sentinel at c[k].
        let mut c = (0..=k).collect::<Vec<_>>();
        c[k] = n;

        let mut hand = vec![self.cards[0]; k];
        loop {
            for (h, &pos) in hand.iter_mut().zip(&c[..k]) {
                *h = self.cards[pos];
            }
            f(&hand);

            let mut j = 0;
            while j < k && c[j] + 1 == c[j + 1] {
                c[j] = j;
                j += 1;
            }

            if j == k {
                break;
            }

            c[j] += 1;
        }
    }

    /// Calls the `f` closure for `count` random k-cards hands.
    ///
    /// Panics if k is not 2 <= k <= 7.
    pub fn sample<F>(&self, count: usize, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((2..=7).contains(&k), "2 <= k <= 7");

        if k > self.cards.len() {
            return;
        }

        let mut rng = SmallRng::from_os_rng();
        let mut hand = vec![self.cards[0]; k];
        for _ in 0..count {
            for (pos, c) in self.cards.choose_multiple(&mut rng, k).enumerate() {
                hand[pos] = *c;
            }

            f(&hand);
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

/// Parses a run of two-character cards as in `"AdAhKs"`.
pub(crate) fn parse_cards(s: &str) -> Result<Vec<Card>> {
    let chars = s.chars().collect::<Vec<_>>();
    if chars.len() % 2 != 0 {
        bail!("invalid cards '{s}', expected two characters per card");
    }

    chars
        .chunks_exact(2)
        .map(|c| format!("{}{}", c[0], c[1]).parse())
        .collect::<Result<Vec<_>>>()
        .map_err(|e| anyhow!("invalid cards '{s}': {e}"))
}
