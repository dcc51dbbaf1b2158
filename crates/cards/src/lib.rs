// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker cards types.
//!
//! This crate defines the card value types shared by the evaluation and
//! equity crates:
//!
//! ```
//! # use showdown_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "Kd".parse().unwrap();
//! assert_eq!(kd.rank(), Rank::King);
//! ```
//!
//! a [Deck] type for shuffling, dealing, and iterating k-card combinations:
//!
//! ```
//! # use showdown_cards::Deck;
//! // Count all distinct starting hands.
//! let mut counter = 0;
//! Deck::default().for_each(2, |hand| {
//!     assert_eq!(hand.len(), 2);
//!     counter += 1;
//! });
//! assert_eq!(counter, 1_326);
//! ```
//!
//! and the [Hand] and [Board] types consumed by the evaluators:
//!
//! ```
//! # use showdown_cards::{Board, Hand};
//! let hand: Hand = "AcAs".parse().unwrap();
//! let board: Board = "AdAhKsKcKd".parse().unwrap();
//! assert_eq!(board.cards().len(), 5);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod cards;
pub use cards::{Card, Deck, Rank, Suit};

mod holding;
pub use holding::{Board, Hand, Street};
