// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker hand evaluators.
//!
//! This crate ranks a two-card hand combined with a community board against
//! all other possible five-card combinations. Two interchangeable engines
//! implement the [Evaluator] contract:
//!
//! - [LookupEvaluator] is a port of the [Cactus Kev's][kevlink] five-card
//!   evaluator extended to 5-7 cards with the 21-combinations method. Its
//!   ranks are dense in `[0, 7461]` with 0 the strongest hand. The lookup
//!   table is bundled with the crate so construction never does IO.
//! - [TwoPlusTwoEvaluator] walks the Two-Plus-Two transition table, one
//!   array read per card. The table is a ~124MB external file supplied by
//!   the caller, and its ranks grow with hand strength, the opposite
//!   direction of the lookup engine.
//!
//! ```
//! # use showdown_eval::{Evaluator, HandRank, LookupEvaluator};
//! let evaluator = LookupEvaluator::new();
//!
//! let hand = "2c7d".parse().unwrap();
//! let board = "AsKsQsJsTs".parse().unwrap();
//!
//! // The board plays, a royal flush is the strongest hand of all.
//! assert_eq!(evaluator.rank(&hand, &board), 0);
//! assert_eq!(evaluator.value(&hand, &board), HandRank::StraightFlush);
//! ```
//!
//! Both engines are immutable after construction and safe to share across
//! threads without locking.
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{Evaluator, HandRank, LookupEvaluator, TwoPlusTwoEvaluator};

// Reexport cards types.
pub use showdown_cards::{Board, Card, Deck, Hand, Rank, Street, Suit};
