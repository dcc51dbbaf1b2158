// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker ranges and Monte-Carlo equity estimation.
//!
//! A [Range] is a group of hands with play weights:
//!
//! ```
//! # use showdown_equity::Range;
//! let mut range = Range::new();
//! range.define("AcAs".parse().unwrap());
//! range.define_weighted(0.5, "KcKs".parse().unwrap()).unwrap();
//! assert_eq!(range.weight(&"KcKs".parse().unwrap()), 0.5);
//! ```
//!
//! The [EquityCalculator] estimates win, lose, and split rates for hands or
//! ranges by sampling showdowns:
//!
//! ```
//! # use showdown_equity::EquityCalculator;
//! let calc = EquityCalculator::new().samples(10_000);
//! let hands = ["AcAs".parse().unwrap(), "9d9h".parse().unwrap()];
//! let equities = calc.calculate(&hands).unwrap();
//!
//! // Aces are a strong favorite against nines.
//! assert!(equities[0].win() > equities[1].win());
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod range;
pub use range::Range;

mod equity;
pub use equity::{Equity, EquityCalculator};

// Reexport cards types.
pub use showdown_cards::{Board, Card, Deck, Hand, Rank, Street, Suit};
