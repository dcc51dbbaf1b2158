// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Weighted hand groups.
use anyhow::{Result, ensure};
use rand::prelude::*;
use std::fmt;

use showdown_cards::Hand;

/// A group of hands with play weights.
///
/// A weight in `(0, 1]` is the probability the range plays the hand in a
/// sampled showdown, hands defined without a weight always play. Defining
/// a hand again replaces its weight.
#[derive(Clone, Debug, Default)]
pub struct Range {
    hands: Vec<(Hand, f64)>,
}

impl Range {
    /// Weights below this cannot be sampled reliably.
    const MIN_SAMPLE_WEIGHT: f64 = 0.01;

    /// Sampling attempts before giving up on a low-weight range.
    const MAX_SAMPLE_ATTEMPTS: usize = 1_000;

    /// Creates an empty range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a hand that always plays.
    pub fn define(&mut self, hand: Hand) -> &mut Self {
        self.define_weighted(1.0, hand)
            .expect("full weight is always valid")
    }

    /// Adds a hand with the given play weight.
    ///
    /// Fails unless the weight is in `(0, 1]`.
    pub fn define_weighted(&mut self, weight: f64, hand: Hand) -> Result<&mut Self> {
        ensure!(
            weight > 0.0 && weight <= 1.0,
            "invalid weight {weight} for hand {hand}, expected (0, 1]"
        );

        if let Some(entry) = self.hands.iter_mut().find(|(h, _)| *h == hand) {
            entry.1 = weight;
        } else {
            self.hands.push((hand, weight));
        }

        Ok(self)
    }

    /// The weight of a hand, 0 when the hand is not in the range.
    pub fn weight(&self, hand: &Hand) -> f64 {
        self.hands
            .iter()
            .find(|(h, _)| h == hand)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    /// Checks if the range contains a hand.
    pub fn contains(&self, hand: &Hand) -> bool {
        self.hands.iter().any(|(h, _)| h == hand)
    }

    /// The hands in this range in definition order.
    pub fn hands(&self) -> impl Iterator<Item = &Hand> {
        self.hands.iter().map(|(h, _)| h)
    }

    /// The number of hands in this range.
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    /// Checks if the range has no hands.
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// Samples a hand honoring the play weights.
    ///
    /// Fails when the range is empty or its weights are too low to sample.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<Hand> {
        ensure!(!self.is_empty(), "cannot sample an empty range");
        ensure!(
            self.hands
                .iter()
                .any(|(_, w)| *w >= Self::MIN_SAMPLE_WEIGHT),
            "every weight in the range is below {}",
            Self::MIN_SAMPLE_WEIGHT
        );

        for _ in 0..Self::MAX_SAMPLE_ATTEMPTS {
            let (hand, weight) = self.hands[rng.random_range(0..self.hands.len())];
            if rng.random::<f64>() < weight {
                return Ok(hand);
            }
        }

        anyhow::bail!("range weights too low to sample a hand")
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, (hand, weight)) in self.hands.iter().enumerate() {
            if pos > 0 {
                write!(f, ",")?;
            }

            if *weight < 1.0 {
                write!(f, "[{hand}]{weight}")?;
            } else {
                write!(f, "{hand}")?;
            }
        }

        Ok(())
    }
}
