//! Deck construction and shuffling.
//!
//! A [`Deck`] is built deterministically from a card-count table; a
//! [`ShuffledDeck`] is the same sequence after a Fisher-Yates pass. The two
//! are distinct types so dealing code cannot consume an unshuffled deck.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::card::Card;
use crate::core::rng::GameRng;

/// Number of cards in the standard Mille Bornes deck.
pub const STANDARD_DECK_SIZE: usize = 106;

/// Errors that can occur during deck construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// The count table produced no cards at all.
    #[error("deck would contain no cards")]
    Empty,
}

/// An ordered, unshuffled card sequence.
///
/// Built deterministically: same count table and multiplier, same order.
/// Must be shuffled before it can be dealt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// Build a deck from a card-count table.
    ///
    /// For each card in [`Card::ALL`] enumeration order, appends
    /// `counts(card) * multiplier` copies.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if the resulting deck holds no cards
    /// (e.g. a count table that returns zero everywhere, or a zero
    /// multiplier).
    pub fn build(counts: impl Fn(Card) -> usize, multiplier: usize) -> Result<Self, DeckError> {
        let mut cards = Vec::new();
        for card in Card::ALL {
            for _ in 0..counts(card) * multiplier {
                cards.push(card);
            }
        }

        if cards.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self(cards))
    }

    /// The standard 106-card deck.
    #[must_use]
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(STANDARD_DECK_SIZE);
        for card in Card::ALL {
            for _ in 0..card.standard_count() {
                cards.push(card);
            }
        }
        Self(cards)
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the deck is empty (never true for a constructed deck).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The cards in build order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    /// Shuffle the deck with the injected RNG, producing a sequence that
    /// dealing code will accept.
    #[must_use]
    pub fn shuffle(self, rng: &mut GameRng) -> ShuffledDeck {
        let mut cards = self.0;
        rng.shuffle(&mut cards);
        ShuffledDeck(cards)
    }
}

/// A randomly permuted deck, ready to deal. Cards are dealt from the end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffledDeck(Vec<Card>);

impl ShuffledDeck {
    /// Wrap an already-ordered card sequence.
    ///
    /// The order is taken as given; this exists so tests and replay tooling
    /// can inject a deterministic deal.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    /// Number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether all cards have been dealt.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The remaining cards; the last element is dealt next.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    /// Deal the top card (the end of the sequence).
    pub fn deal(&mut self) -> Option<Card> {
        self.0.pop()
    }

    /// Consume the deck, yielding the remaining cards.
    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.0
    }
}
