//! Card system: taxonomy, deck construction, and shuffling.
//!
//! ## Key Types
//!
//! - `Card`: the closed 19-variant card sum with its five categories
//! - `Deck`: deterministic, unshuffled card sequence
//! - `ShuffledDeck`: permuted sequence, the only input dealing accepts
//!
//! The standard deck composition is fixed data on `Card` so every count
//! lives next to the taxonomy it describes.

pub mod card;
pub mod deck;

pub use card::{Attack, Card, Category, Control, Distance, Hazard, Remedy, Safety};
pub use deck::{Deck, DeckError, ShuffledDeck, STANDARD_DECK_SIZE};
