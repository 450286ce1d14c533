//! # bornes
//!
//! A Mille Bornes game engine: deck composition, dealing, per-turn rule
//! validation, driving-zone state transitions, and round scoring for the
//! team-based racing card game.
//!
//! ## Design Principles
//!
//! 1. **Pure Engine**: every operation maps an immutable state (plus a
//!    move or config) to a new state or a typed error. No I/O, no global
//!    state, no internal locking; the transport layer serializes moves
//!    per game.
//!
//! 2. **Closed Taxonomy**: cards are a closed sum type dispatched with
//!    exhaustive matches. Adding a variant does not compile until its
//!    category and standard count are supplied.
//!
//! 3. **Injected Randomness**: shuffles run on a seeded, serializable
//!    RNG, so deals are reproducible and tests can pin exact hands.
//!
//! 4. **Persistent Data Structures**: hands, piles, and score rows use
//!    `im`, making each validated successor state a cheap structural
//!    clone of its predecessor.
//!
//! ## Modules
//!
//! - `cards`: card taxonomy, deck construction, shuffling
//! - `core`: players, teams, RNG, configuration, moves, game state
//! - `zones`: per-team driving-zone state machines
//! - `rules`: move validation, transitions, round scoring
//! - `store`: `GameId -> GameState` storage interface
//! - `api`: the two transport-facing operations
//!
//! ## Example
//!
//! ```
//! use bornes::api;
//! use bornes::core::{GameConfig, Move, PlayerId, PlayerSpec};
//! use bornes::store::MemoryStore;
//!
//! let config = GameConfig::new(
//!     700,
//!     5000,
//!     2,
//!     vec![PlayerSpec::human("ada"), PlayerSpec::bot("colossus")],
//! )?;
//!
//! let mut store = MemoryStore::new();
//! let game = api::new_game(&mut store, config, 42)?;
//!
//! let summary = api::apply_move(&mut store, game, &Move::draw(PlayerId::new(0)))?;
//! assert_eq!(summary.players[0].hand_size, 7);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod api;
pub mod cards;
pub mod core;
pub mod rules;
pub mod store;
pub mod zones;

// Re-export commonly used types
pub use crate::cards::{
    Attack, Card, Category, Control, Deck, DeckError, Distance, Hazard, Remedy, Safety,
    ShuffledDeck, STANDARD_DECK_SIZE,
};

pub use crate::core::{
    ConfigError, ConfigViolation, CoupWindow, DealError, GameConfig, GameRng, GameRngState,
    GameState, GameStatus, InvariantViolation, Move, MoveRejection, Play, PlayerId, PlayerKind,
    PlayerMap, PlayerSpec, TeamId, TeamMap, HAND_SIZE, MAX_HAND_SIZE,
};

pub use crate::zones::{DrivingZone, RollState, SafetyPlay};

pub use crate::rules::{apply_move, score_round, BonusSchedule, EngineError, RoundScore};

pub use crate::store::{GameId, GameStore, MemoryStore, StoreError};

pub use crate::api::{ApplyError, GameStateSummary, PlayerSummary, ZoneSummary};
