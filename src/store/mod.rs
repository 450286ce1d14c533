//! Game state storage behind an explicit interface.
//!
//! The engine owns no global state: the transport layer is handed a
//! [`GameStore`] and is responsible for serializing moves per game. The
//! interface is get / compare-and-swap so a future durable backend can
//! detect lost races without the engine knowing about locking.
//!
//! ## Key Types
//!
//! - `GameId`: opaque game identifier, allocated by the store
//! - `GameStore`: create / get / compare-and-swap / remove
//! - `MemoryStore`: the in-process hash map implementation

pub mod memory;

pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::GameState;

/// Opaque identifier for a stored game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl GameId {
    /// Create a game ID from its raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "game-{}", self.0)
    }
}

/// Errors that can occur against a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No game under that ID.
    #[error("unknown game {0}")]
    NotFound(GameId),
    /// Someone else replaced the state since it was fetched.
    #[error("version conflict: expected {expected}, found {found}")]
    Conflict {
        /// Version the caller fetched.
        expected: u64,
        /// Version currently stored.
        found: u64,
    },
}

/// Storage interface for `GameId -> GameState` pairs.
///
/// Implementations hand out a version with every snapshot; replacing a
/// state requires presenting the version it superseded.
pub trait GameStore {
    /// Allocate an ID and store the initial state. Returns the new ID.
    fn create(&mut self, state: GameState) -> GameId;

    /// Snapshot the current state and its version.
    fn get(&self, id: GameId) -> Option<(u64, GameState)>;

    /// Replace the state iff `expected` is still the stored version.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] for an unknown ID,
    /// [`StoreError::Conflict`] when the stored version moved on.
    fn compare_and_swap(
        &mut self,
        id: GameId,
        expected: u64,
        state: GameState,
    ) -> Result<u64, StoreError>;

    /// Drop a retired game. Returns its final state if it existed.
    fn remove(&mut self, id: GameId) -> Option<GameState>;
}
