//! External entry points for the transport layer.
//!
//! Exactly two operations cross the engine boundary: [`new_game`] and
//! [`apply_move`]. Both work against an injected [`GameStore`]; the
//! transport layer is responsible for serializing moves per game (one
//! logical lock per [`GameId`]) and for whatever JSON shapes it speaks.
//!
//! No exceptions cross this boundary: every failure is a typed value, and
//! engine defects ([`InvariantViolation`]) arrive on a distinct arm from
//! user mistakes ([`MoveRejection`]).

pub mod summary;

pub use summary::{GameStateSummary, PlayerSummary, ZoneSummary};

use thiserror::Error;

use crate::core::{DealError, GameConfig, GameState, InvariantViolation, Move, MoveRejection};
use crate::rules::{self, EngineError};
use crate::store::{GameId, GameStore, StoreError};

/// Failure of [`apply_move`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// No game under that ID.
    #[error("unknown game {0}")]
    GameNotFound(GameId),
    /// The move is illegal; re-prompt the player.
    #[error(transparent)]
    Rejected(#[from] MoveRejection),
    /// The engine broke its own invariants; the game is corrupted.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    /// The store refused the swap; the caller raced itself.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<EngineError> for ApplyError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Rejected(rejection) => ApplyError::Rejected(rejection),
            EngineError::Invariant(violation) => ApplyError::Invariant(violation),
        }
    }
}

/// Deal a new game and register it with the store.
///
/// `config` is already validated by construction; the deck is the
/// standard 106 cards shuffled from `seed`.
///
/// # Errors
///
/// [`DealError::InsufficientCards`] if the deck cannot cover the deal
/// (unreachable with the standard deck and a valid config).
pub fn new_game(
    store: &mut impl GameStore,
    config: GameConfig,
    seed: u64,
) -> Result<GameId, DealError> {
    let state = GameState::new(config, seed)?;
    let id = store.create(state);
    tracing::info!(%id, "game created");
    Ok(id)
}

/// Apply one move to a stored game.
///
/// Fetches the state, runs the transition engine, swaps the successor
/// back, and returns the public snapshot.
///
/// # Errors
///
/// [`ApplyError::GameNotFound`] for an unknown ID; otherwise the engine's
/// rejection/violation arms, or a store conflict if the caller violated
/// the one-in-flight-transition-per-game contract.
pub fn apply_move(
    store: &mut impl GameStore,
    id: GameId,
    mv: &Move,
) -> Result<GameStateSummary, ApplyError> {
    let (version, state) = store.get(id).ok_or(ApplyError::GameNotFound(id))?;
    let next = rules::apply_move(&state, mv)?;
    let snapshot = GameStateSummary::of(&next);
    store.compare_and_swap(id, version, next)?;
    Ok(snapshot)
}
