//! Core engine types: players, teams, RNG, configuration, moves, state.
//!
//! This module holds the building blocks the rules engine operates on.
//! Nothing here performs I/O; randomness is injected via [`GameRng`].

pub mod config;
pub mod moves;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{ConfigError, ConfigViolation, GameConfig, PlayerKind, PlayerSpec};
pub use moves::{Move, MoveRejection, Play};
pub use player::{PlayerId, PlayerMap, TeamId, TeamMap};
pub use rng::{GameRng, GameRngState};
pub use state::{
    CoupWindow, DealError, GameState, GameStatus, InvariantViolation, HAND_SIZE, MAX_HAND_SIZE,
};
