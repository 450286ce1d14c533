//! Rules: move validation, state transitions, and scoring.
//!
//! The engine never interprets transport concerns; it maps an immutable
//! state plus a proposed move to a validated successor or a typed refusal.
//!
//! ## Key Types
//!
//! - `apply_move`: the single transition entry point
//! - `EngineError`: legality rejections vs. invariant violations
//! - `score_round` / `BonusSchedule` / `RoundScore`: round scoring

pub mod engine;
pub mod scoring;

pub use engine::{apply_move, EngineError};
pub use scoring::{score_round, BonusSchedule, RoundScore};
