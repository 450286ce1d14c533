//! Move representation and the legality-rejection taxonomy.
//!
//! A [`Move`] names the acting player and what they do with their turn:
//! draw, play a card against a driving zone, or discard. Every way a move
//! can be legally refused is a [`MoveRejection`] variant; rejections never
//! corrupt state and the caller simply re-prompts the player.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::{PlayerId, TeamId};
use crate::cards::{Card, Hazard, Remedy, Safety};

/// What a player does with their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Play {
    /// Take the top card of the draw pile into hand.
    Draw,
    /// Play a card against a driving zone (own team or an opponent's,
    /// depending on the card).
    Card {
        /// The card being played; must be in the acting player's hand.
        card: Card,
        /// The targeted team's driving zone.
        target: TeamId,
    },
    /// Discard a card instead of playing one.
    Discard {
        /// The card being discarded; must be in the acting player's hand.
        card: Card,
    },
}

/// A proposed move: acting player plus their play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The acting player.
    pub player: PlayerId,
    /// The play.
    pub play: Play,
}

impl Move {
    /// Draw a card.
    #[must_use]
    pub const fn draw(player: PlayerId) -> Self {
        Self {
            player,
            play: Play::Draw,
        }
    }

    /// Play a card against a zone.
    #[must_use]
    pub const fn card(player: PlayerId, card: Card, target: TeamId) -> Self {
        Self {
            player,
            play: Play::Card { card, target },
        }
    }

    /// Discard a card.
    #[must_use]
    pub const fn discard(player: PlayerId, card: Card) -> Self {
        Self {
            player,
            play: Play::Discard { card },
        }
    }
}

/// An expected, recoverable refusal of a proposed move.
///
/// Distinct from [`InvariantViolation`](crate::core::InvariantViolation):
/// a rejection means the *player* asked for something illegal, not that
/// the engine broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The game has already been won.
    #[error("the game is complete")]
    GameComplete,
    /// Another player's turn is in progress.
    #[error("not this player's turn")]
    NotYourTurn,
    /// Out-of-turn play that is not a valid coup fourre.
    #[error("no coup fourre window matches this play")]
    NotCoupFourre,
    /// The turn's draw has not happened yet.
    #[error("must draw before playing or discarding")]
    MustDrawFirst,
    /// The hand already holds the drawn card.
    #[error("hand already holds 7 cards")]
    HandFull,
    /// Nothing left to draw.
    #[error("the draw pile is empty")]
    DrawPileEmpty,
    /// The named card is not in the acting player's hand.
    #[error("card {card} is not in hand")]
    CardNotInHand {
        /// The missing card.
        card: Card,
    },
    /// Attacks must target an opponent; every other card targets one's
    /// own team.
    #[error("card {card} cannot target {target}")]
    WrongTarget {
        /// The card being played.
        card: Card,
        /// The illegal target.
        target: TeamId,
    },
    /// Roll played on a zone that is already rolling.
    #[error("the zone is already rolling")]
    NotStopped,
    /// The zone must be rolling for this play.
    #[error("the zone is not rolling")]
    NotRolling,
    /// Roll played while a hazard still blocks the zone.
    #[error("hazard {hazard} is still active")]
    HazardActive {
        /// The blocking hazard.
        hazard: Hazard,
    },
    /// Remedy played with no matching hazard active.
    #[error("remedy {remedy} has no matching hazard to cure")]
    NoMatchingHazard {
        /// The remedy that was played.
        remedy: Remedy,
    },
    /// The target's safety card blocks this attack.
    #[error("target is immune via {safety}")]
    TargetImmune {
        /// The safety granting immunity.
        safety: Safety,
    },
    /// Speed Limit played on a zone already under a limit.
    #[error("a speed limit is already active")]
    SpeedLimitActive,
    /// End of Limit played with no limit active.
    #[error("no speed limit is active")]
    NoSpeedLimit,
    /// Distance above 50 played under a speed limit.
    #[error("distance {value} exceeds the active speed limit")]
    SpeedLimitExceeded {
        /// The rejected distance value.
        value: u16,
    },
    /// The play would overshoot the race distance.
    #[error("distance {value} would overshoot the {race_distance} km race at {travelled} km")]
    ExceedsRaceDistance {
        /// Kilometres already travelled.
        travelled: u16,
        /// The rejected distance value.
        value: u16,
        /// The configured race distance.
        race_distance: u16,
    },
}
