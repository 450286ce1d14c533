//! The game state aggregate: hands, piles, zones, scores, and turn order.
//!
//! ## GameState
//!
//! Owns everything a single game needs: the validated configuration, one
//! hand per player, the draw and discard piles, one driving zone per team,
//! the per-team score history, and the carried RNG used to reshuffle
//! between rounds.
//!
//! Uses `im` persistent data structures so producing an immutable
//! successor state is a cheap structural clone. External callers never
//! mutate a `GameState`; the move validator clones it, transforms the
//! clone, re-checks every structural invariant, and returns it.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::GameConfig;
use super::player::{PlayerId, PlayerMap, TeamId, TeamMap};
use super::rng::GameRng;
use crate::cards::{Attack, Card, Deck, ShuffledDeck};
use crate::zones::{DrivingZone, RollState};

/// Cards dealt to each hand at the start of a round.
pub const HAND_SIZE: usize = 6;

/// Hand cap: six held plus the one drawn this turn.
pub const MAX_HAND_SIZE: usize = 7;

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// The deck cannot supply a full hand to every player.
    #[error("need {required} cards to deal, only {available} available")]
    InsufficientCards {
        /// Cards required for the deal.
        required: usize,
        /// Cards the deck holds.
        available: usize,
    },
}

/// Whether the game is still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are being accepted.
    InProgress,
    /// A team reached the points goal; the state is retired.
    Complete {
        /// The winning team.
        winner: TeamId,
    },
}

/// An open coup fourre window: the last attack that landed, awaiting an
/// immediate counter from the victimized team. Closed by the next
/// successful move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoupWindow {
    /// The team that was attacked.
    pub team: TeamId,
    /// The attack that landed.
    pub attack: Attack,
}

/// An internal consistency failure detected after a transition.
///
/// These indicate a defect in the engine itself, never a user mistake;
/// a game surfacing one should be considered corrupted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The full-deck census no longer matches the standard composition.
    #[error("card conservation broken: expected {expected} copies of {card}, found {found}")]
    CardConservation {
        /// The miscounted card.
        card: Card,
        /// Copies in the standard deck.
        expected: usize,
        /// Copies found across hands, piles, and zones.
        found: usize,
    },
    /// A hand exceeded the 7-card cap.
    #[error("{player} holds {len} cards, above the 7-card cap")]
    HandOverflow {
        /// The overflowing hand's owner.
        player: PlayerId,
        /// Cards held.
        len: usize,
    },
    /// Score rows drifted out of sync.
    #[error("team score rows have unequal lengths")]
    UnevenScoreRows,
    /// A zone is rolling while a hazard blocks it.
    #[error("{team} is rolling with an active hazard")]
    RollingWithHazard {
        /// The inconsistent zone's team.
        team: TeamId,
    },
    /// Turn order points beyond the configured seats.
    #[error("turn points at {player}, beyond the configured seats")]
    TurnOutOfRange {
        /// The out-of-range seat.
        player: PlayerId,
    },
    /// A between-rounds redeal failed; unreachable with a standard deck.
    #[error("round reset could not redeal: {0}")]
    Redeal(DealError),
}

/// Complete state of one game.
///
/// Created once by dealing, then only replaced by validated successors
/// from [`apply_move`](crate::rules::apply_move).
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) config: GameConfig,
    pub(crate) hands: PlayerMap<Vector<Card>>,
    pub(crate) draw_pile: Vector<Card>,
    pub(crate) discard_pile: Vector<Card>,
    pub(crate) zones: TeamMap<DrivingZone>,
    pub(crate) scores: TeamMap<Vector<u32>>,
    pub(crate) turn: PlayerId,
    pub(crate) round: u32,
    pub(crate) status: GameStatus,
    pub(crate) coup_window: Option<CoupWindow>,
    pub(crate) rng: GameRng,
}

impl GameState {
    /// Deal a new game from the standard deck, shuffled with `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::InsufficientCards`] if the deck cannot supply
    /// six cards per player (impossible for the standard deck, reachable
    /// through [`GameState::deal`] with a custom deck).
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, DealError> {
        let mut rng = GameRng::new(seed);
        let deck = Deck::standard().shuffle(&mut rng);
        Self::deal(config, deck, rng)
    }

    /// Deal a new game from an injected shuffled deck.
    ///
    /// The deck order is consumed as-is, so tests can pin exact hands.
    /// `rng` is carried in the state for between-round reshuffles.
    ///
    /// # Errors
    ///
    /// Returns [`DealError::InsufficientCards`] if the deck cannot supply
    /// six cards per player.
    pub fn deal(
        config: GameConfig,
        mut deck: ShuffledDeck,
        rng: GameRng,
    ) -> Result<Self, DealError> {
        let player_count = config.player_count();
        let hands = deal_hands(player_count, &mut deck)?;
        let num_teams = config.num_teams() as usize;

        Ok(Self {
            config,
            hands,
            draw_pile: deck.into_cards().into_iter().collect(),
            discard_pile: Vector::new(),
            zones: TeamMap::new(num_teams, |_| DrivingZone::new()),
            scores: TeamMap::new(num_teams, |_| Vector::new()),
            turn: PlayerId::new(0),
            round: 0,
            status: GameStatus::InProgress,
            coup_window: None,
            rng,
        })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        &self.hands[player]
    }

    /// The draw pile; the last card is drawn next.
    #[must_use]
    pub fn draw_pile(&self) -> &Vector<Card> {
        &self.draw_pile
    }

    /// The discard pile; the last card is the most recent discard.
    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard_pile
    }

    /// A team's driving zone.
    #[must_use]
    pub fn zone(&self, team: TeamId) -> &DrivingZone {
        &self.zones[team]
    }

    /// Per-team score rows, one entry per completed round.
    #[must_use]
    pub fn scores(&self) -> &TeamMap<Vector<u32>> {
        &self.scores
    }

    /// A team's cumulative score over all completed rounds.
    #[must_use]
    pub fn cumulative_score(&self, team: TeamId) -> u32 {
        self.scores[team].iter().sum()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// Zero-based index of the round in progress.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Whether the game is still running.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The open coup fourre window, if the last move was a landed attack.
    #[must_use]
    pub fn coup_window(&self) -> Option<CoupWindow> {
        self.coup_window
    }

    /// Census of every card the state tracks, keyed by card kind.
    #[must_use]
    pub fn card_census(&self) -> FxHashMap<Card, usize> {
        let mut census: FxHashMap<Card, usize> = FxHashMap::default();
        let mut count = |card: Card| *census.entry(card).or_insert(0) += 1;

        for (_, hand) in self.hands.iter() {
            for &card in hand {
                count(card);
            }
        }
        for &card in &self.draw_pile {
            count(card);
        }
        for &card in &self.discard_pile {
            count(card);
        }
        for (_, zone) in self.zones.iter() {
            for &distance in zone.distance_cards() {
                count(Card::Distance(distance));
            }
            if let Some(hazard) = zone.active_hazard() {
                count(Card::Hazard(hazard));
            }
            for (safety, _) in zone.safeties() {
                count(Card::Safety(safety));
            }
        }

        census
    }

    /// Re-check every structural invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found. Any violation means
    /// the engine itself is defective and the game is corrupted.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let census = self.card_census();
        for card in Card::ALL {
            let found = census.get(&card).copied().unwrap_or(0);
            let expected = card.standard_count();
            if found != expected {
                return Err(InvariantViolation::CardConservation {
                    card,
                    expected,
                    found,
                });
            }
        }

        for (player, hand) in self.hands.iter() {
            if hand.len() > MAX_HAND_SIZE {
                return Err(InvariantViolation::HandOverflow {
                    player,
                    len: hand.len(),
                });
            }
        }

        let row_len = self.scores[TeamId::new(0)].len();
        if self.scores.iter().any(|(_, row)| row.len() != row_len) {
            return Err(InvariantViolation::UnevenScoreRows);
        }

        for (team, zone) in self.zones.iter() {
            if zone.roll_state() == RollState::Rolling && zone.active_hazard().is_some() {
                return Err(InvariantViolation::RollingWithHazard { team });
            }
        }

        if self.turn.index() >= self.config.player_count() {
            return Err(InvariantViolation::TurnOutOfRange { player: self.turn });
        }

        Ok(())
    }

    /// Reset piles, hands, and zones for the next round, preserving the
    /// score history. The carried RNG shuffles a fresh standard deck and
    /// the opening seat rotates with the round index.
    pub(crate) fn reset_round(&mut self) -> Result<(), DealError> {
        self.round += 1;

        let mut deck = Deck::standard().shuffle(&mut self.rng);
        self.hands = deal_hands(self.config.player_count(), &mut deck)?;
        self.draw_pile = deck.into_cards().into_iter().collect();
        self.discard_pile = Vector::new();
        self.zones = TeamMap::new(self.config.num_teams() as usize, |_| DrivingZone::new());
        self.coup_window = None;
        self.turn = PlayerId::new((self.round as usize % self.config.player_count()) as u8);

        Ok(())
    }
}

/// Deal six cards to each player, round-robin, popping from the end of
/// the shuffled sequence.
fn deal_hands(
    player_count: usize,
    deck: &mut ShuffledDeck,
) -> Result<PlayerMap<Vector<Card>>, DealError> {
    let required = HAND_SIZE * player_count;
    if deck.len() < required {
        return Err(DealError::InsufficientCards {
            required,
            available: deck.len(),
        });
    }

    let mut hands = PlayerMap::new(player_count, |_| Vector::new());
    for _ in 0..HAND_SIZE {
        for player in PlayerId::all(player_count) {
            let card = deck.deal().ok_or(DealError::InsufficientCards {
                required,
                available: 0,
            })?;
            hands[player].push_back(card);
        }
    }

    Ok(hands)
}
