//! Transport-facing state summary.
//!
//! The transport layer never serializes a raw [`GameState`]; it gets this
//! snapshot instead, which exposes public information (hand sizes, zones,
//! scores) without leaking hand contents.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Hazard, Safety};
use crate::core::{GameState, GameStatus, PlayerId, PlayerKind};
use crate::zones::RollState;

/// One seat as seen from outside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    /// Display name.
    pub name: String,
    /// Human or bot.
    pub kind: PlayerKind,
    /// Team index.
    pub team: u8,
    /// Cards currently held.
    pub hand_size: usize,
}

/// One driving zone as seen from outside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSummary {
    /// Travel state.
    pub roll_state: RollState,
    /// Whether a speed limit is active.
    pub speed_limit: bool,
    /// The blocking hazard, if any.
    pub hazard: Option<Hazard>,
    /// Played safeties with their coup fourre flags.
    pub safeties: Vec<(Safety, bool)>,
    /// Kilometres travelled this round.
    pub travelled: u16,
}

/// Public snapshot of a game, returned after every accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateSummary {
    /// The player whose turn it is.
    pub turn: PlayerId,
    /// Zero-based round index.
    pub round: u32,
    /// Running or complete.
    pub status: GameStatus,
    /// Seats in turn order.
    pub players: Vec<PlayerSummary>,
    /// Cards left to draw.
    pub draw_pile: usize,
    /// Most recent discard, if any.
    pub discard_top: Option<Card>,
    /// Zones by team index.
    pub zones: Vec<ZoneSummary>,
    /// Score rows by team index, one entry per completed round.
    pub scores: Vec<Vec<u32>>,
}

impl GameStateSummary {
    /// Build the public snapshot of a state.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        let config = state.config();

        let players = config
            .players()
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let player = PlayerId::new(i as u8);
                PlayerSummary {
                    name: spec.name.clone(),
                    kind: spec.kind,
                    team: config.team_of(player).0,
                    hand_size: state.hand(player).len(),
                }
            })
            .collect();

        let zones = crate::core::TeamId::all(config.num_teams() as usize)
            .map(|team| {
                let zone = state.zone(team);
                ZoneSummary {
                    roll_state: zone.roll_state(),
                    speed_limit: zone.speed_limit_active(),
                    hazard: zone.active_hazard(),
                    safeties: zone
                        .safeties()
                        .map(|(safety, play)| (safety, play.coup_fourre))
                        .collect(),
                    travelled: zone.travelled(),
                }
            })
            .collect();

        let scores = state
            .scores()
            .iter()
            .map(|(_, row)| row.iter().copied().collect())
            .collect();

        Self {
            turn: state.turn(),
            round: state.round(),
            status: state.status(),
            players,
            draw_pile: state.draw_pile().len(),
            discard_top: state.discard_pile().back().copied(),
            zones,
            scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PlayerSpec, TeamId};

    fn state() -> GameState {
        let config = GameConfig::new(
            1000,
            5000,
            2,
            vec![
                PlayerSpec::human("ada"),
                PlayerSpec::bot("colossus"),
                PlayerSpec::human("grace"),
                PlayerSpec::bot("eniac"),
            ],
        )
        .unwrap();
        GameState::new(config, 42).unwrap()
    }

    #[test]
    fn test_summary_of_fresh_deal() {
        let summary = GameStateSummary::of(&state());

        assert_eq!(summary.turn, PlayerId::new(0));
        assert_eq!(summary.round, 0);
        assert_eq!(summary.status, GameStatus::InProgress);
        assert_eq!(summary.players.len(), 4);
        assert!(summary.players.iter().all(|p| p.hand_size == 6));
        assert_eq!(summary.players[2].team, 0);
        assert_eq!(summary.draw_pile, 106 - 24);
        assert_eq!(summary.discard_top, None);
        assert_eq!(summary.zones.len(), 2);
        assert_eq!(summary.scores, vec![Vec::<u32>::new(); 2]);
    }

    #[test]
    fn test_summary_does_not_leak_hand_contents() {
        let json = serde_json::to_string(&GameStateSummary::of(&state())).unwrap();
        // Specific card names only ever enter via the discard top, which is
        // empty on a fresh deal.
        assert!(!json.contains("Distance"));
        assert!(!json.contains("D25"));
    }

    #[test]
    fn test_summary_reflects_zone_state() {
        let mut st = state();
        let team = TeamId::new(1);
        st.zones[team].roll().unwrap();
        st.zones[team]
            .play_distance(crate::cards::Distance::D100, 1000)
            .unwrap();

        let summary = GameStateSummary::of(&st);
        assert_eq!(summary.zones[1].roll_state, RollState::Rolling);
        assert_eq!(summary.zones[1].travelled, 100);
    }

    #[test]
    fn test_summary_serde_round_trip() {
        let summary = GameStateSummary::of(&state());
        let json = serde_json::to_string(&summary).unwrap();
        let back: GameStateSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, back);
    }
}
