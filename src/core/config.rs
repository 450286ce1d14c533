//! Game configuration with invariant-checking construction.
//!
//! A [`GameConfig`] can only be obtained through validation, and the
//! validation reports **every** violated constraint, not just the first.
//! Deserialization routes through the same checks, so a config instance is
//! valid for its whole lifetime.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::{PlayerId, TeamId};

/// Whether a seat is driven by a person or a bot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    /// A human player.
    Human,
    /// A bot player. Move selection happens outside the engine.
    Bot,
}

/// One configured seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Unique display name.
    pub name: String,
    /// Human or bot.
    pub kind: PlayerKind,
}

impl PlayerSpec {
    /// A human seat.
    #[must_use]
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Human,
        }
    }

    /// A bot seat.
    #[must_use]
    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PlayerKind::Bot,
        }
    }
}

/// A single violated configuration constraint.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    /// Race distance must be a positive multiple of 25.
    #[error("race distance {0} is not a positive multiple of 25")]
    RaceDistance(u16),
    /// Points goal must be positive.
    #[error("points goal must be positive")]
    PointsGoal,
    /// Only 2 or 3 teams are supported.
    #[error("team count {0} must be 2 or 3")]
    TeamCount(u8),
    /// Between 2 and 6 players are supported.
    #[error("player count {0} is outside 2-6")]
    PlayerCount(usize),
    /// Player names must be unique.
    #[error("duplicate player name {0:?}")]
    DuplicateName(String),
    /// At least one seat must be human.
    #[error("at least one human player is required")]
    NoHuman,
    /// Players must divide evenly into teams.
    #[error("{players} players cannot split into {teams} equal teams")]
    UnevenTeams {
        /// Configured player count.
        players: usize,
        /// Configured team count.
        teams: u8,
    },
}

/// Validation failure carrying every violated constraint.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid game configuration: {}", .violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ConfigError {
    /// All violations found, in check order.
    pub violations: Vec<ConfigViolation>,
}

/// Raw configuration shape used for deserialization and construction.
#[derive(Clone, Debug, Deserialize)]
struct RawGameConfig {
    race_distance: u16,
    points_goal: u32,
    num_teams: u8,
    players: Vec<PlayerSpec>,
}

/// Validated game configuration.
///
/// Fields are private: the only way in is [`GameConfig::new`] (or serde
/// deserialization, which routes through it).
///
/// ## Example
///
/// ```
/// use bornes::core::{GameConfig, PlayerSpec};
///
/// let config = GameConfig::new(
///     1000,
///     5000,
///     2,
///     vec![PlayerSpec::human("ada"), PlayerSpec::bot("colossus")],
/// )
/// .unwrap();
///
/// assert_eq!(config.team_size(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    race_distance: u16,
    points_goal: u32,
    num_teams: u8,
    players: Vec<PlayerSpec>,
}

impl GameConfig {
    /// Validate and construct a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] listing every violated constraint.
    pub fn new(
        race_distance: u16,
        points_goal: u32,
        num_teams: u8,
        players: Vec<PlayerSpec>,
    ) -> Result<Self, ConfigError> {
        let mut violations = Vec::new();

        if race_distance == 0 || race_distance % 25 != 0 {
            violations.push(ConfigViolation::RaceDistance(race_distance));
        }
        if points_goal == 0 {
            violations.push(ConfigViolation::PointsGoal);
        }
        if !(2..=3).contains(&num_teams) {
            violations.push(ConfigViolation::TeamCount(num_teams));
        }
        if !(2..=6).contains(&players.len()) {
            violations.push(ConfigViolation::PlayerCount(players.len()));
        }

        let mut seen = std::collections::HashSet::new();
        for player in &players {
            if !seen.insert(player.name.as_str()) {
                violations.push(ConfigViolation::DuplicateName(player.name.clone()));
            }
        }

        if !players.iter().any(|p| p.kind == PlayerKind::Human) {
            violations.push(ConfigViolation::NoHuman);
        }

        if num_teams > 0 && !players.is_empty() && players.len() % num_teams as usize != 0 {
            violations.push(ConfigViolation::UnevenTeams {
                players: players.len(),
                teams: num_teams,
            });
        }

        if !violations.is_empty() {
            return Err(ConfigError { violations });
        }

        Ok(Self {
            race_distance,
            points_goal,
            num_teams,
            players,
        })
    }

    /// Target kilometres a team must land on exactly.
    #[must_use]
    pub fn race_distance(&self) -> u16 {
        self.race_distance
    }

    /// Cumulative score at which the game ends.
    #[must_use]
    pub fn points_goal(&self) -> u32 {
        self.points_goal
    }

    /// Number of teams (2 or 3).
    #[must_use]
    pub fn num_teams(&self) -> u8 {
        self.num_teams
    }

    /// Configured seats in turn order.
    #[must_use]
    pub fn players(&self) -> &[PlayerSpec] {
        &self.players
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Players per team.
    #[must_use]
    pub fn team_size(&self) -> usize {
        self.players.len() / self.num_teams as usize
    }

    /// The team a player sits on (alternating seats).
    #[must_use]
    pub fn team_of(&self, player: PlayerId) -> TeamId {
        TeamId::new(player.0 % self.num_teams)
    }

    /// Iterate the seats belonging to a team.
    pub fn team_members(&self, team: TeamId) -> impl Iterator<Item = PlayerId> + '_ {
        PlayerId::all(self.player_count()).filter(move |&p| self.team_of(p) == team)
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        Self::new(raw.race_distance, raw.points_goal, raw.num_teams, raw.players)
    }
}
