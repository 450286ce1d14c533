//! Per-team driving zone state machine.
//!
//! A zone tracks travel status (`Stopped`/`Rolling`), the active speed
//! limit, the active hazard, played safety cards, and the distance cards
//! accumulated toward the race target.
//!
//! The zone physically holds the cards that form its permanent state:
//! distance cards, the active hazard card, and played safeties. Everything
//! it releases (a remedied hazard) is handed back to the caller for the
//! discard pile, which keeps the deck-conservation census exact.
//!
//! Structural invariant, maintained by construction: a hazard is only ever
//! set while the zone is `Stopped`, and distance can only be added while
//! `Rolling` with no hazard.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Attack, Distance, Hazard, Remedy, Safety};
use crate::core::moves::MoveRejection;

/// The two travel states of a driving zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollState {
    /// Not travelling; distance cards are refused.
    Stopped,
    /// Travelling; distance cards may be played.
    Rolling,
}

/// Record of a played safety card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyPlay {
    /// Whether the safety was played as an immediate counter to a
    /// just-landed attack (worth a scoring bonus).
    pub coup_fourre: bool,
}

/// One team's driving zone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrivingZone {
    roll_state: RollState,
    speed_limit: bool,
    hazard: Option<Hazard>,
    safeties: [Option<SafetyPlay>; 4],
    distance_cards: SmallVec<[Distance; 16]>,
}

impl Default for DrivingZone {
    fn default() -> Self {
        Self::new()
    }
}

impl DrivingZone {
    /// A fresh zone: stopped, no limit, no hazard, nothing played.
    #[must_use]
    pub fn new() -> Self {
        Self {
            roll_state: RollState::Stopped,
            speed_limit: false,
            hazard: None,
            safeties: [None; 4],
            distance_cards: SmallVec::new(),
        }
    }

    /// Current travel state.
    #[must_use]
    pub fn roll_state(&self) -> RollState {
        self.roll_state
    }

    /// Whether a speed limit is active.
    #[must_use]
    pub fn speed_limit_active(&self) -> bool {
        self.speed_limit
    }

    /// The hazard currently blocking travel, if any.
    #[must_use]
    pub fn active_hazard(&self) -> Option<Hazard> {
        self.hazard
    }

    /// The play record for a safety, if it has been played.
    #[must_use]
    pub fn safety(&self, safety: Safety) -> Option<SafetyPlay> {
        self.safeties[safety.index()]
    }

    /// Whether a safety has been played on this zone.
    #[must_use]
    pub fn has_safety(&self, safety: Safety) -> bool {
        self.safeties[safety.index()].is_some()
    }

    /// All played safeties with their records.
    pub fn safeties(&self) -> impl Iterator<Item = (Safety, SafetyPlay)> + '_ {
        Safety::ALL
            .into_iter()
            .filter_map(|s| self.safeties[s.index()].map(|play| (s, play)))
    }

    /// Distance cards played so far this round.
    #[must_use]
    pub fn distance_cards(&self) -> &[Distance] {
        &self.distance_cards
    }

    /// Kilometres travelled this round.
    #[must_use]
    pub fn travelled(&self) -> u16 {
        self.distance_cards.iter().map(|d| d.value()).sum()
    }

    /// The safety that shields this zone from `attack`, if one is played.
    #[must_use]
    pub fn immunity_against(&self, attack: Attack) -> Option<Safety> {
        Safety::ALL
            .into_iter()
            .find(|s| self.has_safety(*s) && s.counters(attack))
    }

    /// Play a Roll card: `Stopped` with no hazard becomes `Rolling`.
    pub fn roll(&mut self) -> Result<(), MoveRejection> {
        if let Some(hazard) = self.hazard {
            return Err(MoveRejection::HazardActive { hazard });
        }
        if self.roll_state == RollState::Rolling {
            return Err(MoveRejection::NotStopped);
        }

        self.roll_state = RollState::Rolling;
        Ok(())
    }

    /// A Stop attack lands: `Rolling` becomes `Stopped`.
    pub fn stop(&mut self) -> Result<(), MoveRejection> {
        if let Some(safety) = self.immunity_against(Attack::Stop) {
            return Err(MoveRejection::TargetImmune { safety });
        }
        if self.roll_state == RollState::Stopped {
            return Err(MoveRejection::NotRolling);
        }

        self.roll_state = RollState::Stopped;
        Ok(())
    }

    /// A hazard attack lands: the zone stops and holds the hazard card.
    pub fn apply_hazard(&mut self, hazard: Hazard) -> Result<(), MoveRejection> {
        if let Some(safety) = self.immunity_against(Attack::Hazard(hazard)) {
            return Err(MoveRejection::TargetImmune { safety });
        }
        if self.roll_state == RollState::Stopped {
            return Err(MoveRejection::NotRolling);
        }

        self.roll_state = RollState::Stopped;
        self.hazard = Some(hazard);
        Ok(())
    }

    /// Cure the matching hazard. Returns the released hazard card for the
    /// discard pile. The zone stays `Stopped` until a Roll, unless Right
    /// of Way is active.
    pub fn apply_remedy(&mut self, remedy: Remedy) -> Result<Hazard, MoveRejection> {
        match self.hazard {
            Some(hazard) if hazard == remedy.cures() => {
                self.hazard = None;
                if self.has_safety(Safety::RightOfWay) {
                    self.roll_state = RollState::Rolling;
                }
                Ok(hazard)
            }
            _ => Err(MoveRejection::NoMatchingHazard { remedy }),
        }
    }

    /// Record a played safety.
    ///
    /// If it shields the active hazard, the hazard is cleared (the released
    /// card is returned for the discard pile) and the zone rolls. Right of
    /// Way additionally lifts any speed limit and rolls a hazard-free zone.
    pub fn play_safety(&mut self, safety: Safety, coup_fourre: bool) -> Option<Hazard> {
        self.safeties[safety.index()] = Some(SafetyPlay { coup_fourre });

        if safety == Safety::RightOfWay {
            self.speed_limit = false;
        }

        let released = match self.hazard {
            Some(hazard) if safety.shields() == Some(hazard) => {
                self.hazard = None;
                Some(hazard)
            }
            _ => None,
        };

        // Clearing the matching hazard forces travel; Right of Way rolls
        // any hazard-free zone. Other safeties never change roll state.
        if released.is_some() || (safety == Safety::RightOfWay && self.hazard.is_none()) {
            self.roll_state = RollState::Rolling;
        }
        released
    }

    /// A Speed Limit attack lands.
    pub fn apply_speed_limit(&mut self) -> Result<(), MoveRejection> {
        if let Some(safety) = self.immunity_against(Attack::SpeedLimit) {
            return Err(MoveRejection::TargetImmune { safety });
        }
        if self.speed_limit {
            return Err(MoveRejection::SpeedLimitActive);
        }

        self.speed_limit = true;
        Ok(())
    }

    /// Play End of Limit: lifts the active speed limit.
    pub fn end_speed_limit(&mut self) -> Result<(), MoveRejection> {
        if !self.speed_limit {
            return Err(MoveRejection::NoSpeedLimit);
        }

        self.speed_limit = false;
        Ok(())
    }

    /// Play a distance card toward `race_distance`.
    ///
    /// Returns `true` when the play lands the zone exactly on the race
    /// distance (the only way to finish: overshooting is rejected).
    pub fn play_distance(
        &mut self,
        distance: Distance,
        race_distance: u16,
    ) -> Result<bool, MoveRejection> {
        if let Some(hazard) = self.hazard {
            return Err(MoveRejection::HazardActive { hazard });
        }
        if self.roll_state == RollState::Stopped {
            return Err(MoveRejection::NotRolling);
        }

        let value = distance.value();
        if value > 50 && self.speed_limit && !self.has_safety(Safety::DrivingAce) {
            return Err(MoveRejection::SpeedLimitExceeded { value });
        }

        let travelled = self.travelled();
        if travelled + value > race_distance {
            return Err(MoveRejection::ExceedsRaceDistance {
                travelled,
                value,
                race_distance,
            });
        }

        self.distance_cards.push(distance);
        Ok(travelled + value == race_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolling_zone() -> DrivingZone {
        let mut zone = DrivingZone::new();
        zone.roll().unwrap();
        zone
    }

    #[test]
    fn test_new_zone_is_stopped_and_clean() {
        let zone = DrivingZone::new();

        assert_eq!(zone.roll_state(), RollState::Stopped);
        assert!(!zone.speed_limit_active());
        assert_eq!(zone.active_hazard(), None);
        assert_eq!(zone.safeties().count(), 0);
        assert!(zone.distance_cards().is_empty());
        assert_eq!(zone.travelled(), 0);
    }

    #[test]
    fn test_roll_requires_stopped() {
        let mut zone = rolling_zone();
        assert_eq!(zone.roll(), Err(MoveRejection::NotStopped));
    }

    #[test]
    fn test_roll_blocked_by_hazard() {
        let mut zone = rolling_zone();
        zone.apply_hazard(Hazard::Accident).unwrap();

        assert_eq!(
            zone.roll(),
            Err(MoveRejection::HazardActive {
                hazard: Hazard::Accident
            })
        );
    }

    #[test]
    fn test_hazard_requires_rolling_target() {
        let mut zone = DrivingZone::new();
        assert_eq!(
            zone.apply_hazard(Hazard::FlatTire),
            Err(MoveRejection::NotRolling)
        );
    }

    #[test]
    fn test_hazard_stops_zone() {
        let mut zone = rolling_zone();
        zone.apply_hazard(Hazard::OutOfGas).unwrap();

        assert_eq!(zone.roll_state(), RollState::Stopped);
        assert_eq!(zone.active_hazard(), Some(Hazard::OutOfGas));
    }

    #[test]
    fn test_matching_remedy_clears_hazard_but_stays_stopped() {
        let mut zone = rolling_zone();
        zone.apply_hazard(Hazard::Accident).unwrap();

        let released = zone.apply_remedy(Remedy::Repairs).unwrap();

        assert_eq!(released, Hazard::Accident);
        assert_eq!(zone.active_hazard(), None);
        assert_eq!(zone.roll_state(), RollState::Stopped);
    }

    #[test]
    fn test_mismatched_remedy_rejected() {
        let mut zone = rolling_zone();
        zone.apply_hazard(Hazard::Accident).unwrap();

        assert_eq!(
            zone.apply_remedy(Remedy::Gasoline),
            Err(MoveRejection::NoMatchingHazard {
                remedy: Remedy::Gasoline
            })
        );
        assert_eq!(zone.active_hazard(), Some(Hazard::Accident));
    }

    #[test]
    fn test_remedy_with_right_of_way_rolls_immediately() {
        let mut zone = rolling_zone();
        zone.play_safety(Safety::RightOfWay, false);
        zone.apply_hazard(Hazard::FlatTire).unwrap();

        zone.apply_remedy(Remedy::SpareTire).unwrap();

        assert_eq!(zone.roll_state(), RollState::Rolling);
    }

    #[test]
    fn test_safety_grants_hazard_immunity() {
        let mut zone = rolling_zone();
        zone.play_safety(Safety::PunctureProof, false);

        assert_eq!(
            zone.apply_hazard(Hazard::FlatTire),
            Err(MoveRejection::TargetImmune {
                safety: Safety::PunctureProof
            })
        );
        // Other hazards still land.
        zone.apply_hazard(Hazard::Accident).unwrap();
    }

    #[test]
    fn test_matching_safety_clears_hazard_and_rolls() {
        let mut zone = rolling_zone();
        zone.apply_hazard(Hazard::OutOfGas).unwrap();

        let released = zone.play_safety(Safety::ExtraTank, true);

        assert_eq!(released, Some(Hazard::OutOfGas));
        assert_eq!(zone.active_hazard(), None);
        assert_eq!(zone.roll_state(), RollState::Rolling);
        assert_eq!(
            zone.safety(Safety::ExtraTank),
            Some(SafetyPlay { coup_fourre: true })
        );
    }

    #[test]
    fn test_unrelated_safety_leaves_hazard_in_place() {
        let mut zone = rolling_zone();
        zone.apply_hazard(Hazard::Accident).unwrap();

        let released = zone.play_safety(Safety::ExtraTank, false);

        assert_eq!(released, None);
        assert_eq!(zone.active_hazard(), Some(Hazard::Accident));
        assert_eq!(zone.roll_state(), RollState::Stopped);
    }

    #[test]
    fn test_ordinary_safety_does_not_start_travel() {
        let mut zone = DrivingZone::new();
        zone.play_safety(Safety::DrivingAce, false);

        assert_eq!(zone.roll_state(), RollState::Stopped);
    }

    #[test]
    fn test_right_of_way_blocks_stop_and_limit() {
        let mut zone = rolling_zone();
        zone.play_safety(Safety::RightOfWay, false);

        assert_eq!(
            zone.stop(),
            Err(MoveRejection::TargetImmune {
                safety: Safety::RightOfWay
            })
        );
        assert_eq!(
            zone.apply_speed_limit(),
            Err(MoveRejection::TargetImmune {
                safety: Safety::RightOfWay
            })
        );
    }

    #[test]
    fn test_right_of_way_lifts_limit_and_rolls_stopped_zone() {
        let mut zone = rolling_zone();
        zone.apply_speed_limit().unwrap();
        zone.stop().unwrap();

        zone.play_safety(Safety::RightOfWay, false);

        assert!(!zone.speed_limit_active());
        assert_eq!(zone.roll_state(), RollState::Rolling);
    }

    #[test]
    fn test_stop_requires_rolling() {
        let mut zone = DrivingZone::new();
        assert_eq!(zone.stop(), Err(MoveRejection::NotRolling));
    }

    #[test]
    fn test_speed_limit_cannot_stack() {
        let mut zone = rolling_zone();
        zone.apply_speed_limit().unwrap();

        assert_eq!(
            zone.apply_speed_limit(),
            Err(MoveRejection::SpeedLimitActive)
        );
    }

    #[test]
    fn test_end_of_limit_requires_active_limit() {
        let mut zone = rolling_zone();
        assert_eq!(zone.end_speed_limit(), Err(MoveRejection::NoSpeedLimit));

        zone.apply_speed_limit().unwrap();
        zone.end_speed_limit().unwrap();
        assert!(!zone.speed_limit_active());
    }

    #[test]
    fn test_distance_requires_rolling() {
        let mut zone = DrivingZone::new();
        assert_eq!(
            zone.play_distance(Distance::D50, 1000),
            Err(MoveRejection::NotRolling)
        );
    }

    #[test]
    fn test_distance_under_speed_limit() {
        let mut zone = rolling_zone();
        zone.apply_speed_limit().unwrap();

        assert_eq!(
            zone.play_distance(Distance::D75, 1000),
            Err(MoveRejection::SpeedLimitExceeded { value: 75 })
        );
        zone.play_distance(Distance::D50, 1000).unwrap();
        zone.play_distance(Distance::D25, 1000).unwrap();
        assert_eq!(zone.travelled(), 75);
    }

    #[test]
    fn test_driving_ace_ignores_speed_limit() {
        let mut zone = rolling_zone();
        zone.apply_speed_limit().unwrap();
        zone.play_safety(Safety::DrivingAce, false);

        zone.play_distance(Distance::D200, 1000).unwrap();
        assert_eq!(zone.travelled(), 200);
    }

    #[test]
    fn test_exact_landing_rule() {
        let mut zone = rolling_zone();
        zone.play_distance(Distance::D200, 300).unwrap();

        assert_eq!(
            zone.play_distance(Distance::D200, 300),
            Err(MoveRejection::ExceedsRaceDistance {
                travelled: 200,
                value: 200,
                race_distance: 300
            })
        );

        assert!(!zone.play_distance(Distance::D75, 300).unwrap());
        assert!(zone.play_distance(Distance::D25, 300).unwrap());
        assert_eq!(zone.travelled(), 300);
    }

    #[test]
    fn test_zone_serialization() {
        let mut zone = rolling_zone();
        zone.play_safety(Safety::DrivingAce, true);
        zone.play_distance(Distance::D100, 1000).unwrap();

        let json = serde_json::to_string(&zone).unwrap();
        let back: DrivingZone = serde_json::from_str(&json).unwrap();
        assert_eq!(zone, back);
    }
}
