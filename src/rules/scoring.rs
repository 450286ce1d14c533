//! Round scoring.
//!
//! Every bonus value lives in a [`BonusSchedule`] so the scoring pipeline
//! consults rule data rather than inline arithmetic. [`score_round`] turns
//! one team's driving zone and leftover hand cards into a [`RoundScore`]
//! breakdown; the caller sums nothing by hand.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Distance};
use crate::zones::DrivingZone;

/// Point values for every round bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusSchedule {
    /// Per safety card played or still held by the team.
    pub safety: u32,
    /// Extra points per safety played as a coup fourre.
    pub coup_fourre: u32,
    /// Landing exactly on the race distance.
    pub trip_completion: u32,
    /// Completing the trip without playing a 200 km card.
    pub delayed_action: u32,
    /// Completing the trip while every opposing team drove zero km.
    pub shutout: u32,
}

impl BonusSchedule {
    /// The standard Mille Bornes bonus table.
    pub const STANDARD: BonusSchedule = BonusSchedule {
        safety: 100,
        coup_fourre: 300,
        trip_completion: 400,
        delayed_action: 300,
        shutout: 500,
    };
}

impl Default for BonusSchedule {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// One team's score for a completed round, broken down by source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundScore {
    /// Sum of played distance card face values.
    pub distance: u32,
    /// Safety card bonuses (played or held).
    pub safeties: u32,
    /// Coup fourre bonuses.
    pub coup_fourres: u32,
    /// Trip completion bonus.
    pub trip_completion: u32,
    /// Delayed-action (no 200s) bonus.
    pub delayed_action: u32,
    /// Shutout bonus.
    pub shutout: u32,
}

impl RoundScore {
    /// Total points for the round.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.distance
            + self.safeties
            + self.coup_fourres
            + self.trip_completion
            + self.delayed_action
            + self.shutout
    }
}

/// Score one team's round.
///
/// `hand_cards` iterates the cards still held by every member of the team;
/// `trip_complete` marks the team that landed exactly on the race distance;
/// `shutout` marks a completed trip during which every opposing team played
/// zero distance cards.
pub fn score_round<'a>(
    zone: &DrivingZone,
    hand_cards: impl IntoIterator<Item = &'a Card>,
    trip_complete: bool,
    shutout: bool,
    schedule: &BonusSchedule,
) -> RoundScore {
    let played = zone.safeties().count() as u32;
    let held = hand_cards
        .into_iter()
        .filter(|card| matches!(card, Card::Safety(_)))
        .count() as u32;
    let coup_fourres = zone.safeties().filter(|(_, play)| play.coup_fourre).count() as u32;

    let no_two_hundreds = !zone.distance_cards().contains(&Distance::D200);

    RoundScore {
        distance: u32::from(zone.travelled()),
        safeties: (played + held) * schedule.safety,
        coup_fourres: coup_fourres * schedule.coup_fourre,
        trip_completion: if trip_complete {
            schedule.trip_completion
        } else {
            0
        },
        delayed_action: if trip_complete && no_two_hundreds {
            schedule.delayed_action
        } else {
            0
        },
        shutout: if trip_complete && shutout {
            schedule.shutout
        } else {
            0
        },
    }
}
