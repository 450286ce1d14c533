//! Card taxonomy: the closed set of Mille Bornes cards.
//!
//! Every card belongs to exactly one of five categories. The mapping is
//! enforced by exhaustive matches: adding a variant does not compile until
//! its category and standard count are supplied.
//!
//! ## Key Types
//!
//! - `Card`: the 19-variant sum of all printed cards
//! - `Category`: the five disjoint card families
//! - `Distance` / `Hazard` / `Remedy` / `Control` / `Safety`: per-family enums
//! - `Attack`: the subset of cards played against an opposing team

use serde::{Deserialize, Serialize};

/// A distance card, worth its printed kilometre value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Distance {
    /// 25 km.
    D25,
    /// 50 km.
    D50,
    /// 75 km.
    D75,
    /// 100 km.
    D100,
    /// 200 km.
    D200,
}

impl Distance {
    /// All distance cards in ascending order.
    pub const ALL: [Distance; 5] = [
        Distance::D25,
        Distance::D50,
        Distance::D75,
        Distance::D100,
        Distance::D200,
    ];

    /// The printed kilometre value.
    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Distance::D25 => 25,
            Distance::D50 => 50,
            Distance::D75 => 75,
            Distance::D100 => 100,
            Distance::D200 => 200,
        }
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} km", self.value())
    }
}

/// A hazard (calamity) card. Lands on a rolling opponent and blocks travel
/// until the matching remedy is played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hazard {
    /// Accident, cured by Repairs.
    Accident,
    /// Out of Gas, cured by Gasoline.
    OutOfGas,
    /// Flat Tire, cured by Spare Tire.
    FlatTire,
}

impl Hazard {
    /// All hazard cards.
    pub const ALL: [Hazard; 3] = [Hazard::Accident, Hazard::OutOfGas, Hazard::FlatTire];

    /// The remedy that cures this hazard.
    #[must_use]
    pub const fn remedy(self) -> Remedy {
        match self {
            Hazard::Accident => Remedy::Repairs,
            Hazard::OutOfGas => Remedy::Gasoline,
            Hazard::FlatTire => Remedy::SpareTire,
        }
    }

    /// The safety that grants immunity to this hazard.
    #[must_use]
    pub const fn counter(self) -> Safety {
        match self {
            Hazard::Accident => Safety::DrivingAce,
            Hazard::OutOfGas => Safety::ExtraTank,
            Hazard::FlatTire => Safety::PunctureProof,
        }
    }
}

impl std::fmt::Display for Hazard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Hazard::Accident => "Accident",
            Hazard::OutOfGas => "Out of Gas",
            Hazard::FlatTire => "Flat Tire",
        };
        f.write_str(name)
    }
}

/// A remedy card. Each cures exactly one hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Remedy {
    /// Cures Accident.
    Repairs,
    /// Cures Out of Gas.
    Gasoline,
    /// Cures Flat Tire.
    SpareTire,
}

impl Remedy {
    /// All remedy cards.
    pub const ALL: [Remedy; 3] = [Remedy::Repairs, Remedy::Gasoline, Remedy::SpareTire];

    /// The hazard this remedy cures.
    #[must_use]
    pub const fn cures(self) -> Hazard {
        match self {
            Remedy::Repairs => Hazard::Accident,
            Remedy::Gasoline => Hazard::OutOfGas,
            Remedy::SpareTire => Hazard::FlatTire,
        }
    }
}

impl std::fmt::Display for Remedy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Remedy::Repairs => "Repairs",
            Remedy::Gasoline => "Gasoline",
            Remedy::SpareTire => "Spare Tire",
        };
        f.write_str(name)
    }
}

/// A speed-control or roll/stop card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    /// Caps the target at 50 km per distance card.
    SpeedLimit,
    /// Lifts an active speed limit.
    EndOfLimit,
    /// Halts a rolling opponent.
    Stop,
    /// Required before a stopped team may travel.
    Roll,
}

impl Control {
    /// All control cards.
    pub const ALL: [Control; 4] = [
        Control::SpeedLimit,
        Control::EndOfLimit,
        Control::Stop,
        Control::Roll,
    ];
}

impl std::fmt::Display for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Control::SpeedLimit => "Speed Limit",
            Control::EndOfLimit => "End of Limit",
            Control::Stop => "Stop",
            Control::Roll => "Roll",
        };
        f.write_str(name)
    }
}

/// A safety card. Grants permanent immunity for the round and may be played
/// as a coup fourré.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Safety {
    /// Immune to Accident.
    DrivingAce,
    /// Immune to Out of Gas.
    ExtraTank,
    /// Immune to Flat Tire.
    PunctureProof,
    /// Immune to Stop and Speed Limit; rolls free after a remedy.
    RightOfWay,
}

impl Safety {
    /// All safety cards.
    pub const ALL: [Safety; 4] = [
        Safety::DrivingAce,
        Safety::ExtraTank,
        Safety::PunctureProof,
        Safety::RightOfWay,
    ];

    /// Dense index for per-safety storage (0-3).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Safety::DrivingAce => 0,
            Safety::ExtraTank => 1,
            Safety::PunctureProof => 2,
            Safety::RightOfWay => 3,
        }
    }

    /// The hazard this safety shields against, if any.
    ///
    /// Right of Way shields the Stop and Speed Limit attacks instead; see
    /// [`Safety::counters`].
    #[must_use]
    pub const fn shields(self) -> Option<Hazard> {
        match self {
            Safety::DrivingAce => Some(Hazard::Accident),
            Safety::ExtraTank => Some(Hazard::OutOfGas),
            Safety::PunctureProof => Some(Hazard::FlatTire),
            Safety::RightOfWay => None,
        }
    }

    /// Whether this safety counters the given attack.
    #[must_use]
    pub const fn counters(self, attack: Attack) -> bool {
        match (self, attack) {
            (Safety::DrivingAce, Attack::Hazard(Hazard::Accident))
            | (Safety::ExtraTank, Attack::Hazard(Hazard::OutOfGas))
            | (Safety::PunctureProof, Attack::Hazard(Hazard::FlatTire))
            | (Safety::RightOfWay, Attack::Stop | Attack::SpeedLimit) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Safety {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Safety::DrivingAce => "Driving Ace",
            Safety::ExtraTank => "Extra Tank",
            Safety::PunctureProof => "Puncture-Proof",
            Safety::RightOfWay => "Right of Way",
        };
        f.write_str(name)
    }
}

/// The five disjoint card categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Distance cards (25-200 km).
    Distance,
    /// Hazards (calamities).
    Hazard,
    /// Remedies.
    Remedy,
    /// Speed-control and roll/stop cards.
    Control,
    /// Safeties.
    Safety,
}

/// An attack: a card played against an opposing team's driving zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attack {
    /// One of the three calamities.
    Hazard(Hazard),
    /// The Stop card.
    Stop,
    /// The Speed Limit card.
    SpeedLimit,
}

/// One of the 19 printed Mille Bornes cards.
///
/// ## Example
///
/// ```
/// use bornes::cards::{Card, Category, Distance};
///
/// let card = Card::Distance(Distance::D100);
/// assert_eq!(card.category(), Category::Distance);
/// assert_eq!(card.standard_count(), 12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    /// A distance card.
    Distance(Distance),
    /// A hazard card.
    Hazard(Hazard),
    /// A remedy card.
    Remedy(Remedy),
    /// A control card.
    Control(Control),
    /// A safety card.
    Safety(Safety),
}

impl Card {
    /// All 19 cards in deck-building enumeration order.
    pub const ALL: [Card; 19] = [
        Card::Distance(Distance::D25),
        Card::Distance(Distance::D50),
        Card::Distance(Distance::D75),
        Card::Distance(Distance::D100),
        Card::Distance(Distance::D200),
        Card::Hazard(Hazard::Accident),
        Card::Hazard(Hazard::OutOfGas),
        Card::Hazard(Hazard::FlatTire),
        Card::Remedy(Remedy::Repairs),
        Card::Remedy(Remedy::Gasoline),
        Card::Remedy(Remedy::SpareTire),
        Card::Control(Control::SpeedLimit),
        Card::Control(Control::EndOfLimit),
        Card::Control(Control::Stop),
        Card::Control(Control::Roll),
        Card::Safety(Safety::DrivingAce),
        Card::Safety(Safety::ExtraTank),
        Card::Safety(Safety::PunctureProof),
        Card::Safety(Safety::RightOfWay),
    ];

    /// The category this card belongs to. Exhaustive by construction.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Card::Distance(_) => Category::Distance,
            Card::Hazard(_) => Category::Hazard,
            Card::Remedy(_) => Category::Remedy,
            Card::Control(_) => Category::Control,
            Card::Safety(_) => Category::Safety,
        }
    }

    /// Copies of this card in the standard 106-card deck.
    ///
    /// Exhaustive over all 19 variants: a new card cannot be added without
    /// supplying its count here.
    #[must_use]
    pub const fn standard_count(self) -> usize {
        match self {
            Card::Distance(Distance::D25) => 10,
            Card::Distance(Distance::D50) => 10,
            Card::Distance(Distance::D75) => 10,
            Card::Distance(Distance::D100) => 12,
            Card::Distance(Distance::D200) => 4,
            Card::Hazard(Hazard::Accident) => 3,
            Card::Hazard(Hazard::OutOfGas) => 3,
            Card::Hazard(Hazard::FlatTire) => 3,
            Card::Remedy(Remedy::Repairs) => 6,
            Card::Remedy(Remedy::Gasoline) => 6,
            Card::Remedy(Remedy::SpareTire) => 6,
            Card::Control(Control::SpeedLimit) => 4,
            Card::Control(Control::EndOfLimit) => 6,
            Card::Control(Control::Stop) => 5,
            Card::Control(Control::Roll) => 14,
            Card::Safety(_) => 1,
        }
    }

    /// The attack this card represents when played against an opponent,
    /// or `None` for cards played on one's own team.
    #[must_use]
    pub const fn attack(self) -> Option<Attack> {
        match self {
            Card::Hazard(h) => Some(Attack::Hazard(h)),
            Card::Control(Control::Stop) => Some(Attack::Stop),
            Card::Control(Control::SpeedLimit) => Some(Attack::SpeedLimit),
            _ => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Distance(d) => d.fmt(f),
            Card::Hazard(h) => h.fmt(f),
            Card::Remedy(r) => r.fmt(f),
            Card::Control(c) => c.fmt(f),
            Card::Safety(s) => s.fmt(f),
        }
    }
}
