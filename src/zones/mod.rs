//! Driving zones: the per-team travel state machines.
//!
//! ## Key Types
//!
//! - `DrivingZone`: roll state, speed limit, active hazard, played
//!   safeties, accumulated distance
//! - `RollState`: the two travel states
//! - `SafetyPlay`: record of a played safety (with coup fourre flag)

pub mod driving;

pub use driving::{DrivingZone, RollState, SafetyPlay};
