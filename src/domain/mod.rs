//! Domain types for the craps table.
//!
//! This module provides:
//! - Validated primitives: Dice, PointNumber, HardwayNumber
//! - Phase and RollEvent for the round state machine
//! - Wager kinds, layout spots and payout conventions
//! - Outcome records and the persistable SessionRecord

pub mod decimal;
pub mod outcome;
pub mod phase;
pub mod primitives;
pub mod session;
pub mod wager;

pub use decimal::Decimal;
pub use outcome::{OddsRatio, Outcome};
pub use phase::{Phase, RollEvent};
pub use primitives::{Dice, PointNumber};
pub use session::{GameplayMetrics, KindTally, SessionRecord};
pub use wager::{
    BetSpot, BonusFamily, HardwayNumber, HornNumber, LineSide, MakeEmSet, PayoutConvention,
    Wager, WagerKind,
};
