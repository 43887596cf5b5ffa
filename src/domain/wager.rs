//! Wager kinds, layout spots and their targets.

use crate::domain::{Dice, PointNumber};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// The wager families tracked by session metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WagerKind {
    PassLine,
    Odds,
    Place,
    Hardway,
    Horn,
    Field,
    DontPass,
    MakeEm,
}

impl WagerKind {
    pub const ALL: [WagerKind; 8] = [
        WagerKind::PassLine,
        WagerKind::Odds,
        WagerKind::Place,
        WagerKind::Hardway,
        WagerKind::Horn,
        WagerKind::Field,
        WagerKind::DontPass,
        WagerKind::MakeEm,
    ];

    /// How `Outcome::credit_amount` is to be read for this kind.
    pub fn convention(&self) -> PayoutConvention {
        match self {
            WagerKind::Hardway | WagerKind::Horn => PayoutConvention::TotalPayout,
            _ => PayoutConvention::Profit,
        }
    }

    /// Bonus family this kind belongs to, if it is an optional wager.
    pub fn bonus_family(&self) -> Option<BonusFamily> {
        match self {
            WagerKind::Hardway => Some(BonusFamily::Hardway),
            WagerKind::Horn => Some(BonusFamily::Horn),
            WagerKind::Field => Some(BonusFamily::Field),
            WagerKind::MakeEm => Some(BonusFamily::MakeEm),
            _ => None,
        }
    }
}

/// Optional wager families a settings collaborator can switch off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BonusFamily {
    Hardway,
    Horn,
    Field,
    MakeEm,
}

impl std::str::FromStr for BonusFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hardway" | "hardways" => Ok(BonusFamily::Hardway),
            "horn" => Ok(BonusFamily::Horn),
            "field" => Ok(BonusFamily::Field),
            "makeem" | "make_em" | "make-em" => Ok(BonusFamily::MakeEm),
            other => Err(format!("unknown bonus wager family {}", other)),
        }
    }
}

/// Payout convention of a calculator's `credit_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayoutConvention {
    /// Credit is profit only; the stake is returned by a separate collect step.
    Profit,
    /// Credit already includes the stake; no separate stake return applies.
    TotalPayout,
}

/// Which line control a line wager sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineSide {
    #[default]
    Pass,
    DontPass,
}

/// Hard 4, 6, 8 or 10, identified by the die face of the pair (2..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HardwayNumber(u8);

impl HardwayNumber {
    pub const ALL: [HardwayNumber; 4] = [
        HardwayNumber(2),
        HardwayNumber(3),
        HardwayNumber(4),
        HardwayNumber(5),
    ];

    /// Hardway whose pair shows `face` on both dice (3 -> hard 6).
    ///
    /// # Errors
    /// Returns `EngineError::InvalidHardwayNumber` outside 2..=5.
    pub fn from_die_value(face: u8) -> Result<Self, EngineError> {
        match face {
            2..=5 => Ok(HardwayNumber(face)),
            other => Err(EngineError::InvalidHardwayNumber(other)),
        }
    }

    /// Hardway for a total (4, 6, 8 or 10).
    pub fn from_total(total: u8) -> Result<Self, EngineError> {
        match total {
            4 | 6 | 8 | 10 => Ok(HardwayNumber(total / 2)),
            other => Err(EngineError::InvalidHardwayNumber(other)),
        }
    }

    pub fn die_value(&self) -> u8 {
        self.0
    }

    pub fn total(&self) -> u8 {
        self.0 * 2
    }
}

impl TryFrom<u8> for HardwayNumber {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        HardwayNumber::from_die_value(value)
    }
}

impl From<HardwayNumber> for u8 {
    fn from(value: HardwayNumber) -> Self {
        value.0
    }
}

/// The four horn combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HornNumber {
    /// 1-1.
    SnakeEyes,
    /// 1-2 or 2-1.
    AceDeuce,
    /// 5-6 or 6-5.
    Yo,
    /// 6-6.
    Boxcars,
}

impl HornNumber {
    pub const ALL: [HornNumber; 4] = [
        HornNumber::SnakeEyes,
        HornNumber::AceDeuce,
        HornNumber::Yo,
        HornNumber::Boxcars,
    ];

    /// The exact pair this horn number covers, low face first.
    pub fn pair(&self) -> (u8, u8) {
        match self {
            HornNumber::SnakeEyes => (1, 1),
            HornNumber::AceDeuce => (1, 2),
            HornNumber::Yo => (5, 6),
            HornNumber::Boxcars => (6, 6),
        }
    }

    /// Horn number matching the dice, if any.
    pub fn from_dice(dice: &Dice) -> Option<Self> {
        HornNumber::ALL
            .into_iter()
            .find(|horn| horn.pair() == dice.sorted())
    }

    pub fn name(&self) -> &'static str {
        match self {
            HornNumber::SnakeEyes => "Snake Eyes",
            HornNumber::AceDeuce => "Ace-Deuce",
            HornNumber::Yo => "Yo-Eleven",
            HornNumber::Boxcars => "Boxcars",
        }
    }
}

/// Target set of a Make'Em wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MakeEmSet {
    /// 2, 3, 4, 5, 6.
    Small,
    /// 8, 9, 10, 11, 12.
    Tall,
}

impl MakeEmSet {
    pub fn numbers(&self) -> [u8; 5] {
        match self {
            MakeEmSet::Small => [2, 3, 4, 5, 6],
            MakeEmSet::Tall => [8, 9, 10, 11, 12],
        }
    }

    pub fn contains(&self, total: u8) -> bool {
        self.numbers().contains(&total)
    }
}

/// A concrete position on the layout: a wager kind plus its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "spot", content = "target", rename_all = "camelCase")]
pub enum BetSpot {
    PassLine,
    DontPass,
    /// Odds behind the pass line.
    PassOdds,
    /// Lay odds behind don't pass.
    LayOdds,
    Place(PointNumber),
    Hardway(HardwayNumber),
    Horn(HornNumber),
    Field,
    MakeEm(MakeEmSet),
}

impl BetSpot {
    pub fn kind(&self) -> WagerKind {
        match self {
            BetSpot::PassLine => WagerKind::PassLine,
            BetSpot::DontPass => WagerKind::DontPass,
            BetSpot::PassOdds | BetSpot::LayOdds => WagerKind::Odds,
            BetSpot::Place(_) => WagerKind::Place,
            BetSpot::Hardway(_) => WagerKind::Hardway,
            BetSpot::Horn(_) => WagerKind::Horn,
            BetSpot::Field => WagerKind::Field,
            BetSpot::MakeEm(_) => WagerKind::MakeEm,
        }
    }

    /// The line control this spot is, if it is a line wager.
    pub fn line_side(&self) -> Option<LineSide> {
        match self {
            BetSpot::PassLine => Some(LineSide::Pass),
            BetSpot::DontPass => Some(LineSide::DontPass),
            _ => None,
        }
    }
}

impl From<LineSide> for BetSpot {
    fn from(side: LineSide) -> Self {
        match side {
            LineSide::Pass => BetSpot::PassLine,
            LineSide::DontPass => BetSpot::DontPass,
        }
    }
}

/// A wager amount on a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wager {
    pub spot: BetSpot,
    pub amount: u64,
}

impl Wager {
    pub fn new(spot: BetSpot, amount: u64) -> Self {
        Wager { spot, amount }
    }

    pub fn kind(&self) -> WagerKind {
        self.spot.kind()
    }
}
