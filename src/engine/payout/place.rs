//! Place bets on 4, 5, 6, 8, 9, 10.

use crate::domain::{OddsRatio, Outcome, Phase, PointNumber};
use serde::{Deserialize, Serialize};

/// House table of place-bet payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePaytable {
    pub four_ten: OddsRatio,
    pub five_nine: OddsRatio,
    pub six_eight: OddsRatio,
}

impl PlacePaytable {
    /// Standard casino payouts: 9:5 on 4/10, 7:5 on 5/9, 7:6 on 6/8.
    pub fn standard() -> Self {
        Self {
            four_ten: OddsRatio::new(9, 5),
            five_nine: OddsRatio::new(7, 5),
            six_eight: OddsRatio::new(7, 6),
        }
    }

    /// True-odds payouts: 2:1, 3:2, 6:5.
    pub fn true_odds() -> Self {
        Self {
            four_ten: OddsRatio::new(2, 1),
            five_nine: OddsRatio::new(3, 2),
            six_eight: OddsRatio::new(6, 5),
        }
    }

    pub fn ratio(&self, number: PointNumber) -> OddsRatio {
        match number.value() {
            4 | 10 => self.four_ten,
            5 | 9 => self.five_nine,
            _ => self.six_eight,
        }
    }
}

impl Default for PlacePaytable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Place bet on `number`, given the phase as it was before this roll.
///
/// Working only while a point was established before the roll, which
/// includes the roll that makes the point. A 7 in that phase loses; on the
/// come-out the bet is off and stays pending.
pub fn evaluate_place(
    number: PointNumber,
    phase_before: Phase,
    total: u8,
    stake: u64,
    paytable: &PlacePaytable,
) -> Option<Outcome> {
    if !phase_before.is_point() {
        return None;
    }
    if total == number.value() {
        let ratio = paytable.ratio(number);
        Some(Outcome::win(ratio.profit(stake), ratio.profit_multiplier()))
    } else if total == 7 {
        Some(Outcome::loss())
    } else {
        None
    }
}
