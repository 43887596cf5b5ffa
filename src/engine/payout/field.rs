//! Field: one roll, profit convention.

use crate::domain::{OddsRatio, Outcome};

/// Field payout for a total, `None` when the total loses.
pub fn field_odds(total: u8) -> Option<OddsRatio> {
    match total {
        2 | 12 => Some(OddsRatio::to_one(2)),
        3 | 4 | 9 | 10 | 11 => Some(OddsRatio::to_one(1)),
        _ => None,
    }
}

/// Field bet. Resolves on every roll.
pub fn evaluate_field(total: u8, stake: u64) -> Outcome {
    match field_odds(total) {
        Some(odds) => Outcome::win(odds.profit(stake), odds.profit_multiplier()),
        None => Outcome::loss(),
    }
}
