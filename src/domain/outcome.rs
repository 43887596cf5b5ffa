//! Calculator outcomes and payout ratios.

use crate::domain::{Decimal, PayoutConvention};
use serde::{Deserialize, Serialize};

/// Result of evaluating one wager against one roll.
///
/// Calculators return `Option<Outcome>`; `None` means the wager keeps working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub is_win: bool,
    /// Neither won nor lost; the stake stays with the player unchanged.
    pub is_push: bool,
    /// Amount credited to the balance. Profit only or stake-plus-profit,
    /// depending on the wager's `PayoutConvention`.
    pub credit_amount: u64,
    /// Profit multiple (profit convention) or total-return multiple (total payout).
    pub multiplier: Decimal,
}

impl Outcome {
    pub fn win(credit_amount: u64, multiplier: Decimal) -> Self {
        Outcome {
            is_win: true,
            is_push: false,
            credit_amount,
            multiplier,
        }
    }

    pub fn loss() -> Self {
        Outcome {
            is_win: false,
            is_push: false,
            credit_amount: 0,
            multiplier: Decimal::zero(),
        }
    }

    pub fn push() -> Self {
        Outcome {
            is_win: false,
            is_push: true,
            credit_amount: 0,
            multiplier: Decimal::zero(),
        }
    }

    pub fn is_loss(&self) -> bool {
        !self.is_win && !self.is_push
    }
}

impl PayoutConvention {
    /// What the player ends up with relative to before the stake was placed,
    /// assuming the caller returns the stake exactly when this convention says so.
    ///
    /// Positive on a win, zero on a push, negative (the stake) on a loss.
    pub fn net_credit(&self, stake: u64, outcome: &Outcome) -> i64 {
        let stake = stake as i64;
        if outcome.is_push {
            return 0;
        }
        if !outcome.is_win {
            return -stake;
        }
        let credit = outcome.credit_amount as i64;
        match self {
            // Stake comes back via the collect step, on top of the profit.
            PayoutConvention::Profit => credit,
            // Credit already carries the stake.
            PayoutConvention::TotalPayout => credit - stake,
        }
    }

    /// Amount the caller hands back for the stake on a win.
    pub fn stake_return(&self, stake: u64) -> u64 {
        match self {
            PayoutConvention::Profit => stake,
            PayoutConvention::TotalPayout => 0,
        }
    }
}

/// A "pays:against" ratio such as 6:5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OddsRatio {
    pub pays: u64,
    pub against: u64,
}

impl OddsRatio {
    pub const fn new(pays: u64, against: u64) -> Self {
        OddsRatio { pays, against }
    }

    /// "N:1" ratio.
    pub const fn to_one(pays: u64) -> Self {
        OddsRatio { pays, against: 1 }
    }

    /// Integer profit for `stake`, truncated toward zero.
    pub fn profit(&self, stake: u64) -> u64 {
        if self.against == 0 {
            return 0;
        }
        stake.saturating_mul(self.pays) / self.against
    }

    /// Stake plus profit.
    pub fn total_return(&self, stake: u64) -> u64 {
        stake.saturating_add(self.profit(stake))
    }

    /// Profit multiple (6:5 -> 1.2).
    pub fn profit_multiplier(&self) -> Decimal {
        Decimal::from_ratio(self.pays, self.against)
    }

    /// Total-return multiple (9:1 -> 10.0).
    pub fn total_multiplier(&self) -> Decimal {
        Decimal::from_ratio(self.pays.saturating_add(self.against), self.against)
    }
}

impl std::fmt::Display for OddsRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.pays, self.against)
    }
}
