//! Make'Em (small / tall): every number of the set before a 7.
//!
//! Progress is a bitmask of the totals hit so far, one bit per total 2..=12.
//! The calculator never mutates it in place; it returns the updated value.

use crate::domain::{Dice, MakeEmSet, OddsRatio, Outcome};
use serde::{Deserialize, Serialize};

/// Small and tall both pay 34:1 profit, a 35x total return with the stake.
///
/// `Outcome::multiplier` for a Make'Em win reports the profit multiple (34),
/// like every other profit-convention wager.
pub const MAKE_EM_ODDS: OddsRatio = OddsRatio::to_one(34);

/// Totals hit so far by a Make'Em wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MakeEmProgress(u16);

impl MakeEmProgress {
    pub fn new() -> Self {
        MakeEmProgress(0)
    }

    fn bit(total: u8) -> u16 {
        1u16 << total
    }

    pub fn has_hit(&self, total: u8) -> bool {
        total <= 12 && self.0 & Self::bit(total) != 0
    }

    /// Progress with `total` marked as hit.
    pub fn with_hit(self, total: u8) -> Self {
        if total > 12 {
            return self;
        }
        MakeEmProgress(self.0 | Self::bit(total))
    }

    /// Numbers of `set` hit so far, ascending.
    pub fn hits(&self, set: MakeEmSet) -> Vec<u8> {
        set.numbers()
            .into_iter()
            .filter(|n| self.has_hit(*n))
            .collect()
    }

    pub fn is_complete(&self, set: MakeEmSet) -> bool {
        set.numbers().iter().all(|n| self.has_hit(*n))
    }
}

/// Result of one Make'Em evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MakeEmStep {
    pub progress: MakeEmProgress,
    /// True when this roll hit a number of the set that was not hit before.
    pub new_hit: bool,
    pub outcome: Option<Outcome>,
}

/// Evaluate a Make'Em wager against one roll.
///
/// A 7 loses regardless of progress. A total in the set updates progress even
/// while the bet is still pending; completing the set wins. No partial payout.
pub fn evaluate_make_em(
    set: MakeEmSet,
    progress: MakeEmProgress,
    dice: &Dice,
    stake: u64,
) -> MakeEmStep {
    let total = dice.total();
    if total == 7 {
        return MakeEmStep {
            progress,
            new_hit: false,
            outcome: Some(Outcome::loss()),
        };
    }

    if !set.contains(total) || progress.has_hit(total) {
        return MakeEmStep {
            progress,
            new_hit: false,
            outcome: None,
        };
    }

    let progress = progress.with_hit(total);
    let outcome = progress.is_complete(set).then(|| {
        Outcome::win(
            MAKE_EM_ODDS.profit(stake),
            MAKE_EM_ODDS.profit_multiplier(),
        )
    });

    MakeEmStep {
        progress,
        new_hit: true,
        outcome,
    }
}
