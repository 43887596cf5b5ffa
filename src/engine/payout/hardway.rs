//! Hardways. Total-payout convention: the credit already includes the stake.

use crate::domain::{Dice, HardwayNumber, OddsRatio, Outcome, Phase};

/// Quoted odds for a hardway: 9:1 on hard 6/8, 7:1 on hard 4/10.
pub fn hardway_odds(target: HardwayNumber) -> OddsRatio {
    match target.total() {
        6 | 8 => OddsRatio::to_one(9),
        _ => OddsRatio::to_one(7),
    }
}

/// Hardway on `target`.
///
/// - Matching pair: win, credit `stake * (odds + 1)`.
/// - Target total rolled the easy way: soft-way loss, nothing credited.
/// - 7 while the point phase was active before the roll: loss.
/// - Anything else: still working.
pub fn evaluate_hardway(
    target: HardwayNumber,
    dice: &Dice,
    phase_before: Phase,
    stake: u64,
) -> Option<Outcome> {
    let total = dice.total();
    if total == target.total() {
        if dice.is_pair() {
            let odds = hardway_odds(target);
            return Some(Outcome::win(
                odds.total_return(stake),
                odds.total_multiplier(),
            ));
        }
        return Some(Outcome::loss());
    }
    if total == 7 && phase_before.is_point() {
        return Some(Outcome::loss());
    }
    None
}

/// True when the dice make `target`'s total without a pair.
pub fn is_soft_way(target: HardwayNumber, dice: &Dice) -> bool {
    dice.total() == target.total() && !dice.is_pair()
}
