//! Pass line, don't pass, pass odds and lay odds.
//!
//! All four use the profit convention: `credit_amount` is winnings only.

use crate::domain::{Decimal, OddsRatio, Outcome, PointNumber, RollEvent};

const EVEN_MONEY: OddsRatio = OddsRatio::to_one(1);

/// True odds paid on pass-line odds for a point.
pub fn pass_odds_ratio(point: PointNumber) -> OddsRatio {
    match point.value() {
        4 | 10 => OddsRatio::new(2, 1),
        5 | 9 => OddsRatio::new(3, 2),
        _ => OddsRatio::new(6, 5),
    }
}

/// True odds paid on lay odds for a point (the inverse of pass odds).
pub fn lay_odds_ratio(point: PointNumber) -> OddsRatio {
    match point.value() {
        4 | 10 => OddsRatio::new(1, 2),
        5 | 9 => OddsRatio::new(2, 3),
        _ => OddsRatio::new(5, 6),
    }
}

fn even_money_win(stake: u64) -> Outcome {
    Outcome::win(EVEN_MONEY.profit(stake), Decimal::from_int(1))
}

/// Pass line: wins on a come-out natural or when the point is made.
pub fn evaluate_pass_line(event: RollEvent, stake: u64) -> Option<Outcome> {
    match event {
        RollEvent::PassLineWin | RollEvent::PointMade => Some(even_money_win(stake)),
        RollEvent::PassLineLoss | RollEvent::SevenOut => Some(Outcome::loss()),
        RollEvent::PointEstablished(_) | RollEvent::NoAction => None,
    }
}

/// Don't pass: come-out 2/3 win, 12 pushes (bar), 7/11 lose; in the point
/// phase a seven-out wins and a made point loses.
pub fn evaluate_dont_pass(event: RollEvent, total: u8, stake: u64) -> Option<Outcome> {
    match event {
        RollEvent::PassLineLoss if total == 12 => Some(Outcome::push()),
        RollEvent::PassLineLoss => Some(even_money_win(stake)),
        RollEvent::PassLineWin => Some(Outcome::loss()),
        RollEvent::SevenOut => Some(even_money_win(stake)),
        RollEvent::PointMade => Some(Outcome::loss()),
        RollEvent::PointEstablished(_) | RollEvent::NoAction => None,
    }
}

/// Odds behind the pass line, working while `point` is established.
pub fn evaluate_pass_odds(point: PointNumber, event: RollEvent, stake: u64) -> Option<Outcome> {
    match event {
        RollEvent::PointMade => {
            let ratio = pass_odds_ratio(point);
            Some(Outcome::win(ratio.profit(stake), ratio.profit_multiplier()))
        }
        RollEvent::SevenOut => Some(Outcome::loss()),
        _ => None,
    }
}

/// Lay odds behind don't pass, mirroring the pass odds.
pub fn evaluate_lay_odds(point: PointNumber, event: RollEvent, stake: u64) -> Option<Outcome> {
    match event {
        RollEvent::SevenOut => {
            let ratio = lay_odds_ratio(point);
            Some(Outcome::win(ratio.profit(stake), ratio.profit_multiplier()))
        }
        RollEvent::PointMade => Some(Outcome::loss()),
        _ => None,
    }
}
