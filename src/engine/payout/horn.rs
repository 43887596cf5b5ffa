//! Horn bets: one roll, exact pair. Total-payout convention.

use crate::domain::{Dice, HornNumber, OddsRatio, Outcome};

/// 30:1 on 2 and 12, 15:1 on 3 and 11.
pub fn horn_odds(target: HornNumber) -> OddsRatio {
    match target {
        HornNumber::SnakeEyes | HornNumber::Boxcars => OddsRatio::to_one(30),
        HornNumber::AceDeuce | HornNumber::Yo => OddsRatio::to_one(15),
    }
}

/// Display name of the horn combination shown by the dice, if any.
///
/// Order of the faces does not matter.
pub fn horn_name(die1: u8, die2: u8) -> Option<&'static str> {
    let dice = Dice::new(die1, die2).ok()?;
    HornNumber::from_dice(&dice).map(|horn| horn.name())
}

/// Horn bet on `target`. Resolves on every roll.
pub fn evaluate_horn(target: HornNumber, dice: &Dice, stake: u64) -> Outcome {
    if HornNumber::from_dice(dice) == Some(target) {
        let odds = horn_odds(target);
        Outcome::win(odds.total_return(stake), odds.total_multiplier())
    } else {
        Outcome::loss()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Decimal;

    fn dice(a: u8, b: u8) -> Dice {
        Dice::new(a, b).unwrap()
    }

    #[test]
    fn test_horn_names() {
        assert_eq!(horn_name(1, 1), Some("Snake Eyes"));
        assert_eq!(horn_name(6, 6), Some("Boxcars"));
        assert_eq!(horn_name(1, 2), Some("Ace-Deuce"));
        assert_eq!(horn_name(2, 1), Some("Ace-Deuce"));
        assert_eq!(horn_name(6, 5), Some("Yo-Eleven"));
        assert_eq!(horn_name(3, 4), None);
        assert_eq!(horn_name(0, 9), None);
    }

    #[test]
    fn test_snake_eyes_pays_thirty_one_for_one() {
        let outcome = evaluate_horn(HornNumber::SnakeEyes, &dice(1, 1), 5);
        assert!(outcome.is_win);
        assert_eq!(outcome.multiplier, Decimal::from_int(31));
        assert_eq!(outcome.credit_amount, 155);
    }

    #[test]
    fn test_ace_deuce_pays_sixteen_for_one() {
        let outcome = evaluate_horn(HornNumber::AceDeuce, &dice(2, 1), 5);
        assert!(outcome.is_win);
        assert_eq!(outcome.multiplier, Decimal::from_int(16));
        assert_eq!(outcome.credit_amount, 80);
    }

    #[test]
    fn test_horn_loses_on_any_other_roll() {
        assert!(evaluate_horn(HornNumber::Boxcars, &dice(1, 1), 5).is_loss());
        assert!(evaluate_horn(HornNumber::Yo, &dice(4, 3), 5).is_loss());
    }
}
