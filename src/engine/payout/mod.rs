//! Bet outcome calculators, one family per file.
//!
//! Every calculator is a pure function of the dice (or the `RollEvent` they
//! produced), the stake, and where relevant the phase before the roll.
//!
//! Conventions for `Outcome::credit_amount`:
//! - Profit (line, odds, place, field, make'em): winnings only. The caller
//!   returns the stake separately.
//! - Total payout (hardway, horn): stake plus winnings. The caller must not
//!   return the stake again.

pub mod field;
pub mod hardway;
pub mod horn;
pub mod line;
pub mod make_em;
pub mod place;

pub use field::evaluate_field;
pub use hardway::{evaluate_hardway, hardway_odds, is_soft_way};
pub use horn::{evaluate_horn, horn_name, horn_odds};
pub use line::{
    evaluate_dont_pass, evaluate_lay_odds, evaluate_pass_line, evaluate_pass_odds,
    lay_odds_ratio, pass_odds_ratio,
};
pub use make_em::{evaluate_make_em, MakeEmProgress, MakeEmStep, MAKE_EM_ODDS};
pub use place::{evaluate_place, PlacePaytable};
