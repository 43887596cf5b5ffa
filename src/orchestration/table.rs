use crate::config::Config;
use crate::domain::{
    BetSpot, BonusFamily, Dice, LineSide, MakeEmSet, Outcome, Phase, RollEvent, SessionRecord,
    Wager, WagerKind,
};
use crate::engine::payout::{
    evaluate_dont_pass, evaluate_field, evaluate_hardway, evaluate_horn, evaluate_lay_odds,
    evaluate_make_em, evaluate_pass_line, evaluate_pass_odds, evaluate_place, horn_name,
};
use crate::engine::{
    BetPlacement, LineSnapshot, MakeEmProgress, PhaseEngine, RebetEngine, RebetProposal,
    RebetSettings, RollSummary, SaveMode, SaveStatus, SessionMetricsTracker,
};
use crate::error::EngineError;
use crate::store::{SessionStore, StoreError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a wager was not accepted. Rejections are outcomes, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("Wager amount must be positive")]
    ZeroAmount,
    #[error("Insufficient balance: need {required}, have {available}")]
    InsufficientBalance { required: u64, available: u64 },
    #[error("{0:?} wagers are disabled")]
    FamilyDisabled(BonusFamily),
    #[error("Line wagers can only be placed on the come-out roll")]
    LineBetAfterComeOut,
    #[error("Odds need an established point")]
    NoPoint,
    #[error("Odds need a {0:?} line wager")]
    MissingLineWager(LineSide),
    #[error("Make'Em can only be placed on the come-out roll")]
    MakeEmAfterComeOut,
    #[error("Make'Em already has hits; wait for it to resolve")]
    MakeEmInProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The wager now on the spot, including any earlier chips.
    Placed(Wager),
    Rejected(RejectReason),
}

impl Placement {
    pub fn is_placed(&self) -> bool {
        matches!(self, Placement::Placed(_))
    }
}

/// One wager settled by a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettledOutcome {
    pub spot: BetSpot,
    pub stake: u64,
    pub outcome: Outcome,
    /// Balance change relative to before the stake was placed.
    pub net_credit: i64,
    /// The stake stayed on the layout and can be collected or left working.
    pub stake_left_up: bool,
}

/// Everything a presentation layer needs to show one roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResolution {
    pub dice: Dice,
    pub event: RollEvent,
    pub phase_before: Phase,
    pub phase_after: Phase,
    /// Settled wagers in evaluation order.
    pub outcomes: Vec<SettledOutcome>,
    pub balance_after: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horn_call: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebet: Option<RebetProposal>,
}

impl RollResolution {
    /// Sum of net credits across every settled wager.
    pub fn net_credit(&self) -> i64 {
        self.outcomes.iter().map(|o| o.net_credit).sum()
    }
}

/// Settlement order within one roll: one-roll wagers first, contract wagers
/// and their odds next, Make'Em last.
fn evaluation_rank(spot: &BetSpot) -> u8 {
    match spot {
        BetSpot::Field => 0,
        BetSpot::Horn(_) => 1,
        BetSpot::Hardway(_) => 2,
        BetSpot::Place(_) => 3,
        BetSpot::PassLine => 4,
        BetSpot::PassOdds => 5,
        BetSpot::DontPass => 6,
        BetSpot::LayOdds => 7,
        BetSpot::MakeEm(_) => 8,
    }
}

/// One craps table: balance, layout, round state and session bookkeeping.
///
/// All balance mutation happens synchronously inside the methods below.
#[derive(Debug)]
pub struct Table {
    config: Config,
    balance: u64,
    phase: PhaseEngine,
    wagers: BTreeMap<BetSpot, u64>,
    make_em: BTreeMap<MakeEmSet, MakeEmProgress>,
    /// Spots whose stake stayed up after winning on the last roll.
    left_up: BTreeSet<BetSpot>,
    metrics: SessionMetricsTracker,
    rebet: RebetEngine,
}

impl Table {
    pub fn new(config: Config, now: DateTime<Utc>) -> Self {
        let mut metrics = SessionMetricsTracker::new();
        metrics.start(config.starting_balance, now);
        Self {
            balance: config.starting_balance,
            rebet: RebetEngine::new(config.rebet),
            config,
            phase: PhaseEngine::new(),
            wagers: BTreeMap::new(),
            make_em: BTreeMap::new(),
            left_up: BTreeSet::new(),
            metrics,
        }
    }

    /// Continue a stored session. The layout starts empty; the balance is the
    /// record's ending balance.
    pub fn resume(config: Config, record: SessionRecord, phase: Phase, now: DateTime<Utc>) -> Self {
        let balance = record.ending_balance;
        let mut metrics = SessionMetricsTracker::new();
        metrics.resume(record, now);
        Self {
            balance,
            rebet: RebetEngine::new(config.rebet),
            config,
            phase: PhaseEngine::with_phase(phase),
            wagers: BTreeMap::new(),
            make_em: BTreeMap::new(),
            left_up: BTreeSet::new(),
            metrics,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Chips in hand, excluding anything on the layout.
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Total currently wagered on the layout.
    pub fn outstanding(&self) -> u64 {
        self.wagers
            .values()
            .fold(0u64, |acc, amount| acc.saturating_add(*amount))
    }

    /// Balance plus chips on the layout.
    pub fn bankroll(&self) -> u64 {
        self.balance.saturating_add(self.outstanding())
    }

    pub fn phase(&self) -> Phase {
        self.phase.phase()
    }

    pub fn wager(&self, spot: BetSpot) -> u64 {
        self.wagers.get(&spot).copied().unwrap_or(0)
    }

    pub fn wagers(&self) -> impl Iterator<Item = Wager> + '_ {
        self.wagers
            .iter()
            .map(|(spot, amount)| Wager::new(*spot, *amount))
    }

    pub fn make_em_progress(&self, set: MakeEmSet) -> MakeEmProgress {
        self.make_em.get(&set).copied().unwrap_or_default()
    }

    pub fn record(&self) -> Option<&SessionRecord> {
        self.metrics.record()
    }

    pub fn metrics(&self) -> &SessionMetricsTracker {
        &self.metrics
    }

    pub fn update_rebet_settings(&mut self, settings: RebetSettings) {
        self.config.rebet = settings;
        self.rebet.update_settings(settings);
    }

    fn lines(&self) -> LineSnapshot {
        LineSnapshot {
            pass_line: self.wager(BetSpot::PassLine),
            dont_pass: self.wager(BetSpot::DontPass),
        }
    }

    fn check_placement(&self, spot: BetSpot, amount: u64) -> Result<(), RejectReason> {
        if amount == 0 {
            return Err(RejectReason::ZeroAmount);
        }
        if amount > self.balance {
            return Err(RejectReason::InsufficientBalance {
                required: amount,
                available: self.balance,
            });
        }
        if let Some(family) = spot.kind().bonus_family() {
            if !self.config.is_enabled(family) {
                return Err(RejectReason::FamilyDisabled(family));
            }
        }

        let phase = self.phase.phase();
        match spot {
            BetSpot::PassLine | BetSpot::DontPass if phase.is_point() => {
                Err(RejectReason::LineBetAfterComeOut)
            }
            BetSpot::PassOdds | BetSpot::LayOdds => {
                if !phase.is_point() {
                    return Err(RejectReason::NoPoint);
                }
                let side = if spot == BetSpot::PassOdds {
                    LineSide::Pass
                } else {
                    LineSide::DontPass
                };
                if self.wager(side.into()) == 0 {
                    return Err(RejectReason::MissingLineWager(side));
                }
                Ok(())
            }
            BetSpot::MakeEm(_) if phase.is_point() => Err(RejectReason::MakeEmAfterComeOut),
            BetSpot::MakeEm(set) if self.make_em_progress(set) != MakeEmProgress::new() => {
                Err(RejectReason::MakeEmInProgress)
            }
            _ => Ok(()),
        }
    }

    /// Put `amount` on `spot`, adding to any chips already there.
    pub fn place_bet(&mut self, spot: BetSpot, amount: u64) -> Placement {
        if let Err(reason) = self.check_placement(spot, amount) {
            debug!(spot = ?spot, amount, reason = %reason, "Wager rejected");
            return Placement::Rejected(reason);
        }

        // Bankroll is unchanged by moving chips onto the layout.
        let bankroll = self.bankroll();
        self.balance -= amount;
        let on_spot = self.wagers.entry(spot).or_insert(0);
        *on_spot = on_spot.saturating_add(amount);
        let total = *on_spot;
        self.left_up.remove(&spot);

        if let Some(side) = spot.line_side() {
            self.rebet.record_placement(side, total);
        }
        self.metrics.record_bet_placed(BetPlacement {
            kind: spot.kind(),
            amount,
            balance: bankroll,
        });
        self.metrics.record_active_wagers(self.wagers.len());

        debug!(spot = ?spot, amount, total, balance = self.balance, "Wager placed");
        Placement::Placed(Wager::new(spot, total))
    }

    /// Manually take a wager down, returning its stake to the balance.
    ///
    /// Line wagers are contract bets once a point is set, and a Make'Em that
    /// has already hit a number stays until it resolves; both return `None`.
    pub fn remove_bet(&mut self, spot: BetSpot) -> Option<u64> {
        let is_contract = match spot {
            BetSpot::PassLine | BetSpot::DontPass => self.phase.is_point_phase(),
            BetSpot::MakeEm(set) => self.make_em_progress(set) != MakeEmProgress::new(),
            _ => false,
        };
        if is_contract {
            debug!(spot = ?spot, "Contract wager cannot be removed");
            return None;
        }

        let amount = self.take_down(spot)?;
        if let Some(side) = spot.line_side() {
            self.rebet.record_manual_removal(side);
        }
        Some(amount)
    }

    /// Pick up a stake that stayed up after winning on the last roll. This is
    /// not a manual removal, so rebet is not suppressed.
    pub fn collect_stake(&mut self, spot: BetSpot) -> Option<u64> {
        if !self.left_up.contains(&spot) {
            return None;
        }
        self.take_down(spot)
    }

    fn take_down(&mut self, spot: BetSpot) -> Option<u64> {
        let amount = self.wagers.remove(&spot)?;
        self.left_up.remove(&spot);
        if let BetSpot::MakeEm(set) = spot {
            self.make_em.remove(&set);
        }
        self.balance = self.balance.saturating_add(amount);
        self.metrics.record_active_wagers(self.wagers.len());
        debug!(spot = ?spot, amount, balance = self.balance, "Wager taken down");
        Some(amount)
    }

    /// Out-of-band balance increase (ATM visit).
    pub fn top_up(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.metrics.record_top_up(amount, self.bankroll());
    }

    /// Current rebet suggestion outside of a roll, e.g. after collecting a
    /// winning line stake.
    pub fn rebet_proposal(&self) -> Option<RebetProposal> {
        self.rebet.propose_now(self.lines(), self.balance)
    }

    pub fn apply_rebet(&mut self, proposal: RebetProposal) -> Placement {
        info!(side = ?proposal.side, amount = proposal.amount, "Applying rebet");
        self.place_bet(proposal.side.into(), proposal.amount)
    }

    /// Resolve one roll of the dice against every wager on the layout.
    pub fn roll(&mut self, die1: u8, die2: u8) -> Result<RollResolution, EngineError> {
        let dice = Dice::new(die1, die2)?;
        let total = dice.total();
        let phase_before = self.phase.phase();
        let outstanding = self.outstanding();
        let bankroll_before = self.bankroll();

        let event = self.phase.process_roll(total)?;
        self.metrics.begin_roll(bankroll_before, outstanding);
        self.left_up.clear();

        let mut spots: Vec<(BetSpot, u64)> = self.wagers.iter().map(|(s, a)| (*s, *a)).collect();
        spots.sort_by_key(|(spot, _)| (evaluation_rank(spot), *spot));

        let mut outcomes = Vec::new();
        for (spot, stake) in spots {
            if let Some(outcome) = self.evaluate(spot, stake, &dice, event, phase_before) {
                outcomes.push(self.settle(spot, stake, outcome));
            }
        }

        let phase_after = self.phase.phase();
        self.metrics.record_roll(RollSummary {
            seven_rolled: total == 7,
            point_made: event == RollEvent::PointMade,
            balance_after: self.bankroll(),
        });
        self.metrics.record_active_wagers(self.wagers.len());

        let rebet = self.rebet.propose(event, self.lines(), self.balance);

        debug!(
            dice = %dice,
            event = %event,
            settled = outcomes.len(),
            balance = self.balance,
            "Roll resolved"
        );

        Ok(RollResolution {
            dice,
            event,
            phase_before,
            phase_after,
            outcomes,
            balance_after: self.balance,
            horn_call: horn_name(die1, die2),
            rebet,
        })
    }

    fn evaluate(
        &mut self,
        spot: BetSpot,
        stake: u64,
        dice: &Dice,
        event: RollEvent,
        phase_before: Phase,
    ) -> Option<Outcome> {
        let total = dice.total();
        match spot {
            BetSpot::Field => Some(evaluate_field(total, stake)),
            BetSpot::Horn(target) => Some(evaluate_horn(target, dice, stake)),
            BetSpot::Hardway(target) => evaluate_hardway(target, dice, phase_before, stake),
            BetSpot::Place(number) => {
                evaluate_place(number, phase_before, total, stake, &self.config.place_paytable)
            }
            BetSpot::PassLine => evaluate_pass_line(event, stake),
            BetSpot::DontPass => evaluate_dont_pass(event, total, stake),
            BetSpot::PassOdds => {
                evaluate_pass_odds(phase_before.point()?, event, stake)
            }
            BetSpot::LayOdds => evaluate_lay_odds(phase_before.point()?, event, stake),
            BetSpot::MakeEm(set) => {
                let step = evaluate_make_em(set, self.make_em_progress(set), dice, stake);
                self.make_em.insert(set, step.progress);
                step.outcome
            }
        }
    }

    fn settle(&mut self, spot: BetSpot, stake: u64, outcome: Outcome) -> SettledOutcome {
        let convention = spot.kind().convention();
        let net_credit = convention.net_credit(stake, &outcome);
        let mut stake_left_up = false;

        if outcome.is_push {
            stake_left_up = true;
        } else if outcome.is_win {
            self.balance = self.balance.saturating_add(outcome.credit_amount);
            match spot.kind() {
                WagerKind::PassLine | WagerKind::DontPass | WagerKind::Place => {
                    stake_left_up = true;
                    self.left_up.insert(spot);
                }
                _ => {
                    self.balance = self.balance.saturating_add(convention.stake_return(stake));
                    self.clear_spot(spot);
                }
            }
        } else {
            self.clear_spot(spot);
        }

        debug!(
            spot = ?spot,
            stake,
            win = outcome.is_win,
            push = outcome.is_push,
            credit = outcome.credit_amount,
            net_credit,
            "Wager settled"
        );

        SettledOutcome {
            spot,
            stake,
            outcome,
            net_credit,
            stake_left_up,
        }
    }

    fn clear_spot(&mut self, spot: BetSpot) {
        self.wagers.remove(&spot);
        if let BetSpot::MakeEm(set) = spot {
            self.make_em.remove(&set);
        }
    }

    /// App went to the background: stop the active clock and bring the record
    /// to a storable state. Phase and wagers are untouched.
    pub fn background(&mut self, now: DateTime<Utc>) -> Option<&SessionRecord> {
        self.metrics.pause(now);
        let bankroll = self.bankroll();
        self.metrics.finalize(bankroll, now)
    }

    pub fn foreground(&mut self, now: DateTime<Utc>) {
        self.metrics.resume_clock(now);
    }

    pub fn finalize(&mut self, now: DateTime<Utc>) -> Option<&SessionRecord> {
        let bankroll = self.bankroll();
        let record = self.metrics.finalize(bankroll, now);
        if let Some(record) = record {
            info!(
                session = %record.id,
                rolls = record.roll_count,
                net = record.net_result(),
                "Session finalized"
            );
        }
        record
    }

    pub fn save(
        &mut self,
        store: &mut dyn SessionStore,
        mode: SaveMode,
    ) -> Result<SaveStatus, StoreError> {
        self.metrics.save(store, mode).map_err(|e| {
            warn!(error = %e, "Failed to save session");
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HardwayNumber, HornNumber, PointNumber};
    use crate::store::MemorySessionStore;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn table(balance: u64) -> Table {
        let config = Config {
            starting_balance: balance,
            ..Config::default()
        };
        Table::new(config, t0())
    }

    fn rebet_table(balance: u64, amount: u64) -> Table {
        let config = Config {
            starting_balance: balance,
            rebet: RebetSettings {
                enabled: true,
                amount,
            },
            ..Config::default()
        };
        Table::new(config, t0())
    }

    fn point(v: u8) -> PointNumber {
        PointNumber::new(v).unwrap()
    }

    #[test]
    fn test_place_deducts_and_accumulates() {
        let mut table = table(100);
        assert!(table.place_bet(BetSpot::PassLine, 10).is_placed());
        assert_eq!(
            table.place_bet(BetSpot::PassLine, 5),
            Placement::Placed(Wager::new(BetSpot::PassLine, 15))
        );
        assert_eq!(table.balance(), 85);
        assert_eq!(table.bankroll(), 100);
    }

    #[test]
    fn test_rejections() {
        let mut table = table(20);
        assert_eq!(
            table.place_bet(BetSpot::Field, 0),
            Placement::Rejected(RejectReason::ZeroAmount)
        );
        assert_eq!(
            table.place_bet(BetSpot::Field, 21),
            Placement::Rejected(RejectReason::InsufficientBalance {
                required: 21,
                available: 20
            })
        );
        assert_eq!(
            table.place_bet(BetSpot::PassOdds, 5),
            Placement::Rejected(RejectReason::NoPoint)
        );

        table.roll(2, 2).unwrap();
        assert_eq!(
            table.place_bet(BetSpot::PassLine, 5),
            Placement::Rejected(RejectReason::LineBetAfterComeOut)
        );
        assert_eq!(
            table.place_bet(BetSpot::PassOdds, 5),
            Placement::Rejected(RejectReason::MissingLineWager(LineSide::Pass))
        );
        assert_eq!(
            table.place_bet(BetSpot::MakeEm(MakeEmSet::Small), 5),
            Placement::Rejected(RejectReason::MakeEmAfterComeOut)
        );
        assert_eq!(table.balance(), 20);
    }

    #[test]
    fn test_make_em_stake_locked_once_hit() {
        let mut table = table(1_000);
        let spot = BetSpot::MakeEm(MakeEmSet::Tall);
        table.place_bet(spot, 1);
        table.roll(6, 6).unwrap();
        table.roll(5, 6).unwrap();
        assert_eq!(table.phase(), Phase::ComeOut);
        assert_eq!(table.make_em_progress(MakeEmSet::Tall).hits(MakeEmSet::Tall), vec![11, 12]);

        assert_eq!(
            table.place_bet(spot, 500),
            Placement::Rejected(RejectReason::MakeEmInProgress)
        );
        assert_eq!(table.remove_bet(spot), None);
        assert_eq!(table.wager(spot), 1);

        // A 7 clears the bet and its progress; a fresh wager is accepted.
        table.roll(3, 4).unwrap();
        assert!(table.place_bet(spot, 5).is_placed());
    }

    #[test]
    fn test_disabled_family_rejected() {
        let mut config = Config::default();
        config.bonus_wagers.remove(&BonusFamily::Horn);
        let mut table = Table::new(config, t0());
        assert_eq!(
            table.place_bet(BetSpot::Horn(HornNumber::Yo), 5),
            Placement::Rejected(RejectReason::FamilyDisabled(BonusFamily::Horn))
        );
        assert!(table.place_bet(BetSpot::Field, 5).is_placed());
    }

    #[test]
    fn test_pass_line_win_leaves_stake_up() {
        let mut table = table(100);
        table.place_bet(BetSpot::PassLine, 10);
        let res = table.roll(3, 4).unwrap();

        assert_eq!(res.event, RollEvent::PassLineWin);
        assert_eq!(res.outcomes.len(), 1);
        assert!(res.outcomes[0].stake_left_up);
        assert_eq!(res.outcomes[0].net_credit, 10);
        assert_eq!(table.balance(), 100);
        assert_eq!(table.wager(BetSpot::PassLine), 10);
    }

    #[test]
    fn test_odds_paid_at_true_odds_and_cleared() {
        let mut table = table(100);
        table.place_bet(BetSpot::PassLine, 10);
        table.roll(5, 5).unwrap();
        assert_eq!(table.phase(), Phase::Point(point(10)));
        assert!(table.place_bet(BetSpot::PassOdds, 20).is_placed());

        let res = table.roll(6, 4).unwrap();
        assert_eq!(res.event, RollEvent::PointMade);
        let odds = res
            .outcomes
            .iter()
            .find(|o| o.spot == BetSpot::PassOdds)
            .unwrap();
        assert_eq!(odds.outcome.credit_amount, 40);
        assert_eq!(odds.net_credit, 40);
        assert_eq!(table.wager(BetSpot::PassOdds), 0);
        // 70 in hand + 20 odds back + 40 odds profit + 10 line profit.
        assert_eq!(table.balance(), 140);
        assert_eq!(table.wager(BetSpot::PassLine), 10);
    }

    #[test]
    fn test_evaluation_order() {
        let mut table = table(1_000);
        table.place_bet(BetSpot::MakeEm(MakeEmSet::Tall), 5);
        table.place_bet(BetSpot::PassLine, 5);
        table.place_bet(BetSpot::Field, 5);
        table.place_bet(BetSpot::Horn(HornNumber::Yo), 5);
        table.place_bet(BetSpot::DontPass, 5);

        let res = table.roll(5, 6).unwrap();
        let order: Vec<BetSpot> = res.outcomes.iter().map(|o| o.spot).collect();
        assert_eq!(
            order,
            vec![
                BetSpot::Field,
                BetSpot::Horn(HornNumber::Yo),
                BetSpot::PassLine,
                BetSpot::DontPass,
            ]
        );
        assert_eq!(res.horn_call, Some("Yo-Eleven"));
        assert!(table.make_em_progress(MakeEmSet::Tall).has_hit(11));
    }

    #[test]
    fn test_hardway_total_payout_not_double_counted() {
        let mut table = table(100);
        table.place_bet(BetSpot::Hardway(HardwayNumber::from_total(6).unwrap()), 10);
        let res = table.roll(3, 3).unwrap();

        assert_eq!(res.outcomes[0].outcome.credit_amount, 100);
        assert_eq!(res.outcomes[0].net_credit, 90);
        assert_eq!(table.balance(), 190);
        assert_eq!(table.outstanding(), 0);
    }

    #[test]
    fn test_dont_pass_bar_twelve_pushes() {
        let mut table = table(100);
        table.place_bet(BetSpot::DontPass, 10);
        let res = table.roll(6, 6).unwrap();
        assert!(res.outcomes[0].outcome.is_push);
        assert_eq!(res.outcomes[0].net_credit, 0);
        assert_eq!(table.wager(BetSpot::DontPass), 10);
        assert_eq!(table.balance(), 90);
    }

    #[test]
    fn test_place_off_on_come_out() {
        let mut table = table(100);
        table.place_bet(BetSpot::Place(point(6)), 12);
        let res = table.roll(4, 2).unwrap();
        assert!(res.outcomes.is_empty());

        let res = table.roll(5, 1).unwrap();
        assert_eq!(res.outcomes[0].outcome.credit_amount, 14);
        assert!(res.outcomes[0].stake_left_up);
        assert_eq!(table.wager(BetSpot::Place(point(6))), 12);
    }

    #[test]
    fn test_loss_triggers_rebet_proposal() {
        let mut table = rebet_table(100, 5);
        table.place_bet(BetSpot::PassLine, 10);
        let res = table.roll(1, 1).unwrap();

        assert_eq!(res.event, RollEvent::PassLineLoss);
        let proposal = res.rebet.unwrap();
        assert_eq!(proposal.side, LineSide::Pass);
        assert_eq!(proposal.amount, 10);
        assert!(table.apply_rebet(proposal).is_placed());
        assert_eq!(table.wager(BetSpot::PassLine), 10);
    }

    #[test]
    fn test_win_left_up_suppresses_rebet_until_collected() {
        let mut table = rebet_table(100, 5);
        table.place_bet(BetSpot::PassLine, 10);
        let res = table.roll(6, 5).unwrap();
        assert!(res.rebet.is_none());

        assert_eq!(table.collect_stake(BetSpot::PassLine), Some(10));
        assert_eq!(
            table.rebet_proposal(),
            Some(RebetProposal {
                side: LineSide::Pass,
                amount: 10
            })
        );
    }

    #[test]
    fn test_manual_removal_suppresses_rebet() {
        let mut table = rebet_table(100, 5);
        table.place_bet(BetSpot::PassLine, 10);
        assert_eq!(table.remove_bet(BetSpot::PassLine), Some(10));
        let res = table.roll(1, 1).unwrap();
        assert!(res.rebet.is_none());
        assert!(table.rebet_proposal().is_none());
    }

    #[test]
    fn test_line_is_contract_after_point() {
        let mut table = table(100);
        table.place_bet(BetSpot::PassLine, 10);
        table.roll(2, 2).unwrap();
        assert_eq!(table.remove_bet(BetSpot::PassLine), None);
        assert_eq!(table.wager(BetSpot::PassLine), 10);
    }

    #[test]
    fn test_collect_requires_recent_win() {
        let mut table = table(100);
        table.place_bet(BetSpot::Field, 10);
        assert_eq!(table.collect_stake(BetSpot::Field), None);
    }

    #[test]
    fn test_invalid_die_is_error_and_changes_nothing() {
        let mut table = table(100);
        table.place_bet(BetSpot::Field, 10);
        assert_eq!(table.roll(0, 3), Err(EngineError::DieOutOfRange(0)));
        assert_eq!(table.record().unwrap().roll_count, 0);
        assert_eq!(table.wager(BetSpot::Field), 10);
    }

    #[test]
    fn test_loss_chasing_uses_bankroll() {
        let mut table = table(100);
        table.place_bet(BetSpot::PassLine, 10);
        table.roll(1, 2).unwrap();
        table.place_bet(BetSpot::PassLine, 10);

        let metrics = &table.record().unwrap().metrics;
        assert_eq!(metrics.last_balance_before_roll, Some(100));
        assert_eq!(metrics.bets_after_loss_count, 1);
    }

    #[test]
    fn test_save_and_finalize() {
        let mut store = MemorySessionStore::new();
        let mut table = table(100);
        table.place_bet(BetSpot::Field, 10);
        table.roll(3, 3).unwrap();

        table.background(t0() + chrono::Duration::seconds(10));
        assert_eq!(
            table.save(&mut store, SaveMode::IfUnsaved).unwrap(),
            SaveStatus::Written
        );
        table.foreground(t0() + chrono::Duration::seconds(100));
        let record = table
            .finalize(t0() + chrono::Duration::seconds(105))
            .unwrap();
        assert_eq!(record.active_duration_secs, 15);
        assert_eq!(record.balance_history, vec![100, 90]);
        assert_eq!(
            table.save(&mut store, SaveMode::IfUnsaved).unwrap(),
            SaveStatus::Skipped
        );
        assert_eq!(
            table.save(&mut store, SaveMode::Force).unwrap(),
            SaveStatus::Written
        );
    }
}
