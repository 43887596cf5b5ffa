//! Session record and gameplay metrics.

use crate::domain::{Decimal, WagerKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Count and total amount wagered for one wager kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindTally {
    pub count: u64,
    pub total_amount: u64,
}

/// Behavioural and volume counters for one session.
///
/// Uses BTreeMap so serialized output has a deterministic key order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameplayMetrics {
    pub bets_by_kind: BTreeMap<WagerKind, KindTally>,
    pub largest_bet_amount: u64,
    /// Percent of balance (inclusive of the bet) the largest bet represented.
    pub largest_bet_percent: Decimal,
    pub max_concurrent_bets: u64,
    /// Bets placed while the balance was below the balance before the last roll.
    pub bets_after_loss_count: u64,
    pub atm_visits_count: u64,
    pub last_balance_before_roll: Option<u64>,
}

impl GameplayMetrics {
    pub fn tally(&self, kind: WagerKind) -> KindTally {
        self.bets_by_kind.get(&kind).copied().unwrap_or_default()
    }

    pub fn total_bets(&self) -> u64 {
        self.bets_by_kind.values().map(|t| t.count).sum()
    }

    pub fn total_wagered(&self) -> u64 {
        self.bets_by_kind
            .values()
            .fold(0u64, |acc, t| acc.saturating_add(t.total_amount))
    }
}

/// A plain, persistable record of one play session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Set on the first finalize.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ended_at: Option<DateTime<Utc>>,
    /// Foreground time only.
    pub active_duration_secs: i64,
    pub starting_balance: u64,
    pub ending_balance: u64,
    pub roll_count: u64,
    pub sevens_rolled: u64,
    pub points_made: u64,
    /// Initial balance followed by one entry per resolved roll.
    pub balance_history: Vec<u64>,
    /// Outstanding wager total, parallel to `balance_history`.
    pub bet_size_history: Vec<u64>,
    /// Indices into `balance_history` whose entry includes a manual top-up.
    pub atm_indices: Vec<usize>,
    pub metrics: GameplayMetrics,
}

impl SessionRecord {
    /// A fresh record with the starting balance as its only history entry.
    pub fn new(starting_balance: u64, started_at: DateTime<Utc>) -> Self {
        SessionRecord {
            id: Uuid::new_v4(),
            started_at,
            ended_at: None,
            active_duration_secs: 0,
            starting_balance,
            ending_balance: starting_balance,
            roll_count: 0,
            sevens_rolled: 0,
            points_made: 0,
            balance_history: vec![starting_balance],
            bet_size_history: vec![0],
            atm_indices: Vec::new(),
            metrics: GameplayMetrics::default(),
        }
    }

    /// Ending minus starting balance, ignoring top-ups.
    pub fn net_result(&self) -> i64 {
        self.ending_balance as i64 - self.starting_balance as i64
    }

    /// Make both histories the same length.
    ///
    /// With no rolls, both collapse to a single entry. Otherwise the shorter
    /// history is padded with its last known value. Top-up marks that no longer
    /// point into `balance_history` are dropped. Idempotent.
    pub fn reconcile_histories(&mut self, current_balance: u64) {
        self.collapse_or_pad(current_balance);
        let len = self.balance_history.len();
        self.atm_indices.retain(|&i| i < len);
    }

    fn collapse_or_pad(&mut self, current_balance: u64) {
        if self.roll_count == 0 {
            let first_balance = self
                .balance_history
                .first()
                .copied()
                .unwrap_or(current_balance);
            let first_bet = self.bet_size_history.first().copied().unwrap_or(0);
            self.balance_history = vec![first_balance];
            self.bet_size_history = vec![first_bet];
            return;
        }

        if self.balance_history.is_empty() {
            self.balance_history.push(current_balance);
        }
        if self.bet_size_history.is_empty() {
            self.bet_size_history.push(0);
        }

        let target = self.balance_history.len().max(self.bet_size_history.len());
        pad_with_last(&mut self.balance_history, target);
        pad_with_last(&mut self.bet_size_history, target);
    }
}

fn pad_with_last(history: &mut Vec<u64>, len: usize) {
    if let Some(&last) = history.last() {
        history.resize(len, last);
    }
}
