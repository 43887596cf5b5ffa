use crate::domain::{Decimal, SessionRecord, WagerKind};
use crate::store::{SessionStore, StoreError};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// A bet placement as seen by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetPlacement {
    pub kind: WagerKind,
    pub amount: u64,
    /// Balance at the moment of placement, inclusive of this bet.
    pub balance: u64,
}

/// A resolved roll as seen by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollSummary {
    pub seven_rolled: bool,
    pub point_made: bool,
    pub balance_after: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// Skip when this session has already been persisted.
    IfUnsaved,
    /// Always write; used for a definitive session end.
    Force,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Written,
    Skipped,
}

/// Aggregates bet and roll events into the in-progress `SessionRecord`.
///
/// Calls made while no session is in progress are ignored.
#[derive(Debug, Default)]
pub struct SessionMetricsTracker {
    record: Option<SessionRecord>,
    /// Outstanding wager total captured by `begin_roll`.
    outstanding_before_roll: u64,
    /// Start of the current foreground stretch; None while backgrounded.
    active_since: Option<DateTime<Utc>>,
    persisted: bool,
}

impl SessionMetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session. All counters reset here and nowhere else.
    pub fn start(&mut self, starting_balance: u64, now: DateTime<Utc>) {
        let record = SessionRecord::new(starting_balance, now);
        info!(session = %record.id, starting_balance, "Session started");
        self.record = Some(record);
        self.outstanding_before_roll = 0;
        self.active_since = Some(now);
        self.persisted = false;
    }

    /// Continue a stored session; its counters are kept.
    pub fn resume(&mut self, record: SessionRecord, now: DateTime<Utc>) {
        info!(session = %record.id, rolls = record.roll_count, "Session resumed");
        self.outstanding_before_roll = record.bet_size_history.last().copied().unwrap_or(0);
        self.record = Some(record);
        self.active_since = Some(now);
        self.persisted = false;
    }

    pub fn is_active(&self) -> bool {
        self.record.is_some()
    }

    pub fn record(&self) -> Option<&SessionRecord> {
        self.record.as_ref()
    }

    pub fn record_bet_placed(&mut self, placement: BetPlacement) {
        let Some(record) = self.record.as_mut() else {
            return;
        };
        let metrics = &mut record.metrics;

        let tally = metrics.bets_by_kind.entry(placement.kind).or_default();
        tally.count += 1;
        tally.total_amount = tally.total_amount.saturating_add(placement.amount);

        if placement.amount > metrics.largest_bet_amount {
            metrics.largest_bet_amount = placement.amount;
            metrics.largest_bet_percent = Decimal::percent_of(placement.amount, placement.balance);
        }

        if let Some(before_roll) = metrics.last_balance_before_roll {
            if placement.balance < before_roll {
                metrics.bets_after_loss_count += 1;
                debug!(
                    balance = placement.balance,
                    before_roll, "Bet placed below pre-roll balance"
                );
            }
        }
    }

    /// Sample the number of simultaneously active wagers.
    pub fn record_active_wagers(&mut self, count: usize) {
        if let Some(record) = self.record.as_mut() {
            let count = count as u64;
            if count > record.metrics.max_concurrent_bets {
                record.metrics.max_concurrent_bets = count;
            }
        }
    }

    /// Capture the state immediately before a roll is resolved.
    pub fn begin_roll(&mut self, balance: u64, outstanding: u64) {
        if let Some(record) = self.record.as_mut() {
            record.metrics.last_balance_before_roll = Some(balance);
            self.outstanding_before_roll = outstanding;
        }
    }

    /// Count a resolved roll and append one entry to each history.
    pub fn record_roll(&mut self, summary: RollSummary) {
        let Some(record) = self.record.as_mut() else {
            return;
        };
        record.roll_count += 1;
        if summary.seven_rolled {
            record.sevens_rolled += 1;
        }
        if summary.point_made {
            record.points_made += 1;
        }
        record.balance_history.push(summary.balance_after);
        record.bet_size_history.push(self.outstanding_before_roll);
        record.ending_balance = summary.balance_after;
    }

    /// Out-of-band balance increase. The next balance entry is marked so swing
    /// analytics can skip it.
    pub fn record_top_up(&mut self, amount: u64, balance_after: u64) {
        let Some(record) = self.record.as_mut() else {
            return;
        };
        record.metrics.atm_visits_count += 1;
        let index = record.balance_history.len();
        if record.atm_indices.last() != Some(&index) {
            record.atm_indices.push(index);
        }
        record.ending_balance = balance_after;
        info!(amount, balance_after, "Balance topped up");
    }

    /// Stop the active-time clock (app backgrounded).
    pub fn pause(&mut self, now: DateTime<Utc>) {
        self.accumulate(now);
        self.active_since = None;
    }

    /// Restart the active-time clock (app foregrounded).
    pub fn resume_clock(&mut self, now: DateTime<Utc>) {
        if self.record.is_some() && self.active_since.is_none() {
            self.active_since = Some(now);
        }
    }

    fn accumulate(&mut self, now: DateTime<Utc>) {
        if let (Some(record), Some(since)) = (self.record.as_mut(), self.active_since) {
            let elapsed = (now - since).num_seconds().max(0);
            record.active_duration_secs += elapsed;
            self.active_since = Some(now);
        }
    }

    /// Bring the record to a consistent, storable state.
    ///
    /// Safe to call repeatedly: histories are reconciled, not appended to, and
    /// active time is only added for the stretch since the previous call.
    pub fn finalize(&mut self, balance: u64, now: DateTime<Utc>) -> Option<&SessionRecord> {
        if self.record.is_none() {
            debug!("Finalize with no session in progress");
            return None;
        }
        if self.active_since.is_some() {
            self.accumulate(now);
        }
        let record = self.record.as_mut()?;
        record.reconcile_histories(balance);
        record.ending_balance = balance;
        record.ended_at = Some(now);
        Some(&*record)
    }

    /// Persist the record.
    ///
    /// `SaveMode::IfUnsaved` is skipped once this session has been written;
    /// `SaveMode::Force` always writes. Saving with no session is a skip.
    pub fn save(
        &mut self,
        store: &mut dyn SessionStore,
        mode: SaveMode,
    ) -> Result<SaveStatus, StoreError> {
        let Some(record) = self.record.as_ref() else {
            return Ok(SaveStatus::Skipped);
        };
        if mode == SaveMode::IfUnsaved && self.persisted {
            debug!(session = %record.id, "Session already persisted, skipping save");
            return Ok(SaveStatus::Skipped);
        }

        store.save(record)?;
        self.persisted = true;
        info!(session = %record.id, mode = ?mode, rolls = record.roll_count, "Session saved");
        Ok(SaveStatus::Written)
    }

    /// Largest absolute change between consecutive balance entries, skipping
    /// entries that include a top-up.
    pub fn biggest_swing(&self) -> Option<u64> {
        let record = self.record.as_ref()?;
        biggest_swing(&record.balance_history, &record.atm_indices)
    }
}

/// Largest absolute change between consecutive `history` entries whose later
/// index is not in `excluded`.
pub fn biggest_swing(history: &[u64], excluded: &[usize]) -> Option<u64> {
    history
        .windows(2)
        .enumerate()
        .filter(|(i, _)| !excluded.contains(&(i + 1)))
        .map(|(_, pair)| pair[0].abs_diff(pair[1]))
        .max()
}
