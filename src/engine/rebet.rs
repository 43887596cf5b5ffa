use crate::domain::{LineSide, RollEvent};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rebet preferences supplied by the settings collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebetSettings {
    pub enabled: bool,
    /// Fallback amount used until a line wager has been placed.
    pub amount: u64,
}

/// Wager currently on each line control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineSnapshot {
    pub pass_line: u64,
    pub dont_pass: u64,
}

impl LineSnapshot {
    pub fn amount(&self, side: LineSide) -> u64 {
        match side {
            LineSide::Pass => self.pass_line,
            LineSide::DontPass => self.dont_pass,
        }
    }
}

/// A suggested line wager for the next hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebetProposal {
    pub side: LineSide,
    pub amount: u64,
}

/// Remembers the last line wager and proposes re-placing it after a hand.
#[derive(Debug, Clone, Default)]
pub struct RebetEngine {
    settings: RebetSettings,
    last_amount: u64,
    active_side: LineSide,
    pass_removed: bool,
    dont_pass_removed: bool,
}

impl RebetEngine {
    pub fn new(settings: RebetSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> RebetSettings {
        self.settings
    }

    pub fn update_settings(&mut self, settings: RebetSettings) {
        self.settings = settings;
    }

    /// The line control that was last wagered on.
    pub fn active_side(&self) -> LineSide {
        self.active_side
    }

    /// Amount a proposal would use: the last nonzero line wager, else the
    /// configured amount.
    pub fn tracked_amount(&self) -> u64 {
        if self.last_amount > 0 {
            self.last_amount
        } else {
            self.settings.amount
        }
    }

    /// A line wager was placed by the player (or by applying a proposal).
    pub fn record_placement(&mut self, side: LineSide, amount: u64) {
        if amount > 0 {
            self.last_amount = amount;
        }
        self.active_side = side;
        *self.removed_flag(side) = false;
    }

    /// The player deliberately took a line wager down.
    pub fn record_manual_removal(&mut self, side: LineSide) {
        *self.removed_flag(side) = true;
        debug!(side = ?side, "Rebet suppressed after manual removal");
    }

    pub fn is_suppressed(&self, side: LineSide) -> bool {
        match side {
            LineSide::Pass => self.pass_removed,
            LineSide::DontPass => self.dont_pass_removed,
        }
    }

    fn removed_flag(&mut self, side: LineSide) -> &mut bool {
        match side {
            LineSide::Pass => &mut self.pass_removed,
            LineSide::DontPass => &mut self.dont_pass_removed,
        }
    }

    /// Proposal after a roll; only hand-ending events qualify.
    pub fn propose(
        &self,
        event: RollEvent,
        lines: LineSnapshot,
        balance: u64,
    ) -> Option<RebetProposal> {
        if !event.resolves_hand() {
            return None;
        }
        self.propose_now(lines, balance)
    }

    /// Proposal outside of roll resolution, e.g. after collecting a stake.
    pub fn propose_now(&self, lines: LineSnapshot, balance: u64) -> Option<RebetProposal> {
        if !self.settings.enabled {
            return None;
        }
        let side = self.active_side;
        if lines.amount(side) > 0 || self.is_suppressed(side) {
            return None;
        }
        let amount = self.tracked_amount();
        if amount == 0 || amount > balance {
            return None;
        }
        Some(RebetProposal { side, amount })
    }
}
