use crate::domain::{Phase, PointNumber, RollEvent};
use crate::error::EngineError;
use tracing::debug;

/// Come-out / point state machine.
///
/// The only place a `Phase` changes. Each call to `process_roll` emits exactly
/// one `RollEvent` and depends only on the current phase and the total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseEngine {
    phase: Phase,
}

impl PhaseEngine {
    pub fn new() -> Self {
        Self {
            phase: Phase::ComeOut,
        }
    }

    /// Restore a phase, e.g. when resuming a table.
    pub fn with_phase(phase: Phase) -> Self {
        Self { phase }
    }

    /// Process a dice total (2..=12) and return the resulting event.
    ///
    /// # Errors
    /// Returns `EngineError::TotalOutOfRange` for totals outside 2..=12; the
    /// phase is left untouched in that case.
    pub fn process_roll(&mut self, total: u8) -> Result<RollEvent, EngineError> {
        if !(2..=12).contains(&total) {
            return Err(EngineError::TotalOutOfRange(total));
        }

        let event = match self.phase {
            Phase::ComeOut => match total {
                7 | 11 => RollEvent::PassLineWin,
                2 | 3 | 12 => RollEvent::PassLineLoss,
                _ => {
                    let point = PointNumber::new(total)?;
                    self.phase = Phase::Point(point);
                    RollEvent::PointEstablished(point)
                }
            },
            Phase::Point(point) => {
                if total == point.value() {
                    self.phase = Phase::ComeOut;
                    RollEvent::PointMade
                } else if total == 7 {
                    self.phase = Phase::ComeOut;
                    RollEvent::SevenOut
                } else {
                    RollEvent::NoAction
                }
            }
        };

        debug!(total, event = %event, phase = ?self.phase, "Processed roll");
        Ok(event)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_point(&self) -> Option<PointNumber> {
        self.phase.point()
    }

    pub fn is_point_phase(&self) -> bool {
        self.phase.is_point()
    }
}
