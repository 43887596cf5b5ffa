use thiserror::Error;

/// Caller contract violations.
///
/// Dice totals, faces and target numbers are validated by callers; an
/// `EngineError` means that validation was skipped and the value is outside
/// the domain the phase and payout tables are defined over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Die value out of range (expected 1-6): {0}")]
    DieOutOfRange(u8),
    #[error("Dice total out of range (expected 2-12): {0}")]
    TotalOutOfRange(u8),
    #[error("Not a point number (expected 4, 5, 6, 8, 9 or 10): {0}")]
    InvalidPointNumber(u8),
    #[error("Not a hardway die face (expected 2-5): {0}")]
    InvalidHardwayNumber(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_display() {
        assert_eq!(
            EngineError::TotalOutOfRange(13).to_string(),
            "Dice total out of range (expected 2-12): 13"
        );
        assert_eq!(
            EngineError::DieOutOfRange(0).to_string(),
            "Die value out of range (expected 1-6): 0"
        );
    }
}
