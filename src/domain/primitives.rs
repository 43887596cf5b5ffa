//! Domain primitives: Dice, PointNumber.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// A resolved roll of two six-sided dice.
///
/// Values come from an external randomness source; construction only checks
/// that each face is in 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dice {
    die1: u8,
    die2: u8,
}

impl Dice {
    /// Create a Dice pair from two face values.
    ///
    /// # Errors
    /// Returns `EngineError::DieOutOfRange` if either face is outside 1..=6.
    pub fn new(die1: u8, die2: u8) -> Result<Self, EngineError> {
        for face in [die1, die2] {
            if !(1..=6).contains(&face) {
                return Err(EngineError::DieOutOfRange(face));
            }
        }
        Ok(Dice { die1, die2 })
    }

    pub fn die1(&self) -> u8 {
        self.die1
    }

    pub fn die2(&self) -> u8 {
        self.die2
    }

    /// Sum of both faces (2..=12).
    pub fn total(&self) -> u8 {
        self.die1 + self.die2
    }

    /// True when both faces show the same value.
    pub fn is_pair(&self) -> bool {
        self.die1 == self.die2
    }

    /// The faces ordered low-high, so (2,1) and (1,2) compare equal.
    pub fn sorted(&self) -> (u8, u8) {
        if self.die1 <= self.die2 {
            (self.die1, self.die2)
        } else {
            (self.die2, self.die1)
        }
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.die1, self.die2)
    }
}

/// A point number: one of 4, 5, 6, 8, 9, 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PointNumber(u8);

impl PointNumber {
    pub const ALL: [PointNumber; 6] = [
        PointNumber(4),
        PointNumber(5),
        PointNumber(6),
        PointNumber(8),
        PointNumber(9),
        PointNumber(10),
    ];

    /// Create a PointNumber from a dice total.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidPointNumber` for anything but 4/5/6/8/9/10.
    pub fn new(value: u8) -> Result<Self, EngineError> {
        match value {
            4 | 5 | 6 | 8 | 9 | 10 => Ok(PointNumber(value)),
            other => Err(EngineError::InvalidPointNumber(other)),
        }
    }

    /// Get the underlying total.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PointNumber {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PointNumber::new(value)
    }
}

impl From<PointNumber> for u8 {
    fn from(value: PointNumber) -> Self {
        value.0
    }
}

impl std::fmt::Display for PointNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
