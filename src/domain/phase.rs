//! Round phase and roll events.

use crate::domain::PointNumber;
use serde::{Deserialize, Serialize};

/// Current round phase. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "phase", content = "point", rename_all = "camelCase")]
pub enum Phase {
    /// No point established; the next roll is a come-out roll.
    #[default]
    ComeOut,
    /// A point is established.
    Point(PointNumber),
}

impl Phase {
    pub fn point(&self) -> Option<PointNumber> {
        match self {
            Phase::ComeOut => None,
            Phase::Point(n) => Some(*n),
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Phase::Point(_))
    }
}

/// The single event produced by processing one roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", content = "point", rename_all = "camelCase")]
pub enum RollEvent {
    /// Come-out 7 or 11.
    PassLineWin,
    /// Come-out 2, 3 or 12.
    PassLineLoss,
    /// Come-out 4/5/6/8/9/10.
    PointEstablished(PointNumber),
    /// Point repeated before a 7.
    PointMade,
    /// 7 rolled while a point was established.
    SevenOut,
    /// Point phase roll that is neither the point nor 7.
    NoAction,
}

impl RollEvent {
    /// True for the events that end a hand (line wagers are decided).
    pub fn resolves_hand(&self) -> bool {
        matches!(
            self,
            RollEvent::PassLineWin
                | RollEvent::PassLineLoss
                | RollEvent::PointMade
                | RollEvent::SevenOut
        )
    }
}

impl std::fmt::Display for RollEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RollEvent::PassLineWin => write!(f, "pass line win"),
            RollEvent::PassLineLoss => write!(f, "craps"),
            RollEvent::PointEstablished(n) => write!(f, "point is {}", n),
            RollEvent::PointMade => write!(f, "point made"),
            RollEvent::SevenOut => write!(f, "seven out"),
            RollEvent::NoAction => write!(f, "no action"),
        }
    }
}
