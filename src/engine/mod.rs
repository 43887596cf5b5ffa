//! Pure rules and bookkeeping for one craps table.
//!
//! - `phase`: come-out / point state machine
//! - `payout`: per-wager outcome calculators
//! - `metrics`: session counters, histories and persistence gating
//! - `rebet`: automatic line re-wager proposals

pub mod metrics;
pub mod payout;
pub mod phase;
pub mod rebet;

pub use metrics::{BetPlacement, RollSummary, SaveMode, SaveStatus, SessionMetricsTracker};
pub use payout::{MakeEmProgress, PlacePaytable};
pub use phase::PhaseEngine;
pub use rebet::{LineSnapshot, RebetEngine, RebetProposal, RebetSettings};
