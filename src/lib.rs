pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;
pub mod store;

pub use config::Config;
pub use domain::{
    BetSpot, Decimal, Dice, LineSide, Outcome, Phase, PointNumber, RollEvent, SessionRecord,
    WagerKind,
};
pub use engine::{PhaseEngine, RebetEngine, SaveMode, SaveStatus, SessionMetricsTracker};
pub use error::EngineError;
pub use orchestration::{Placement, RejectReason, RollResolution, Table};
pub use store::{JsonFileSessionStore, MemorySessionStore, SessionStore, StoreError};
