pub mod table;

pub use table::{Placement, RejectReason, RollResolution, SettledOutcome, Table};
