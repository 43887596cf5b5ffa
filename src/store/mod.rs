//! Persistence seam for session records.
//!
//! The engine only produces and consumes `SessionRecord` values; where they
//! live is up to the implementation.

use crate::domain::SessionRecord;
use std::fmt;
use thiserror::Error;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSessionStore;
pub use memory::MemorySessionStore;

/// Storage collaborator for finished or in-progress sessions.
pub trait SessionStore: fmt::Debug {
    /// Write a record, replacing any earlier write of the same session id.
    fn save(&mut self, record: &SessionRecord) -> Result<(), StoreError>;

    /// The most recently saved record, if any, for resuming.
    fn load_latest(&self) -> Result<Option<SessionRecord>, StoreError>;
}

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
