//! In-memory session store for tests and embedding.

use super::{SessionStore, StoreError};
use crate::domain::SessionRecord;

/// Keeps records in a Vec and counts every write.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    records: Vec<SessionRecord>,
    write_count: usize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored records in save order, one per session id.
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Number of `save` calls that reached the store.
    pub fn write_count(&self) -> usize {
        self.write_count
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&mut self, record: &SessionRecord) -> Result<(), StoreError> {
        self.write_count += 1;
        self.records.retain(|r| r.id != record.id);
        self.records.push(record.clone());
        Ok(())
    }

    fn load_latest(&self) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self.records.last().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_save_replaces_same_session() {
        let mut store = MemorySessionStore::new();
        let mut record = SessionRecord::new(500, Utc::now());
        store.save(&record).unwrap();

        record.ending_balance = 450;
        store.save(&record).unwrap();

        assert_eq!(store.write_count(), 2);
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.load_latest().unwrap().unwrap().ending_balance, 450);
    }

    #[test]
    fn test_empty_store_loads_none() {
        let store = MemorySessionStore::new();
        assert!(store.load_latest().unwrap().is_none());
    }
}
