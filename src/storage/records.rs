//! In-memory record repository
//!
//! Holds the canonical record collection for the session. Order is
//! significant: index 0 is the most recently created record.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::FinboardError;
use crate::models::{Record, RecordId};

/// Repository for the session's records
#[derive(Debug, Default)]
pub struct RecordRepository {
    data: RwLock<Vec<Record>>,
}

impl RecordRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Record>>, FinboardError> {
        self.data
            .read()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Record>>, FinboardError> {
        self.data
            .write()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Get a record by ID
    pub fn get(&self, id: RecordId) -> Result<Option<Record>, FinboardError> {
        Ok(self.read()?.iter().find(|r| r.id == id).cloned())
    }

    /// Snapshot of all records in collection order
    pub fn get_all(&self) -> Result<Vec<Record>, FinboardError> {
        Ok(self.read()?.clone())
    }

    /// Find records whose id matches a full or short identifier
    pub fn find_matching(&self, token: &str) -> Result<Vec<Record>, FinboardError> {
        Ok(self
            .read()?
            .iter()
            .filter(|r| r.id.matches(token))
            .cloned()
            .collect())
    }

    /// Insert a record at the front of the collection
    pub fn insert_front(&self, record: Record) -> Result<(), FinboardError> {
        let mut data = self.write()?;
        if data.iter().any(|r| r.id == record.id) {
            return Err(FinboardError::Storage(format!(
                "Record {} already exists",
                record.id
            )));
        }
        data.insert(0, record);
        Ok(())
    }

    /// Replace a record in place, keeping its position
    ///
    /// Returns false if no record with that ID exists.
    pub fn replace(&self, record: Record) -> Result<bool, FinboardError> {
        let mut data = self.write()?;
        match data.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a record, returning it if it existed
    pub fn remove(&self, id: RecordId) -> Result<Option<Record>, FinboardError> {
        let mut data = self.write()?;
        Ok(data
            .iter()
            .position(|r| r.id == id)
            .map(|index| data.remove(index)))
    }

    /// Number of records
    pub fn count(&self) -> Result<usize, FinboardError> {
        Ok(self.read()?.len())
    }

    /// Drop every record
    pub fn clear(&self) -> Result<(), FinboardError> {
        self.write()?.clear();
        Ok(())
    }
}
