//! Session storage for finboard
//!
//! Everything lives in memory for the lifetime of one session. A `Session` is
//! owned by the caller and passed explicitly to the services; there is no
//! global state.

pub mod records;

pub use records::RecordRepository;

use chrono::NaiveDate;

use crate::error::FinboardError;
use crate::models::{Category, Record};

/// Owner of the session's record collection
#[derive(Debug, Default)]
pub struct Session {
    pub records: RecordRepository,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session seeded with the two sample records
    pub fn with_sample_data() -> Result<Self, FinboardError> {
        let session = Self::new();
        // Prepend order: the salary ends up first, as in the sample listing.
        for record in sample_records().into_iter().rev() {
            session.records.insert_front(record)?;
        }
        Ok(session)
    }

    /// Whether the session holds no records
    pub fn is_empty(&self) -> Result<bool, FinboardError> {
        Ok(self.records.count()? == 0)
    }
}

/// The sample records shown on a fresh dashboard
pub fn sample_records() -> Vec<Record> {
    let mut records = Vec::with_capacity(2);
    if let Some(date) = NaiveDate::from_ymd_opt(2024, 9, 15) {
        records.push(Record::income(1250.0, "Salary", Category::Income, date));
    }
    if let Some(date) = NaiveDate::from_ymd_opt(2024, 9, 14) {
        records.push(Record::expense(45.67, "Groceries", Category::Food, date));
    }
    records
}
