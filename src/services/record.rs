//! Record service
//!
//! Entry boundary for the record collection: validates input, assigns
//! identifiers, and keeps the collection ordered newest-first.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::error::{FinboardError, FinboardResult};
use crate::models::{Amount, Category, Record, RecordId, RecordKind};
use crate::storage::Session;

/// Service for record management
pub struct RecordService<'a> {
    session: &'a Session,
}

/// Raw field values for a new record, as typed by the user
#[derive(Debug, Clone)]
pub struct RecordInput {
    pub kind: RecordKind,
    pub amount: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub receipt: Option<String>,
}

impl RecordInput {
    /// Input with no receipt
    pub fn new(
        kind: RecordKind,
        amount: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            amount: amount.into(),
            description: description.into(),
            category: category.into(),
            date: date.into(),
            receipt: None,
        }
    }
}

/// Field changes for an existing record; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct RecordUpdate {
    pub kind: Option<RecordKind>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub receipt: Option<Option<String>>,
}

impl RecordUpdate {
    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.amount.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.date.is_none()
            && self.receipt.is_none()
    }
}

impl<'a> RecordService<'a> {
    /// Create a new record service
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Validate `input` and insert the new record at the front of the collection
    pub fn create(&self, input: RecordInput) -> FinboardResult<Record> {
        let amount = parse_amount(&input.amount)?;
        let category = parse_category(&input.category)?;
        let date = parse_date(&input.date)?;

        let mut record = Record::new(
            input.kind,
            amount,
            input.description.trim(),
            category,
            date,
        );
        record.receipt = normalize_receipt(input.receipt);

        record
            .validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;

        self.session.records.insert_front(record.clone())?;

        info!(
            id = %record.id,
            kind = %record.kind,
            amount = %record.amount,
            category = %record.category,
            "Created record"
        );

        Ok(record)
    }

    /// Insert an existing record at the front, keeping its identifier
    ///
    /// The record is validated like fresh input.
    pub fn restore(&self, record: Record) -> FinboardResult<Record> {
        record
            .validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;

        self.session.records.insert_front(record.clone())?;

        info!(id = %record.id, "Restored record");

        Ok(record)
    }

    /// Apply `update` to the record with `id`, keeping its id and position
    pub fn update(&self, id: RecordId, update: RecordUpdate) -> FinboardResult<Record> {
        let mut record = self
            .session
            .records
            .get(id)?
            .ok_or_else(|| FinboardError::record_not_found(id.to_string()))?;

        if let Some(kind) = update.kind {
            record.kind = kind;
        }
        if let Some(amount) = update.amount {
            record.amount = parse_amount(&amount)?;
        }
        if let Some(description) = update.description {
            record.description = description.trim().to_string();
        }
        if let Some(category) = update.category {
            record.category = parse_category(&category)?;
        }
        if let Some(date) = update.date {
            record.date = parse_date(&date)?;
        }
        if let Some(receipt) = update.receipt {
            record.receipt = normalize_receipt(receipt);
        }

        record
            .validate()
            .map_err(|e| FinboardError::Validation(e.to_string()))?;

        record.updated_at = Utc::now();

        if !self.session.records.replace(record.clone())? {
            return Err(FinboardError::record_not_found(id.to_string()));
        }

        info!(id = %record.id, "Updated record");

        Ok(record)
    }

    /// Remove the record with `id`
    ///
    /// Deleting an unknown id leaves the collection unchanged and reports
    /// `NotFound`.
    pub fn delete(&self, id: RecordId) -> FinboardResult<Record> {
        match self.session.records.remove(id)? {
            Some(record) => {
                info!(id = %record.id, "Deleted record");
                Ok(record)
            }
            None => {
                warn!(id = %id, "Delete requested for unknown record");
                Err(FinboardError::record_not_found(id.to_string()))
            }
        }
    }

    /// Get a record by ID
    pub fn get(&self, id: RecordId) -> FinboardResult<Option<Record>> {
        self.session.records.get(id)
    }

    /// Resolve a full or short identifier to exactly one record
    pub fn find(&self, token: &str) -> FinboardResult<Record> {
        let token = token.trim();
        let mut matches = self.session.records.find_matching(token)?;
        match matches.len() {
            0 => Err(FinboardError::record_not_found(token)),
            1 => Ok(matches.remove(0)),
            n => Err(FinboardError::Validation(format!(
                "Identifier '{}' is ambiguous ({} records match); use more characters",
                token, n
            ))),
        }
    }

    /// All records, newest first
    pub fn list(&self) -> FinboardResult<Vec<Record>> {
        self.session.records.get_all()
    }

    /// Number of records
    pub fn count(&self) -> FinboardResult<usize> {
        self.session.records.count()
    }

    /// Remove every record
    pub fn clear(&self) -> FinboardResult<usize> {
        let count = self.session.records.count()?;
        self.session.records.clear()?;
        info!(count, "Cleared records");
        Ok(count)
    }
}

fn parse_amount(raw: &str) -> FinboardResult<Amount> {
    Amount::parse(raw).map_err(|e| FinboardError::Validation(e.to_string()))
}

fn parse_category(raw: &str) -> FinboardResult<Category> {
    raw.parse::<Category>()
        .map_err(|e| FinboardError::Validation(e.to_string()))
}

/// Parse a calendar date; the interchange form is `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> FinboardResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FinboardError::Validation("Date is required".into()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        FinboardError::Validation(format!(
            "Invalid date '{}'. Use the YYYY-MM-DD format",
            raw
        ))
    })
}

fn normalize_receipt(receipt: Option<String>) -> Option<String> {
    receipt
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}
