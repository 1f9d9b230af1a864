//! Record model
//!
//! A record is a single income or expense entry. The kind, not the sign of
//! the amount, decides how a record is aggregated.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::Amount;
use super::category::Category;
use super::ids::RecordId;

/// Longest accepted description, in characters
pub const DESCRIPTION_MAX_LENGTH: usize = 100;

/// Smallest accepted amount at entry time
pub const AMOUNT_MIN: f64 = 0.01;

/// Largest accepted amount at entry time
pub const AMOUNT_MAX: f64 = 1_000_000.0;

/// Whether a record is money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense,
}

impl RecordKind {
    /// Lowercase key used on interchange
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown record type '{}'. Use 'income' or 'expense'",
                other
            )),
        }
    }
}

/// A single income or expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, never changes after creation
    pub id: RecordId,

    /// Monetary value, positive when entered through the service
    pub amount: Amount,

    /// Free-text label
    pub description: String,

    /// Classification label
    pub category: Category,

    /// Calendar date of the entry
    pub date: NaiveDate,

    /// Income or expense
    pub kind: RecordKind,

    /// Optional receipt reference, carried but never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,

    /// When the record was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// When the record was last modified
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Create a new record with a fresh identifier
    pub fn new(
        kind: RecordKind,
        amount: Amount,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            amount,
            description: description.into(),
            category,
            date,
            kind,
            receipt: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shorthand for an income record
    pub fn income(
        amount: f64,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self::new(RecordKind::Income, Amount::new(amount), description, category, date)
    }

    /// Shorthand for an expense record
    pub fn expense(
        amount: f64,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self::new(RecordKind::Expense, Amount::new(amount), description, category, date)
    }

    /// Check if this is an income record
    pub fn is_income(&self) -> bool {
        self.kind == RecordKind::Income
    }

    /// Check if this is an expense record
    pub fn is_expense(&self) -> bool {
        self.kind == RecordKind::Expense
    }

    /// Validate the fields accepted at entry time
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(RecordValidationError::EmptyDescription);
        }

        let length = description.chars().count();
        if length > DESCRIPTION_MAX_LENGTH {
            return Err(RecordValidationError::DescriptionTooLong(length));
        }

        let value = self.amount.value();
        if !value.is_finite() || value <= 0.0 {
            return Err(RecordValidationError::AmountNotPositive(self.amount));
        }
        if value < AMOUNT_MIN {
            return Err(RecordValidationError::AmountTooLow(self.amount));
        }
        if value > AMOUNT_MAX {
            return Err(RecordValidationError::AmountTooHigh(self.amount));
        }

        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_expense() { "-" } else { "+" };
        write!(
            f,
            "{} {} [{}] {}{}",
            self.date.format("%Y-%m-%d"),
            self.description,
            self.category,
            sign,
            self.amount
        )
    }
}

/// Validation errors for records
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    AmountNotPositive(Amount),
    AmountTooLow(Amount),
    AmountTooHigh(Amount),
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description is required"),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Description must be at most {} characters (got {})",
                DESCRIPTION_MAX_LENGTH, len
            ),
            Self::AmountNotPositive(_) => write!(f, "Amount must be greater than 0"),
            Self::AmountTooLow(_) => {
                write!(f, "Amount must be at least {}", Amount::new(AMOUNT_MIN))
            }
            Self::AmountTooHigh(_) => {
                write!(f, "Amount cannot exceed {}", Amount::new(AMOUNT_MAX))
            }
        }
    }
}

impl std::error::Error for RecordValidationError {}
