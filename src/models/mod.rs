//! Core data models for finboard
//!
//! Records, their identifiers, amounts and the fixed category set.

pub mod amount;
pub mod category;
pub mod ids;
pub mod record;

pub use amount::{Amount, AmountParseError};
pub use category::{Category, UnknownCategory};
pub use ids::RecordId;
pub use record::{Record, RecordKind, RecordValidationError};
