//! Service layer for finboard
//!
//! The service layer sits on top of the session store: the record service
//! validates entries, the analytics and filter modules derive the dashboard
//! views, and the import service seeds a session from exported files.

pub mod analytics;
pub mod filter;
pub mod import;
pub mod record;

pub use analytics::{CategoryShare, Summary};
pub use filter::{apply_filters, CategoryFilter, DateRange, FilterCriteria, SortOrder};
pub use import::{ImportResult, ImportService};
pub use record::{RecordInput, RecordService, RecordUpdate};
