//! finboard - terminal personal-finance dashboard
//!
//! Tracks income and expense records for one session and derives the
//! dashboard views from them: aggregate totals, per-category spending, and a
//! searchable, filterable, sortable record list.
//!
//! # Architecture
//!
//! - `config`: configuration and path management
//! - `error`: custom error types
//! - `models`: records, amounts, categories and identifiers
//! - `storage`: the in-memory session store
//! - `services`: entry validation, analytics, filtering and import
//! - `export`: CSV, JSON and YAML writers
//! - `display`: terminal formatting
//! - `cli`: command handlers and the interactive shell
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use finboard::services::{apply_filters, FilterCriteria, Summary};
//! use finboard::storage::Session;
//!
//! let session = Session::with_sample_data()?;
//! let records = session.records.get_all()?;
//! let summary = Summary::compute(&records);
//! let visible = apply_filters(&records, &FilterCriteria::new().search("groc"), now);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinboardError, FinboardResult};
