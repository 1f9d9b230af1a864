//! JSON Export functionality
//!
//! Exports the session's records, together with their summary, as a
//! versioned JSON document that can be read back with `import_from_json`.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FinboardError, FinboardResult};
use crate::models::Record;
use crate::services::Summary;
use crate::storage::Session;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full session export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All records in collection order
    pub records: Vec<Record>,

    /// Summary at export time, informational only
    pub summary: Summary,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub record_count: usize,
    pub income_count: usize,
    pub expense_count: usize,

    /// Earliest record date
    pub earliest_record: Option<String>,

    /// Latest record date
    pub latest_record: Option<String>,
}

impl FullExport {
    /// Build an export from a record collection
    pub fn from_records(records: Vec<Record>) -> Self {
        let summary = Summary::compute(&records);
        let income_count = records.iter().filter(|r| r.is_income()).count();

        let metadata = ExportMetadata {
            record_count: records.len(),
            income_count,
            expense_count: records.len() - income_count,
            earliest_record: records.iter().map(|r| r.date).min().map(|d| d.to_string()),
            latest_record: records.iter().map(|r| r.date).max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            records,
            summary,
            metadata,
        }
    }

    /// Build an export from the session
    pub fn from_session(session: &Session) -> FinboardResult<Self> {
        Ok(Self::from_records(session.records.get_all()?))
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut seen = HashSet::new();
        for record in &self.records {
            if !seen.insert(record.id) {
                return Err(format!("Duplicate record id {}", record.id));
            }
        }

        Ok(())
    }
}

/// Export the session to JSON
pub fn export_full_json<W: Write>(
    session: &Session,
    writer: &mut W,
    pretty: bool,
) -> FinboardResult<()> {
    let export = FullExport::from_session(session)?;

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)?;
    } else {
        serde_json::to_writer(&mut *writer, &export)?;
    }
    writeln!(writer).map_err(|e| FinboardError::Export(e.to_string()))?;

    info!(count = export.records.len(), "Exported records to JSON");
    Ok(())
}

/// Read a JSON export back
pub fn import_from_json(json_str: &str) -> FinboardResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)?;

    export.validate().map_err(FinboardError::Import)?;

    Ok(export)
}
