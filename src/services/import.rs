//! Import service
//!
//! Reads records back from the CSV, JSON and YAML export formats. Every row
//! goes through the record service, so entry validation applies; rows that
//! fail are collected in the result instead of aborting the import.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

use csv::{Reader, StringRecord};
use tracing::{info, warn};

use crate::error::{FinboardError, FinboardResult};
use crate::export::{self, ExportFormat};
use crate::models::{Record, RecordId, RecordKind};
use crate::services::record::{RecordInput, RecordService};
use crate::storage::Session;

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of records imported
    pub imported: usize,
    /// Number of rows rejected
    pub errors: usize,
    /// IDs of imported records, in file order
    pub imported_ids: Vec<RecordId>,
    /// Error messages by row (1-based, excluding the header)
    pub error_messages: BTreeMap<usize, String>,
}

impl ImportResult {
    fn reject(&mut self, row: usize, message: String) {
        warn!(row, error = %message, "Rejected import row");
        self.errors += 1;
        self.error_messages.insert(row, message);
    }
}

/// Column positions resolved from the CSV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    date: usize,
    description: usize,
    category: usize,
    kind: usize,
    amount: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> FinboardResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| FinboardError::Import(format!("Missing '{}' column", name)))
        };

        Ok(Self {
            date: find("Date")?,
            description: find("Description")?,
            category: find("Category")?,
            kind: find("Type")?,
            amount: find("Amount")?,
        })
    }

    fn parse(&self, row: &StringRecord) -> Result<RecordInput, String> {
        let field = move |idx: usize| row.get(idx).unwrap_or("").trim();
        let kind: RecordKind = field(self.kind).parse()?;
        Ok(RecordInput::new(
            kind,
            field(self.amount),
            field(self.description),
            field(self.category),
            field(self.date),
        ))
    }
}

/// Service for importing records into a session
pub struct ImportService<'a> {
    session: &'a Session,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Import a file, choosing the format from its extension (CSV by default)
    pub fn import_file(&self, path: &Path) -> FinboardResult<ImportResult> {
        let format = ExportFormat::from_path(path).unwrap_or_default();
        let content = fs::read_to_string(path).map_err(|e| {
            FinboardError::Import(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let result = match format {
            ExportFormat::Csv => self.import_csv(content.as_bytes())?,
            ExportFormat::Json => self.import_records(export::import_from_json(&content)?.records)?,
            ExportFormat::Yaml => self.import_records(export::import_from_yaml(&content)?.records)?,
        };

        info!(
            path = %path.display(),
            format = %format,
            imported = result.imported,
            errors = result.errors,
            "Imported records"
        );

        Ok(result)
    }

    /// Import CSV rows with a `Date,Description,Category,Type,Amount` header
    ///
    /// After the import the rows sit at the front of the collection in file
    /// order.
    pub fn import_csv<R: Read>(&self, input: R) -> FinboardResult<ImportResult> {
        let mut reader = Reader::from_reader(input);
        let columns = Columns::from_headers(reader.headers()?)?;

        let mut result = ImportResult::default();
        let mut inputs = Vec::new();

        for (idx, row) in reader.records().enumerate() {
            let row_number = idx + 1;
            match row {
                Ok(row) => match columns.parse(&row) {
                    Ok(input) => inputs.push((row_number, input)),
                    Err(e) => result.reject(row_number, e),
                },
                Err(e) => result.reject(row_number, format!("Error reading CSV record: {}", e)),
            }
        }

        let service = RecordService::new(self.session);
        for (row_number, input) in inputs.into_iter().rev() {
            match service.create(input) {
                Ok(record) => {
                    result.imported += 1;
                    result.imported_ids.push(record.id);
                }
                Err(e) if e.is_validation() => result.reject(row_number, e.to_string()),
                Err(e) => return Err(e),
            }
        }
        result.imported_ids.reverse();

        Ok(result)
    }

    /// Import complete records, keeping their identifiers
    pub fn import_records(&self, records: Vec<Record>) -> FinboardResult<ImportResult> {
        let service = RecordService::new(self.session);
        let mut result = ImportResult::default();

        for (idx, record) in records.into_iter().enumerate().rev() {
            let row_number = idx + 1;
            match service.restore(record) {
                Ok(record) => {
                    result.imported += 1;
                    result.imported_ids.push(record.id);
                }
                Err(e) if e.is_validation() => result.reject(row_number, e.to_string()),
                Err(e) => return Err(e),
            }
        }
        result.imported_ids.reverse();

        Ok(result)
    }
}
