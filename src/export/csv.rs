//! CSV Export functionality
//!
//! Writes the whole record collection, unfiltered, one row per record.

use std::io::Write;

use tracing::info;

use crate::error::{FinboardError, FinboardResult};
use crate::models::Record;

/// Column header of the record export
pub const CSV_HEADER: [&str; 5] = ["Date", "Description", "Category", "Type", "Amount"];

/// Export records to CSV in collection order
///
/// Dates are `YYYY-MM-DD`, the type is `income` or `expense`, and the amount
/// is the plain number without currency formatting.
pub fn export_records_csv<W: Write>(records: &[Record], writer: W) -> FinboardResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;

    for record in records {
        let date = record.date.format("%Y-%m-%d").to_string();
        let amount = record.amount.value().to_string();
        csv_writer.write_record([
            date.as_str(),
            record.description.as_str(),
            record.category.label(),
            record.kind.as_str(),
            amount.as_str(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| FinboardError::Export(e.to_string()))?;

    info!(count = records.len(), "Exported records to CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sample_records;
    use crate::models::Category;
    use chrono::NaiveDate;

    fn export(records: &[Record]) -> String {
        let mut buffer = Vec::new();
        export_records_csv(records, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_export_sample() {
        let output = export(&sample_records());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date,Description,Category,Type,Amount");
        assert_eq!(lines[1], "2024-09-15,Salary,Income,income,1250");
        assert_eq!(lines[2], "2024-09-14,Groceries,Food,expense,45.67");
    }

    #[test]
    fn test_export_empty_has_header() {
        let output = export(&[]);
        assert_eq!(output.trim_end(), "Date,Description,Category,Type,Amount");
    }

    #[test]
    fn test_export_quotes_commas() {
        let record = Record::expense(
            12.5,
            "Coffee, bagel",
            Category::PersonalCare,
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
        );
        let output = export(&[record]);
        assert!(output.contains("2025-02-03,\"Coffee, bagel\",Personal Care,expense,12.5"));
    }
}
