//! Record display formatting
//!
//! Register table and detail view for records.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use super::{format_date, signed_amount, truncate};
use crate::config::Settings;
use crate::models::Record;

const DESCRIPTION_WIDTH: usize = 32;

/// One register row
#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl RecordRow {
    fn new(record: &Record, settings: &Settings) -> Self {
        Self {
            id: record.id.short(),
            date: format_date(record.date, &settings.date_format),
            description: truncate(&record.description, DESCRIPTION_WIDTH),
            category: record.category.to_string(),
            kind: record.kind.to_string(),
            amount: signed_amount(record, &settings.currency_symbol),
        }
    }
}

/// Format records as a register table
pub fn format_record_register(records: &[Record], settings: &Settings) -> String {
    if records.is_empty() {
        return "No records found.\n".to_string();
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .map(|r| RecordRow::new(r, settings))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::sharp())
        .modify(Columns::single(5), Alignment::right());

    format!("{}\n", table)
}

/// Format record details for display
pub fn format_record_details(record: &Record, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Record:      {}\n", record.id.short()));
    output.push_str(&format!("ID:          {}\n", record.id.as_uuid()));
    output.push_str(&format!(
        "Date:        {}\n",
        format_date(record.date, &settings.date_format)
    ));
    output.push_str(&format!("Description: {}\n", record.description));
    output.push_str(&format!("Category:    {}\n", record.category));
    output.push_str(&format!("Type:        {}\n", record.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        signed_amount(record, &settings.currency_symbol)
    ));

    if let Some(receipt) = &record.receipt {
        output.push_str(&format!("Receipt:     {}\n", receipt));
    }

    output.push_str(&format!(
        "Created:     {}\n",
        record.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    if record.updated_at != record.created_at {
        output.push_str(&format!(
            "Updated:     {}\n",
            record.updated_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output
}

/// Format a one-line confirmation, e.g. after adding a record
pub fn format_record_short(record: &Record, settings: &Settings) -> String {
    format!(
        "{} {} {} [{}] {}",
        record.id.short(),
        format_date(record.date, &settings.date_format),
        record.description,
        record.category,
        signed_amount(record, &settings.currency_symbol)
    )
}
