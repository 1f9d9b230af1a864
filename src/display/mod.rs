//! Display formatting for terminal output
//!
//! Turns records and summaries into text for the terminal. Nothing here
//! touches the session; callers pass in what to show.

pub mod record;
pub mod summary;

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{Category, Record};

pub use record::{format_record_details, format_record_register, format_record_short};
pub use summary::{format_category_breakdown, format_metric_cards, format_summary};

/// Format a date with a user-supplied strftime pattern
///
/// Falls back to ISO format when the pattern is invalid.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Amount with a `+` for income and a `-` for expenses
pub fn signed_amount(record: &Record, symbol: &str) -> String {
    let sign = if record.is_income() { "+" } else { "-" };
    format!("{}{}", sign, record.amount.abs().format_with_symbol(symbol))
}

/// Format the fixed category list
pub fn format_category_list() -> String {
    let mut output = String::from("Categories:\n");
    for category in Category::ALL {
        output.push_str(&format!("  {}\n", category));
    }
    output
}

/// Shorten a string to `max_chars` characters, marking the cut with `...`
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
