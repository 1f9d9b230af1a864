//! Filter and sort engine
//!
//! Produces the display subset of a record collection from a set of criteria.
//! The reference time is passed in rather than read from the clock, so the
//! same `(records, criteria, now)` always yields the same output.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::models::Record;

/// Category selection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Keep every category
    #[default]
    All,
    /// Keep records whose category label equals this string exactly
    Named(String),
}

impl CategoryFilter {
    /// Parse a selection; `"all"` (any case) or an empty string selects everything
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(s.to_string())
        }
    }

    fn keeps(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Named(label) => record.category.label() == label,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Named(label) => f.write_str(label),
        }
    }
}

/// Date window relative to the reference time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    All,
    /// Same calendar day as now
    Today,
    /// On or after now minus seven days; no upper bound
    Week,
    /// Same year and month as now
    Month,
    /// On or after the first day of the current quarter; no upper bound
    Quarter,
    /// Same calendar year as now
    Year,
}

impl DateRange {
    /// Interchange key
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Parse a key; unknown keys fall back to `All`
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    fn keeps(&self, date: NaiveDate, now: NaiveDateTime) -> bool {
        let today = now.date();
        match self {
            Self::All => true,
            Self::Today => date == today,
            Self::Week => start_of_day(date) >= now - Duration::days(7),
            Self::Month => date.year() == today.year() && date.month() == today.month(),
            Self::Quarter => match quarter_start(today) {
                Some(start) => date >= start,
                None => true,
            },
            Self::Year => date.year() == today.year(),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(format!("Unknown date range '{}'", other)),
        }
    }
}

/// Display ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recent first
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
    /// Case-insensitive by description
    DescriptionAsc,
    /// By category label
    CategoryAsc,
    /// Keep input order
    Unsorted,
}

impl SortOrder {
    /// Interchange key
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::DateAsc => "date-asc",
            Self::AmountDesc => "amount-desc",
            Self::AmountAsc => "amount-asc",
            Self::DescriptionAsc => "description-asc",
            Self::CategoryAsc => "category-asc",
            Self::Unsorted => "none",
        }
    }

    /// Parse a key; unknown keys keep the input order
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Unsorted)
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            Self::DateDesc => b.date.cmp(&a.date),
            Self::DateAsc => a.date.cmp(&b.date),
            Self::AmountDesc => b.amount.total_cmp(&a.amount),
            Self::AmountAsc => a.amount.total_cmp(&b.amount),
            Self::DescriptionAsc => a
                .description
                .to_lowercase()
                .cmp(&b.description.to_lowercase()),
            Self::CategoryAsc => a.category.label().cmp(b.category.label()),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date-desc" => Ok(Self::DateDesc),
            "date-asc" => Ok(Self::DateAsc),
            "amount-desc" => Ok(Self::AmountDesc),
            "amount-asc" => Ok(Self::AmountAsc),
            "description-asc" => Ok(Self::DescriptionAsc),
            "category-asc" => Ok(Self::CategoryAsc),
            "none" => Ok(Self::Unsorted),
            other => Err(format!("Unknown sort order '{}'", other)),
        }
    }
}

/// The active search, filter and sort selections
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    pub search: String,
    pub category: CategoryFilter,
    pub date_range: DateRange,
    pub sort: SortOrder,
}

impl FilterCriteria {
    /// Criteria that keep everything, most recent first
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Set the category selection
    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Set the date range
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Set the sort order
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Whether no filter narrows the collection
    pub fn is_default(&self) -> bool {
        self.search.is_empty()
            && self.category == CategoryFilter::All
            && self.date_range == DateRange::All
    }

    fn matches_search(&self, record: &Record) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.description.to_lowercase().contains(&needle)
            || record.category.label().to_lowercase().contains(&needle)
    }

    /// Whether `record` passes every filter
    pub fn keeps(&self, record: &Record, now: NaiveDateTime) -> bool {
        self.matches_search(record)
            && self.category.keeps(record)
            && self.date_range.keeps(record.date, now)
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "search='{}' category={} range={} sort={}",
            self.search, self.category, self.date_range, self.sort
        )
    }
}

/// Filter `records` by `criteria` relative to `now`, then sort
///
/// The sort is stable: records that compare equal keep their input order.
pub fn apply_filters(
    records: &[Record],
    criteria: &FilterCriteria,
    now: NaiveDateTime,
) -> Vec<Record> {
    let mut filtered: Vec<Record> = records
        .iter()
        .filter(|r| criteria.keeps(r, now))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| criteria.sort.compare(a, b));

    debug!(
        input = records.len(),
        output = filtered.len(),
        criteria = %criteria,
        "Applied filters"
    );

    filtered
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}

/// First day of the calendar quarter containing `date`
fn quarter_start(date: NaiveDate) -> Option<NaiveDate> {
    let month0 = date.month0();
    NaiveDate::from_ymd_opt(date.year(), (month0 / 3) * 3 + 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, Category};
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_time(NaiveTime::from_hms_opt(h, min, 0).unwrap())
    }

    fn sample() -> Vec<Record> {
        vec![
            Record::income(1250.0, "Salary", Category::Income, date(2024, 9, 15)),
            Record::expense(45.67, "Groceries", Category::Food, date(2024, 9, 14)),
        ]
    }

    fn descriptions(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.description.as_str()).collect()
    }

    #[test]
    fn test_search_matches_description() {
        let criteria = FilterCriteria::new().search("groc");
        let out = apply_filters(&sample(), &criteria, at(2024, 9, 20, 12, 0));
        assert_eq!(descriptions(&out), vec!["Groceries"]);
    }

    #[test]
    fn test_search_matches_category_case_insensitively() {
        let criteria = FilterCriteria::new().search("FOO");
        let out = apply_filters(&sample(), &criteria, at(2024, 9, 20, 12, 0));
        assert_eq!(descriptions(&out), vec!["Groceries"]);
    }

    #[test]
    fn test_category_filter() {
        let criteria = FilterCriteria::new().category(CategoryFilter::parse("Income"));
        let out = apply_filters(&sample(), &criteria, at(2024, 9, 20, 12, 0));
        assert_eq!(descriptions(&out), vec!["Salary"]);
    }

    #[test]
    fn test_category_filter_is_exact() {
        let criteria = FilterCriteria::new().category(CategoryFilter::parse("food"));
        let out = apply_filters(&sample(), &criteria, at(2024, 9, 20, 12, 0));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_collection() {
        let criteria = FilterCriteria::new()
            .search("anything")
            .date_range(DateRange::Quarter)
            .sort(SortOrder::AmountAsc);
        assert!(apply_filters(&[], &criteria, at(2024, 9, 20, 12, 0)).is_empty());
        assert!(apply_filters(&[], &FilterCriteria::new(), at(2024, 9, 20, 12, 0)).is_empty());
    }

    #[test]
    fn test_amount_asc() {
        let records = vec![
            Record::expense(45.67, "Groceries", Category::Food, date(2024, 9, 14)),
            Record::income(1250.0, "Salary", Category::Income, date(2024, 9, 15)),
        ];
        let criteria = FilterCriteria::new().sort(SortOrder::AmountAsc);
        let now = at(2024, 9, 20, 12, 0);

        let out = apply_filters(&records, &criteria, now);
        assert_eq!(descriptions(&out), vec!["Groceries", "Salary"]);

        let reversed: Vec<Record> = records.into_iter().rev().collect();
        let out = apply_filters(&reversed, &criteria, now);
        assert_eq!(descriptions(&out), vec!["Groceries", "Salary"]);
        assert_eq!(descriptions(&reversed), vec!["Salary", "Groceries"]);
    }

    #[test]
    fn test_date_desc_default() {
        let records = vec![
            Record::expense(1.0, "old", Category::Other, date(2024, 1, 1)),
            Record::expense(1.0, "new", Category::Other, date(2024, 3, 1)),
            Record::expense(1.0, "mid", Category::Other, date(2024, 2, 1)),
        ];
        let out = apply_filters(&records, &FilterCriteria::new(), at(2024, 9, 20, 12, 0));
        assert_eq!(descriptions(&out), vec!["new", "mid", "old"]);
        for pair in out.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_other_sorts() {
        let records = vec![
            Record::expense(30.0, "banana", Category::Shopping, date(2024, 2, 1)),
            Record::expense(10.0, "Apple", Category::Food, date(2024, 3, 1)),
            Record::expense(20.0, "cherry", Category::Business, date(2024, 1, 1)),
        ];
        let now = at(2024, 9, 20, 12, 0);

        let by = |sort| apply_filters(&records, &FilterCriteria::new().sort(sort), now);
        assert_eq!(descriptions(&by(SortOrder::DateAsc)), vec!["cherry", "banana", "Apple"]);
        assert_eq!(descriptions(&by(SortOrder::AmountDesc)), vec!["banana", "cherry", "Apple"]);
        assert_eq!(
            descriptions(&by(SortOrder::DescriptionAsc)),
            vec!["Apple", "banana", "cherry"]
        );
        assert_eq!(
            descriptions(&by(SortOrder::CategoryAsc)),
            vec!["cherry", "Apple", "banana"]
        );
        assert_eq!(descriptions(&by(SortOrder::Unsorted)), vec!["banana", "Apple", "cherry"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let records = vec![
            Record::expense(5.0, "first", Category::Food, date(2024, 5, 5)),
            Record::expense(5.0, "second", Category::Food, date(2024, 5, 5)),
            Record::expense(5.0, "third", Category::Food, date(2024, 5, 5)),
        ];
        let now = at(2024, 9, 20, 12, 0);
        for sort in [
            SortOrder::DateDesc,
            SortOrder::DateAsc,
            SortOrder::AmountDesc,
            SortOrder::AmountAsc,
        ] {
            let out = apply_filters(&records, &FilterCriteria::new().sort(sort), now);
            assert_eq!(descriptions(&out), vec!["first", "second", "third"]);
        }
    }

    #[test]
    fn test_unknown_keys_fall_back() {
        assert_eq!(SortOrder::parse_lenient("payee-desc"), SortOrder::Unsorted);
        assert_eq!(SortOrder::parse_lenient("Amount-Asc"), SortOrder::AmountAsc);
        assert_eq!(DateRange::parse_lenient("fortnight"), DateRange::All);
        assert_eq!(DateRange::parse_lenient("QUARTER"), DateRange::Quarter);
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
    }

    #[test]
    fn test_today() {
        let records = vec![
            Record::expense(1.0, "today", Category::Food, date(2025, 3, 10)),
            Record::expense(1.0, "yesterday", Category::Food, date(2025, 3, 9)),
            Record::expense(1.0, "tomorrow", Category::Food, date(2025, 3, 11)),
        ];
        let criteria = FilterCriteria::new().date_range(DateRange::Today);
        let out = apply_filters(&records, &criteria, at(2025, 3, 10, 23, 59));
        assert_eq!(descriptions(&out), vec!["today"]);
    }

    #[test]
    fn test_week_is_rolling_with_no_upper_bound() {
        let records = vec![
            Record::expense(1.0, "future", Category::Food, date(2025, 4, 1)),
            Record::expense(1.0, "six days", Category::Food, date(2025, 3, 4)),
            Record::expense(1.0, "seven days", Category::Food, date(2025, 3, 3)),
            Record::expense(1.0, "eight days", Category::Food, date(2025, 3, 2)),
        ];
        let criteria = FilterCriteria::new().date_range(DateRange::Week);

        // At midnight the record from exactly seven days ago is on the boundary.
        let out = apply_filters(&records, &criteria, at(2025, 3, 10, 0, 0));
        assert_eq!(descriptions(&out), vec!["future", "six days", "seven days"]);

        // Later in the day it falls out of the window.
        let out = apply_filters(&records, &criteria, at(2025, 3, 10, 9, 30));
        assert_eq!(descriptions(&out), vec!["future", "six days"]);
    }

    #[test]
    fn test_month() {
        let records = vec![
            Record::expense(1.0, "this month", Category::Food, date(2025, 3, 1)),
            Record::expense(1.0, "last month", Category::Food, date(2025, 2, 28)),
            Record::expense(1.0, "last year", Category::Food, date(2024, 3, 15)),
        ];
        let criteria = FilterCriteria::new().date_range(DateRange::Month);
        let out = apply_filters(&records, &criteria, at(2025, 3, 31, 8, 0));
        assert_eq!(descriptions(&out), vec!["this month"]);
    }

    #[test]
    fn test_quarter() {
        let records = vec![
            Record::expense(1.0, "q3 start", Category::Food, date(2025, 7, 1)),
            Record::expense(1.0, "q2 end", Category::Food, date(2025, 6, 30)),
            Record::expense(1.0, "next quarter", Category::Food, date(2025, 10, 2)),
        ];
        let criteria = FilterCriteria::new()
            .date_range(DateRange::Quarter)
            .sort(SortOrder::Unsorted);
        let out = apply_filters(&records, &criteria, at(2025, 9, 30, 12, 0));
        assert_eq!(descriptions(&out), vec!["q3 start", "next quarter"]);

        // First quarter starts in January.
        assert_eq!(quarter_start(date(2025, 2, 14)), Some(date(2025, 1, 1)));
        assert_eq!(quarter_start(date(2025, 12, 31)), Some(date(2025, 10, 1)));
    }

    #[test]
    fn test_year() {
        let records = vec![
            Record::expense(1.0, "this year", Category::Food, date(2025, 1, 1)),
            Record::expense(1.0, "last year", Category::Food, date(2024, 12, 31)),
        ];
        let criteria = FilterCriteria::new().date_range(DateRange::Year);
        let out = apply_filters(&records, &criteria, at(2025, 6, 1, 0, 0));
        assert_eq!(descriptions(&out), vec!["this year"]);
    }

    #[test]
    fn test_filters_combine() {
        let records = vec![
            Record::expense(20.0, "Groceries run", Category::Food, date(2025, 3, 9)),
            Record::expense(35.0, "Groceries bulk", Category::Shopping, date(2025, 3, 8)),
            Record::expense(12.0, "Groceries old", Category::Food, date(2025, 1, 2)),
            Record::expense(8.0, "Coffee", Category::Food, date(2025, 3, 9)),
        ];
        let criteria = FilterCriteria::new()
            .search("groceries")
            .category(CategoryFilter::parse("Food"))
            .date_range(DateRange::Month)
            .sort(SortOrder::AmountDesc);
        let out = apply_filters(&records, &criteria, at(2025, 3, 10, 12, 0));
        assert_eq!(descriptions(&out), vec!["Groceries run"]);
    }

    #[test]
    fn test_output_is_subset_and_idempotent() {
        let mut records = sample();
        records.push(Record::expense(
            99.0,
            "Dinner",
            Category::Entertainment,
            date(2024, 9, 18),
        ));
        let criteria = FilterCriteria::new().search("e").sort(SortOrder::AmountDesc);
        let now = at(2024, 9, 20, 12, 0);

        let first = apply_filters(&records, &criteria, now);
        let second = apply_filters(&records, &criteria, now);
        assert_eq!(first, second);
        for r in &first {
            assert!(records.contains(r));
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = sample();
        let before = records.clone();
        let _ = apply_filters(
            &records,
            &FilterCriteria::new().sort(SortOrder::AmountAsc),
            at(2024, 9, 20, 12, 0),
        );
        assert_eq!(records, before);
    }

    #[test]
    fn test_negative_amount_sorts_without_panicking() {
        let mut odd = Record::expense(1.0, "odd", Category::Other, date(2024, 1, 1));
        odd.amount = Amount::new(-3.0);
        let records = vec![
            Record::expense(2.0, "normal", Category::Other, date(2024, 1, 1)),
            odd,
        ];
        let out = apply_filters(
            &records,
            &FilterCriteria::new().sort(SortOrder::AmountAsc),
            at(2024, 9, 20, 12, 0),
        );
        assert_eq!(descriptions(&out), vec!["odd", "normal"]);
    }

    #[test]
    fn test_is_default() {
        assert!(FilterCriteria::new().is_default());
        assert!(FilterCriteria::new().sort(SortOrder::AmountAsc).is_default());
        assert!(!FilterCriteria::new().search("x").is_default());
        assert!(!FilterCriteria::new().date_range(DateRange::Week).is_default());
    }
}
