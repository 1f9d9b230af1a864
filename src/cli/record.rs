//! Record CLI commands
//!
//! One-shot views over the session: the dashboard summary, the filtered
//! record list, record details and the category list.

use chrono::NaiveDateTime;
use clap::Args;

use crate::config::Settings;
use crate::display::{
    format_category_list, format_record_details, format_record_register, format_summary,
};
use crate::error::FinboardResult;
use crate::models::RecordKind;
use crate::services::{
    apply_filters, CategoryFilter, DateRange, FilterCriteria, RecordService, SortOrder, Summary,
};
use crate::storage::Session;

/// Filter and sort options for listing records
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Text matched against description and category, ignoring case
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category label, or "all"
    #[arg(short, long)]
    pub category: Option<String>,

    /// Date range: all, today, week, month, quarter, year
    #[arg(short, long)]
    pub range: Option<String>,

    /// Sort: date-desc, date-asc, amount-desc, amount-asc, description-asc, category-asc
    #[arg(long)]
    pub sort: Option<String>,

    /// Number of records to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl ListArgs {
    /// Overlay the given options on `base`
    pub fn apply_to(&self, mut base: FilterCriteria) -> FilterCriteria {
        if let Some(search) = &self.search {
            base.search = search.clone();
        }
        if let Some(category) = &self.category {
            base.category = CategoryFilter::parse(category);
        }
        if let Some(range) = &self.range {
            base.date_range = DateRange::parse_lenient(range);
        }
        if let Some(sort) = &self.sort {
            base.sort = SortOrder::parse_lenient(sort);
        }
        base
    }
}

/// Criteria in effect before the user narrows anything
pub fn default_criteria(settings: &Settings) -> FilterCriteria {
    FilterCriteria::new()
        .date_range(DateRange::parse_lenient(&settings.default_range))
        .sort(SortOrder::parse_lenient(&settings.default_sort))
}

/// Render the dashboard summary over every record
pub fn render_summary(session: &Session, settings: &Settings) -> FinboardResult<String> {
    let records = RecordService::new(session).list()?;
    Ok(format_summary(&Summary::compute(&records), settings))
}

/// Render the filtered record list
pub fn render_list(
    session: &Session,
    settings: &Settings,
    criteria: &FilterCriteria,
    limit: Option<usize>,
    now: NaiveDateTime,
) -> FinboardResult<String> {
    let records = RecordService::new(session).list()?;
    let mut filtered = apply_filters(&records, criteria, now);
    let matched = filtered.len();
    if let Some(limit) = limit {
        filtered.truncate(limit);
    }

    let mut output = format_record_register(&filtered, settings);
    if !filtered.is_empty() {
        output.push_str(&format!(
            "Showing {} of {} records",
            filtered.len(),
            records.len()
        ));
        if matched != filtered.len() {
            output.push_str(&format!(" ({} matched)", matched));
        }
        output.push('\n');
    }
    if !criteria.is_default() {
        output.push_str(&format!("Filter: {}\n", criteria));
    }

    Ok(output)
}

/// Render one record's details
pub fn render_show(session: &Session, settings: &Settings, id: &str) -> FinboardResult<String> {
    let service = RecordService::new(session);
    let record = service.find(id)?;
    let mut output = format_record_details(&record, settings);

    if record.kind == RecordKind::Expense {
        let summary = Summary::compute(&service.list()?);
        output.push_str(&format!(
            "Share:       {:.1}% of all spending is {}\n",
            summary.category_share(record.category),
            record.category
        ));
    }

    Ok(output)
}

/// Print the dashboard summary
pub fn handle_summary(session: &Session, settings: &Settings) -> FinboardResult<()> {
    print!("{}", render_summary(session, settings)?);
    Ok(())
}

/// Print the filtered record list
pub fn handle_list(
    session: &Session,
    settings: &Settings,
    args: &ListArgs,
    now: NaiveDateTime,
) -> FinboardResult<()> {
    let criteria = args.apply_to(default_criteria(settings));
    print!(
        "{}",
        render_list(session, settings, &criteria, args.limit, now)?
    );
    Ok(())
}

/// Print one record's details
pub fn handle_show(session: &Session, settings: &Settings, id: &str) -> FinboardResult<()> {
    print!("{}", render_show(session, settings, id)?);
    Ok(())
}

/// Print the category list
pub fn handle_categories() {
    print!("{}", format_category_list());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 20)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_args_overlay_defaults() {
        let args = ListArgs {
            search: Some("groc".into()),
            sort: Some("amount-asc".into()),
            ..Default::default()
        };
        let criteria = args.apply_to(default_criteria(&Settings::default()));
        assert_eq!(criteria.search, "groc");
        assert_eq!(criteria.sort, SortOrder::AmountAsc);
        assert_eq!(criteria.category, CategoryFilter::All);
        assert_eq!(criteria.date_range, DateRange::All);
    }

    #[test]
    fn test_default_criteria_from_settings() {
        let settings = Settings {
            default_sort: "amount-desc".into(),
            default_range: "month".into(),
            ..Settings::default()
        };
        let criteria = default_criteria(&settings);
        assert_eq!(criteria.sort, SortOrder::AmountDesc);
        assert_eq!(criteria.date_range, DateRange::Month);
    }

    #[test]
    fn test_render_list_limit() {
        let session = Session::with_sample_data().unwrap();
        let settings = Settings::default();
        let output = render_list(&session, &settings, &FilterCriteria::new(), Some(1), now())
            .unwrap();

        assert!(output.contains("Salary"));
        assert!(!output.contains("Groceries"));
        assert!(output.contains("Showing 1 of 2 records (2 matched)"));
    }

    #[test]
    fn test_render_list_no_match() {
        let session = Session::with_sample_data().unwrap();
        let criteria = FilterCriteria::new().search("rent");
        let output =
            render_list(&session, &Settings::default(), &criteria, None, now()).unwrap();
        assert_eq!(
            output,
            "No records found.\nFilter: search='rent' category=all range=all sort=date-desc\n"
        );
    }

    #[test]
    fn test_render_list_unfiltered_has_no_filter_line() {
        let session = Session::with_sample_data().unwrap();
        let output =
            render_list(&session, &Settings::default(), &FilterCriteria::new(), None, now())
                .unwrap();
        assert!(!output.contains("Filter:"));
    }

    #[test]
    fn test_render_show_expense_share() {
        let session = Session::with_sample_data().unwrap();
        let groceries = session.records.get_all().unwrap()[1].clone();
        let output =
            render_show(&session, &Settings::default(), &groceries.id.short()).unwrap();
        assert!(output.contains("Description: Groceries"));
        assert!(output.contains("Share:       100.0% of all spending is Food"));

        let salary = session.records.get_all().unwrap()[0].clone();
        let output = render_show(&session, &Settings::default(), &salary.id.short()).unwrap();
        assert!(!output.contains("Share:"));
    }

    #[test]
    fn test_render_summary() {
        let session = Session::with_sample_data().unwrap();
        let output = render_summary(&session, &Settings::default()).unwrap();
        assert!(output.contains("$1,204.33"));
        assert!(output.contains("Spending by Category"));
    }

    #[test]
    fn test_render_show_unknown() {
        let session = Session::with_sample_data().unwrap();
        let err = render_show(&session, &Settings::default(), "rec-ffffffff").unwrap_err();
        assert!(err.is_not_found());
    }
}
