//! Summary display formatting
//!
//! The dashboard view: four metric cards followed by the spending breakdown.

use crate::config::Settings;
use crate::services::Summary;

use super::truncate;

const BAR_WIDTH: usize = 20;
const CARD_WIDTH: usize = 18;

/// Format the metric cards
pub fn format_metric_cards(summary: &Summary, settings: &Settings) -> String {
    let symbol = &settings.currency_symbol;
    let cards = [
        ("Total Income", summary.total_income.format_with_symbol(symbol)),
        ("Total Expenses", summary.total_expenses.format_with_symbol(symbol)),
        ("Net Income", summary.net_income.format_with_symbol(symbol)),
        ("Transactions", summary.transaction_count.to_string()),
    ];

    let border = format!("+{}+\n", vec!["-".repeat(CARD_WIDTH + 2); cards.len()].join("+"));

    let mut output = String::new();
    output.push_str(&border);
    for row in [0, 1] {
        output.push('|');
        for (title, value) in &cards {
            let text = if row == 0 { *title } else { value.as_str() };
            output.push_str(&format!(" {:<width$} |", text, width = CARD_WIDTH));
        }
        output.push('\n');
    }
    output.push_str(&border);

    output
}

/// Format the top spending categories with a percentage bar
pub fn format_category_breakdown(summary: &Summary, settings: &Settings) -> String {
    let mut output = String::from("Spending by Category\n");

    let top = summary.top_categories(settings.top_categories);
    if top.is_empty() {
        output.push_str("  No expenses recorded.\n");
        return output;
    }

    for share in top {
        output.push_str(&format!(
            "  {:18} {:>14} {:>6.1}%  {}\n",
            truncate(share.category.label(), 18),
            share.amount.format_with_symbol(&settings.currency_symbol),
            share.percentage,
            bar(share.percentage)
        ));
    }

    output
}

/// Format the full dashboard summary
pub fn format_summary(summary: &Summary, settings: &Settings) -> String {
    format!(
        "{}\n{}",
        format_metric_cards(summary, settings),
        format_category_breakdown(summary, settings)
    )
}

fn bar(percentage: f64) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
