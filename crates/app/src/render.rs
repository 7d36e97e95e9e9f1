//! Plain-text rendering of tracker results for the terminal.

use api_types::{
    category::Category,
    operation::{Operation, OperationKind},
    stats::{Aggregate, Balance, GroupTotals, Highest, Report},
};
use chrono::NaiveDate;
use engine::{Filter, UNCATEGORIZED, category_names, month_display_name};

/// `1234.5` -> `$1,234.50`, `-300` -> `-$300.00`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{:02}", cents % 100)
}

/// `2024-01-15` -> `1/15/2024`; anything else is shown as stored.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format("%-m/%-d/%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

pub fn format_balance(balance: &Balance, symbol: &str) -> String {
    format!(
        "Income:   {:>14}\nExpenses: {:>14}\nBalance:  {:>14}\n",
        format_currency(balance.income, symbol),
        format_currency(balance.expenses, symbol),
        format_currency(balance.balance, symbol),
    )
}

pub fn format_operations(
    operations: &[Operation],
    categories: &[Category],
    symbol: &str,
) -> String {
    if operations.is_empty() {
        return "No operations found.\n".to_string();
    }

    let names = category_names(categories);

    let mut output = format!(
        "{:>6} {:10} {:24} {:18} {:>14}\n",
        "Id", "Date", "Description", "Category", "Amount"
    );
    output.push_str(&"-".repeat(76));
    output.push('\n');

    for op in operations {
        let category = op
            .category
            .as_ref()
            .and_then(|id| names.get(id.as_str()).copied())
            .unwrap_or(UNCATEGORIZED);
        let signed = match op.kind {
            OperationKind::Income => op.amount,
            OperationKind::Expense => -op.amount,
        };
        output.push_str(&format!(
            "{:>6} {:10} {:24} {:18} {:>14}\n",
            op.id.as_str(),
            format_date(&op.date),
            truncate(&op.description, 24),
            truncate(category, 18),
            format_currency(signed, symbol),
        ));
    }
    output
}

pub fn format_categories(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = format!("{:>6} {}\n", "Id", "Name");
    output.push_str(&"-".repeat(30));
    output.push('\n');
    for category in categories {
        output.push_str(&format!("{:>6} {}\n", category.id.as_str(), category.name));
    }
    output
}

pub fn format_filter(filter: &Filter) -> String {
    let category = filter.category.id().map_or("all", |id| id.as_str());
    format!(
        "type: {}\ncategory: {}\nsort: {}\n",
        match filter.kind.kind() {
            Some(kind) => kind.as_str(),
            None => "all",
        },
        category,
        filter.sort_by,
    )
}

pub fn format_report(report: &Report, symbol: &str) -> String {
    let mut output = String::new();
    let highlights: [(&str, &Highest); 5] = [
        (
            "Category with highest income",
            &report.category_with_highest_income,
        ),
        (
            "Category with highest expense",
            &report.category_with_highest_expense,
        ),
        (
            "Category with highest balance",
            &report.category_with_highest_balance,
        ),
        ("Month with highest income", &report.month_with_highest_income),
        (
            "Month with highest expense",
            &report.month_with_highest_expense,
        ),
    ];
    for (label, highest) in highlights {
        output.push_str(&format!(
            "{label:30} {}\n",
            format_highest(highest, symbol)
        ));
    }

    output.push_str("\nBy category\n");
    output.push_str(&format_totals(
        report
            .category_totals
            .iter()
            .map(|(name, totals)| (name.to_string(), totals)),
        symbol,
    ));

    output.push_str("\nBy month\n");
    output.push_str(&format_totals(
        months_in_order(&report.month_totals)
            .into_iter()
            .map(|(key, totals)| (month_display_name(key), totals)),
        symbol,
    ));
    output
}

fn format_highest(highest: &Highest, symbol: &str) -> String {
    if !highest.is_available() {
        return highest.name.clone();
    }
    format!("{} ({})", highest.name, format_currency(highest.amount, symbol))
}

fn format_totals<'a>(
    rows: impl Iterator<Item = (String, &'a Aggregate)>,
    symbol: &str,
) -> String {
    let mut output = format!(
        "{:24} {:>14} {:>14} {:>14}\n",
        "", "Income", "Expense", "Balance"
    );
    let mut empty = true;
    for (name, totals) in rows {
        empty = false;
        output.push_str(&format!(
            "{:24} {:>14} {:>14} {:>14}\n",
            truncate(&name, 24),
            format_currency(totals.income, symbol),
            format_currency(totals.expense, symbol),
            format_currency(totals.balance, symbol),
        ));
    }
    if empty {
        return "No data.\n".to_string();
    }
    output
}

/// Month groups sorted by their `YYYY-MM` key.
fn months_in_order(totals: &GroupTotals) -> Vec<(&str, &Aggregate)> {
    let mut months: Vec<_> = totals.iter().collect();
    months.sort_by(|a, b| a.0.cmp(b.0));
    months
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        value.to_string()
    } else {
        let mut short: String = value.chars().take(max.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}
