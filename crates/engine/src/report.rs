//! Report aggregation.
//!
//! Operations are grouped twice, by resolved category name and by calendar month,
//! and each group keeps running income/expense totals. The report then picks the
//! leading group along five independent dimensions.

use std::collections::HashMap;

use api_types::{
    category::Category,
    operation::{Operation, OperationKind},
    stats::{GroupTotals, Highest, Report},
};
use chrono::NaiveDate;

use crate::util::DATE_FORMAT;

/// Group name for operations whose category cannot be resolved.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Build a report from one snapshot of operations and categories.
///
/// Ties are resolved in favour of the group that appeared first in `operations`.
pub fn build_report(operations: &[Operation], categories: &[Category]) -> Report {
    let names = category_names(categories);
    let mut category_totals = GroupTotals::default();
    let mut month_totals = GroupTotals::default();

    for op in operations {
        let category = op
            .category
            .as_ref()
            .and_then(|id| names.get(id.as_str()).copied())
            .unwrap_or(UNCATEGORIZED);
        record(&mut category_totals, category, op);
        record(&mut month_totals, month_key(&op.date), op);
    }

    let by_income = |totals: &GroupTotals| {
        highest(
            totals.iter().map(|(name, agg)| (name.to_string(), agg.income)),
            Some(0.0),
        )
    };
    let by_expense = |totals: &GroupTotals| {
        highest(
            totals.iter().map(|(name, agg)| (name.to_string(), agg.expense)),
            Some(0.0),
        )
    };

    let category_with_highest_balance = highest(
        category_totals
            .iter()
            .map(|(name, agg)| (name.to_string(), agg.balance)),
        None,
    );

    let months = month_totals
        .iter()
        .map(|(key, agg)| (month_display_name(key), *agg))
        .collect::<Vec<_>>();
    let month_with_highest_income = highest(
        months.iter().map(|(name, agg)| (name.clone(), agg.income)),
        Some(0.0),
    );
    let month_with_highest_expense = highest(
        months.iter().map(|(name, agg)| (name.clone(), agg.expense)),
        Some(0.0),
    );

    Report {
        category_with_highest_income: by_income(&category_totals),
        category_with_highest_expense: by_expense(&category_totals),
        category_with_highest_balance,
        month_with_highest_income,
        month_with_highest_expense,
        category_totals,
        month_totals,
    }
}

/// `YYYY-MM` grouping key of a `YYYY-MM-DD` date.
///
/// Shorter strings are used whole.
pub fn month_key(date: &str) -> &str {
    date.get(..7).unwrap_or(date)
}

/// English "Month YYYY" label for a `YYYY-MM` key, e.g. `"January 2024"`.
///
/// Keys that are not a valid month are returned unchanged.
pub fn month_display_name(key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{key}-01"), DATE_FORMAT)
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|_| key.to_string())
}

/// Category id -> display name. The first category with a given id wins.
pub fn category_names(categories: &[Category]) -> HashMap<&str, &str> {
    let mut names = HashMap::with_capacity(categories.len());
    for category in categories {
        if category.name.is_empty() {
            continue;
        }
        names
            .entry(category.id.as_str())
            .or_insert(category.name.as_str());
    }
    names
}

fn record(totals: &mut GroupTotals, group: &str, op: &Operation) {
    let aggregate = totals.entry(group);
    match op.kind {
        OperationKind::Income => aggregate.income += op.amount,
        OperationKind::Expense => aggregate.expense += op.amount,
    }
    aggregate.balance = aggregate.income - aggregate.expense;
}

/// Pick the entry with the largest amount using a strict comparison.
///
/// With a `floor`, only amounts above it qualify and the result defaults to N/A.
/// Without one, the first entry always qualifies. No entries at all yields N/A.
fn highest(entries: impl IntoIterator<Item = (String, f64)>, floor: Option<f64>) -> Highest {
    let mut best = floor.map(|amount| Highest {
        name: Highest::NOT_AVAILABLE.to_string(),
        amount,
    });
    for (name, amount) in entries {
        if best.as_ref().is_none_or(|current| amount > current.amount) {
            best = Some(Highest { name, amount });
        }
    }
    best.unwrap_or_else(Highest::not_available)
}

#[cfg(test)]
mod tests {
    use api_types::{Id, stats::Aggregate};

    use super::*;

    fn op(kind: OperationKind, amount: f64, category: Option<&str>, date: &str) -> Operation {
        Operation {
            id: Id::from("0"),
            description: "entry".to_string(),
            amount,
            kind,
            category: category.map(Id::from),
            date: date.to_string(),
        }
    }

    fn cat(id: &str, name: &str) -> Category {
        Category {
            id: Id::from(id),
            name: name.to_string(),
        }
    }

    fn highest_of(name: &str, amount: f64) -> Highest {
        Highest {
            name: name.to_string(),
            amount,
        }
    }

    #[test]
    fn empty_input_reports_not_available() {
        let report = build_report(&[], &[cat("1", "Food")]);
        assert_eq!(report, Report::default());
        assert!(!report.category_with_highest_balance.is_available());
        assert_eq!(report.category_with_highest_balance.amount, 0.0);
    }

    #[test]
    fn unresolved_categories_merge_into_uncategorized() {
        let ops = [
            op(OperationKind::Expense, 10.0, Some("99"), "2024-01-01"),
            op(OperationKind::Expense, 5.0, None, "2024-01-02"),
        ];
        let report = build_report(&ops, &[cat("1", "Food")]);
        assert_eq!(report.category_totals.len(), 1);
        assert_eq!(
            report.category_totals.get(UNCATEGORIZED),
            Some(&Aggregate {
                income: 0.0,
                expense: 15.0,
                balance: -15.0,
            })
        );
    }

    #[test]
    fn negative_balance_can_lead_when_it_is_the_only_group() {
        let ops = [op(OperationKind::Expense, 80.0, Some("1"), "2024-05-10")];
        let report = build_report(&ops, &[cat("1", "Rent")]);
        assert_eq!(report.category_with_highest_balance, highest_of("Rent", -80.0));
        assert_eq!(report.category_with_highest_income, Highest::not_available());
        assert_eq!(report.month_with_highest_income, Highest::not_available());
        assert_eq!(report.month_with_highest_expense, highest_of("May 2024", 80.0));
    }

    #[test]
    fn ties_keep_the_first_group() {
        let ops = [
            op(OperationKind::Income, 100.0, Some("2"), "2024-02-01"),
            op(OperationKind::Income, 100.0, Some("1"), "2024-01-01"),
        ];
        let report = build_report(&ops, &[cat("1", "Salary"), cat("2", "Bonus")]);
        assert_eq!(report.category_with_highest_income, highest_of("Bonus", 100.0));
        assert_eq!(
            report.month_with_highest_income,
            highest_of("February 2024", 100.0)
        );
    }

    #[test]
    fn duplicate_category_ids_resolve_to_the_first() {
        let ops = [op(OperationKind::Income, 1.0, Some("1"), "2024-01-01")];
        let report = build_report(&ops, &[cat("1", "First"), cat("1", "Second")]);
        assert!(report.category_totals.get("First").is_some());
    }

    #[test]
    fn month_helpers() {
        assert_eq!(month_key("2024-01-15"), "2024-01");
        assert_eq!(month_key("2024"), "2024");
        assert_eq!(month_display_name("2024-12"), "December 2024");
        assert_eq!(month_display_name("garbage"), "garbage");
    }
}
