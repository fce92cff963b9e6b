#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn make_txn(kind: Kind, category: &str) -> Transaction {
    Transaction {
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        amount: dec!(42.50),
        kind,
        category: category.into(),
        description: String::new(),
    }
}

// ── Kind ──────────────────────────────────────────────────────

#[test]
fn test_kind_as_str() {
    assert_eq!(Kind::Income.as_str(), "Income");
    assert_eq!(Kind::Expense.as_str(), "Expense");
}

#[test]
fn test_kind_display() {
    assert_eq!(format!("{}", Kind::Income), "Income");
    assert_eq!(format!("{}", Kind::Expense), "Expense");
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_income_expense_predicates() {
    let income = make_txn(Kind::Income, "Salary");
    assert!(income.is_income());
    assert!(!income.is_expense());

    let expense = make_txn(Kind::Expense, "Food");
    assert!(expense.is_expense());
    assert!(!expense.is_income());
}

#[test]
fn test_category_label_passthrough() {
    let txn = make_txn(Kind::Expense, "Food");
    assert_eq!(txn.category_label(), "Food");
}

#[test]
fn test_category_label_sentinel_for_blank() {
    assert_eq!(make_txn(Kind::Expense, "").category_label(), UNCATEGORIZED);
    assert_eq!(
        make_txn(Kind::Expense, "   ").category_label(),
        UNCATEGORIZED
    );
}

#[test]
fn test_category_label_keeps_surrounding_whitespace() {
    // Non-blank categories are shown exactly as stored
    let txn = make_txn(Kind::Expense, " Food ");
    assert_eq!(txn.category_label(), " Food ");
}

// ── Budget ────────────────────────────────────────────────────

#[test]
fn test_budget_fields() {
    let budget = Budget {
        category: "Food".into(),
        limit: dec!(500),
    };
    assert_eq!(budget.category, "Food");
    assert_eq!(budget.limit, Decimal::from(500));
}

// ── Month ─────────────────────────────────────────────────────

#[test]
fn test_month_from_date() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
    let m = Month::from_date(date);
    assert_eq!((m.year, m.month), (2024, 3));
}

#[test]
fn test_month_contains() {
    let m = Month {
        year: 2024,
        month: 1,
    };
    assert!(m.contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    assert!(m.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
    assert!(!m.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
    assert!(!m.contains(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()));
}

#[test]
fn test_month_bounds() {
    let m = Month {
        year: 2024,
        month: 2,
    };
    assert_eq!(m.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(m.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
}

#[test]
fn test_month_next_prev_wrap_year() {
    let december = Month {
        year: 2023,
        month: 12,
    };
    assert_eq!(
        december.next(),
        Month {
            year: 2024,
            month: 1
        }
    );
    assert_eq!(
        Month {
            year: 2024,
            month: 1
        }
        .prev(),
        december
    );
}

#[test]
fn test_month_display_zero_padded() {
    let m = Month {
        year: 2024,
        month: 7,
    };
    assert_eq!(m.to_string(), "2024-07");
}
