#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;
use crate::error::LedgerError;
use crate::models::UNCATEGORIZED;

// ── parse_date ────────────────────────────────────────────────

#[test]
fn test_parse_date_valid() {
    let d = parse_date("2024-01-15").unwrap();
    assert_eq!(d, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
}

#[test]
fn test_parse_date_requires_zero_padding() {
    // chrono alone would accept these; the exact shape check must not
    assert!(parse_date("2024-1-15").is_err());
    assert!(parse_date("2024-01-5").is_err());
    assert!(parse_date("24-01-15").is_err());
}

#[test]
fn test_parse_date_rejects_other_formats() {
    assert!(parse_date("01/15/2024").is_err());
    assert!(parse_date("2024-01-15T00:00:00").is_err());
    assert!(parse_date("").is_err());
    assert!(parse_date("not-a-date").is_err());
}

#[test]
fn test_parse_date_calendar_validity() {
    assert!(parse_date("2024-02-29").is_ok()); // leap year
    assert!(parse_date("2023-02-29").is_err());
    assert!(parse_date("2024-02-30").is_err());
    assert!(parse_date("2024-13-01").is_err());
    assert!(parse_date("2024-00-10").is_err());
}

#[test]
fn test_parse_date_error_kind() {
    assert!(matches!(
        parse_date("bogus"),
        Err(LedgerError::InvalidDate(_))
    ));
}

// ── parse_month ───────────────────────────────────────────────

#[test]
fn test_parse_month_valid() {
    let m = parse_month("2024-01").unwrap();
    assert_eq!((m.year, m.month), (2024, 1));
    let m = parse_month("1999-12").unwrap();
    assert_eq!((m.year, m.month), (1999, 12));
}

#[test]
fn test_parse_month_invalid() {
    assert!(parse_month("2024-13").is_err());
    assert!(parse_month("2024-00").is_err());
    assert!(parse_month("2024-1").is_err());
    assert!(parse_month("2024-01-15").is_err());
    assert!(parse_month("").is_err());
}

#[test]
fn test_parse_month_display_roundtrip() {
    let m = parse_month("2024-03").unwrap();
    assert_eq!(m.to_string(), "2024-03");
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_valid() {
    assert_eq!(parse_amount("100").unwrap(), dec!(100));
    assert_eq!(parse_amount("42.50").unwrap(), dec!(42.50));
    assert_eq!(parse_amount(" 7.25 ").unwrap(), dec!(7.25));
    // Sign is accepted here; positivity is the caller's rule
    assert_eq!(parse_amount("-3").unwrap(), dec!(-3));
}

#[test]
fn test_parse_amount_invalid() {
    assert!(parse_amount("").is_err());
    assert!(parse_amount("abc").is_err());
    assert!(parse_amount("12.3.4").is_err());
}

// ── parse_kind ────────────────────────────────────────────────

#[test]
fn test_parse_kind_canonical_labels() {
    assert_eq!(parse_kind("Income").unwrap(), Kind::Income);
    assert_eq!(parse_kind("Expense").unwrap(), Kind::Expense);
}

#[test]
fn test_parse_kind_case_sensitive() {
    assert!(parse_kind("income").is_err());
    assert!(parse_kind("EXPENSE").is_err());
    assert!(parse_kind("Transfer").is_err());
    assert!(parse_kind("").is_err());
}

// ── row parsers ───────────────────────────────────────────────

fn record(fields: &[&str]) -> csv::StringRecord {
    csv::StringRecord::from(fields.to_vec())
}

#[test]
fn test_parse_transaction_row_full() {
    let txn =
        parse_transaction_row(&record(&["2024-01-05", "100", "Expense", "Food", "lunch"])).unwrap();
    assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    assert_eq!(txn.amount, dec!(100));
    assert_eq!(txn.kind, Kind::Expense);
    assert_eq!(txn.category, "Food");
    assert_eq!(txn.description, "lunch");
}

#[test]
fn test_parse_transaction_row_missing_description() {
    let txn = parse_transaction_row(&record(&["2024-01-05", "100", "Income", "Salary"])).unwrap();
    assert_eq!(txn.description, "");
}

#[test]
fn test_parse_transaction_row_blank_category_kept() {
    let txn = parse_transaction_row(&record(&["2024-01-05", "100", "Expense", "", ""])).unwrap();
    assert_eq!(txn.category, "");
    assert_eq!(txn.category_label(), UNCATEGORIZED);
}

#[test]
fn test_parse_transaction_row_bad_fields() {
    assert!(parse_transaction_row(&record(&["2024-1-5", "100", "Expense", "Food", ""])).is_err());
    assert!(parse_transaction_row(&record(&["2024-01-05", "x", "Expense", "Food", ""])).is_err());
    assert!(parse_transaction_row(&record(&["2024-01-05", "100", "支出", "Food", ""])).is_err());
    assert!(parse_transaction_row(&record(&[])).is_err());
}

#[test]
fn test_parse_budget_row() {
    let (category, limit) = parse_budget_row(&record(&["Food", "500"])).unwrap();
    assert_eq!(category, "Food");
    assert_eq!(limit, dec!(500));
    assert!(parse_budget_row(&record(&["Food", "lots"])).is_err());
}
