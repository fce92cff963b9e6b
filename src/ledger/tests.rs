#![allow(clippy::unwrap_used)]

use std::fs;

use rust_decimal_macros::dec;

use super::*;

fn temp_ledger() -> (tempfile::TempDir, Ledger) {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(dir.path()).unwrap();
    (dir, ledger)
}

fn month(s: &str) -> Month {
    validate::parse_month(s).unwrap()
}

// ── add_transaction ───────────────────────────────────────────

#[test]
fn test_add_transaction_valid() {
    let (_dir, ledger) = temp_ledger();
    let txn = ledger
        .add_transaction("2024-01-05", "100", "Expense", "Food", "lunch")
        .unwrap();
    assert_eq!(txn.amount, dec!(100));
    assert_eq!(txn.kind, Kind::Expense);
}

#[test]
fn test_add_transaction_rejects_bad_date() {
    let (_dir, ledger) = temp_ledger();
    assert!(matches!(
        ledger.add_transaction("2024-1-5", "100", "Expense", "Food", ""),
        Err(LedgerError::InvalidDate(_))
    ));
}

#[test]
fn test_add_transaction_rejects_nonpositive_amount() {
    let (_dir, ledger) = temp_ledger();
    assert!(matches!(
        ledger.add_transaction("2024-01-05", "0", "Expense", "Food", ""),
        Err(LedgerError::NonPositiveAmount)
    ));
    assert!(matches!(
        ledger.add_transaction("2024-01-05", "-5", "Expense", "Food", ""),
        Err(LedgerError::NonPositiveAmount)
    ));
}

#[test]
fn test_add_transaction_rejects_bad_kind() {
    let (_dir, ledger) = temp_ledger();
    assert!(matches!(
        ledger.add_transaction("2024-01-05", "100", "expense", "Food", ""),
        Err(LedgerError::InvalidKind(_))
    ));
}

#[test]
fn test_add_transaction_rejects_bad_amount() {
    let (_dir, ledger) = temp_ledger();
    assert!(matches!(
        ledger.add_transaction("2024-01-05", "ten", "Expense", "Food", ""),
        Err(LedgerError::InvalidAmount(_))
    ));
}

#[test]
fn test_add_transaction_blank_category_stored_verbatim() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-05", "100", "Expense", "", "no category")
        .unwrap();
    let all = ledger.list_transactions().unwrap();
    assert_eq!(all[0].category, "");
}

// ── query_range ───────────────────────────────────────────────

#[test]
fn test_query_range_totals_and_order() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-05", "100", "Expense", "Food", "")
        .unwrap();
    ledger
        .add_transaction("2024-01-10", "50", "Income", "Salary", "")
        .unwrap();

    let report = ledger.query_range("2024-01-01", "2024-01-31").unwrap();
    assert_eq!(report.transactions.len(), 2);
    assert_eq!(report.total_expense, dec!(100));
    assert_eq!(report.total_income, dec!(50));
    assert_eq!(report.net_balance(), dec!(-50));
    assert_eq!(report.transactions[0].date.to_string(), "2024-01-05");
    assert_eq!(report.transactions[1].date.to_string(), "2024-01-10");
}

#[test]
fn test_query_range_inclusive_bounds() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-01", "10", "Expense", "A", "")
        .unwrap();
    ledger
        .add_transaction("2024-01-31", "20", "Expense", "B", "")
        .unwrap();
    ledger
        .add_transaction("2024-02-01", "30", "Expense", "C", "")
        .unwrap();

    let report = ledger.query_range("2024-01-01", "2024-01-31").unwrap();
    assert_eq!(report.transactions.len(), 2);
    assert_eq!(report.total_expense, dec!(30));
}

#[test]
fn test_query_range_start_after_end() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-05", "100", "Expense", "Food", "")
        .unwrap();
    assert!(matches!(
        ledger.query_range("2024-02-01", "2024-01-01"),
        Err(LedgerError::InvalidRange { .. })
    ));
}

#[test]
fn test_query_range_bad_bound_format() {
    let (_dir, ledger) = temp_ledger();
    assert!(matches!(
        ledger.query_range("2024/01/01", "2024-01-31"),
        Err(LedgerError::InvalidDate(_))
    ));
    assert!(matches!(
        ledger.query_range("2024-01-01", "soon"),
        Err(LedgerError::InvalidDate(_))
    ));
}

#[test]
fn test_query_range_empty_match_is_success() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-06-15", "100", "Expense", "Food", "")
        .unwrap();
    let report = ledger.query_range("2024-01-01", "2024-01-31").unwrap();
    assert!(report.transactions.is_empty());
    assert_eq!(report.total_income, Decimal::ZERO);
    assert_eq!(report.total_expense, Decimal::ZERO);
}

#[test]
fn test_query_range_stable_sort_keeps_file_order_on_ties() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-10", "1", "Expense", "Food", "first")
        .unwrap();
    ledger
        .add_transaction("2024-01-05", "2", "Expense", "Food", "earliest")
        .unwrap();
    ledger
        .add_transaction("2024-01-10", "3", "Expense", "Food", "second")
        .unwrap();

    let report = ledger.query_range("2024-01-01", "2024-01-31").unwrap();
    let descriptions: Vec<&str> = report
        .transactions
        .iter()
        .map(|t| t.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["earliest", "first", "second"]);
}

#[test]
fn test_query_range_skips_malformed_rows() {
    let (dir, ledger) = temp_ledger();
    fs::write(
        dir.path().join(crate::store::TRANSACTIONS_FILE),
        "date,amount,type,category,description\n\
         2024-01-05,100,Expense,Food,ok\n\
         2024-01-06,garbage,Expense,Food,bad\n\
         2024-01-07,25,Income,Salary,ok\n",
    )
    .unwrap();

    let report = ledger.query_range("2024-01-01", "2024-01-31").unwrap();
    assert_eq!(report.transactions.len(), 2);
    assert_eq!(report.total_expense, dec!(100));
    assert_eq!(report.total_income, dec!(25));
}

#[test]
fn test_query_range_missing_transactions_file() {
    let dir = tempfile::tempdir().unwrap();
    // No init: the collection genuinely does not exist.
    let ledger = Ledger::new(Store::new(dir.path()));
    assert!(matches!(
        ledger.query_range("2024-01-01", "2024-01-31"),
        Err(LedgerError::StorageUnavailable(_))
    ));
}

#[test]
fn test_amount_precision_survives_roundtrip() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-05", "0.10", "Expense", "Food", "")
        .unwrap();
    ledger
        .add_transaction("2024-01-05", "0.20", "Expense", "Food", "")
        .unwrap();
    let report = ledger.query_range("2024-01-01", "2024-01-31").unwrap();
    assert_eq!(report.total_expense, dec!(0.30));
}

// ── category_summary ──────────────────────────────────────────

#[test]
fn test_category_summary_amounts_and_percentages() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-05", "60", "Expense", "Food", "")
        .unwrap();
    ledger
        .add_transaction("2024-01-06", "40", "Expense", "Transport", "")
        .unwrap();
    ledger
        .add_transaction("2024-01-07", "500", "Income", "Salary", "")
        .unwrap();

    let summaries = ledger.category_summary().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].category, "Food");
    assert_eq!(summaries[0].amount, dec!(60));
    assert_eq!(summaries[0].percentage, dec!(60));
    assert_eq!(summaries[1].category, "Transport");
    assert_eq!(summaries[1].percentage, dec!(40));
}

#[test]
fn test_category_summary_totals_reconcile() {
    let (_dir, ledger) = temp_ledger();
    for (date, amount, category) in [
        ("2024-01-01", "12.75", "Food"),
        ("2024-01-02", "30", "Transport"),
        ("2024-01-03", "7.25", "Food"),
        ("2024-02-11", "19.99", "Games"),
    ] {
        ledger
            .add_transaction(date, amount, "Expense", category, "")
            .unwrap();
    }

    let summaries = ledger.category_summary().unwrap();
    let total: Decimal = summaries.iter().map(|s| s.amount).sum();
    assert_eq!(total, dec!(69.99));
    let percent_total: Decimal = summaries.iter().map(|s| s.percentage).sum();
    assert!((percent_total - Decimal::ONE_HUNDRED).abs() < dec!(0.0001));
}

#[test]
fn test_category_summary_blank_category_uses_sentinel() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-05", "10", "Expense", "", "")
        .unwrap();
    ledger
        .add_transaction("2024-01-06", "5", "Expense", "   ", "")
        .unwrap();

    let summaries = ledger.category_summary().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].category, "Uncategorized");
    assert_eq!(summaries[0].amount, dec!(15));
}

#[test]
fn test_category_summary_empty_ledger() {
    let (_dir, ledger) = temp_ledger();
    assert!(ledger.category_summary().unwrap().is_empty());
}

#[test]
fn test_category_summary_ignores_income() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-05", "1000", "Income", "Salary", "")
        .unwrap();
    assert!(ledger.category_summary().unwrap().is_empty());
}

// ── budget_usage ──────────────────────────────────────────────

#[test]
fn test_budget_usage_over_budget() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Food", "80").unwrap();
    ledger
        .add_transaction("2024-01-15", "100", "Expense", "Food", "")
        .unwrap();

    let usages = ledger.budget_usage(month("2024-01")).unwrap();
    assert_eq!(usages.len(), 1);
    let usage = &usages[0];
    assert_eq!(usage.spent, dec!(100));
    assert_eq!(usage.remaining(), dec!(-20));
    assert_eq!(usage.percentage_used(), dec!(125));
    assert!(usage.is_over_budget());
    assert!(usage.is_near_limit());
}

#[test]
fn test_budget_usage_near_limit_threshold() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Food", "100").unwrap();
    ledger
        .add_transaction("2024-01-15", "90", "Expense", "Food", "")
        .unwrap();

    let usages = ledger.budget_usage(month("2024-01")).unwrap();
    assert!(usages[0].is_near_limit());
    assert!(!usages[0].is_over_budget());
}

#[test]
fn test_budget_usage_under_threshold() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Food", "100").unwrap();
    ledger
        .add_transaction("2024-01-15", "89.99", "Expense", "Food", "")
        .unwrap();

    let usages = ledger.budget_usage(month("2024-01")).unwrap();
    assert!(!usages[0].is_near_limit());
}

#[test]
fn test_budget_usage_only_counts_target_month_expenses() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Food", "100").unwrap();
    ledger
        .add_transaction("2024-01-15", "30", "Expense", "Food", "")
        .unwrap();
    ledger
        .add_transaction("2024-02-15", "60", "Expense", "Food", "")
        .unwrap();
    ledger
        .add_transaction("2024-01-20", "500", "Income", "Food", "refund")
        .unwrap();

    let usages = ledger.budget_usage(month("2024-01")).unwrap();
    assert_eq!(usages[0].spent, dec!(30));
}

#[test]
fn test_budget_usage_includes_zero_spend_categories() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Food", "100").unwrap();
    ledger.upsert_budget("Rent", "1200").unwrap();
    ledger
        .add_transaction("2024-01-15", "50", "Expense", "Food", "")
        .unwrap();

    let usages = ledger.budget_usage(month("2024-01")).unwrap();
    assert_eq!(usages.len(), 2);
    assert_eq!(usages[0].category, "Food");
    assert_eq!(usages[1].category, "Rent");
    assert_eq!(usages[1].spent, Decimal::ZERO);
    assert_eq!(usages[1].remaining(), dec!(1200));
}

#[test]
fn test_budget_usage_sorted_by_utilization() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Food", "100").unwrap();
    ledger.upsert_budget("Transport", "100").unwrap();
    ledger
        .add_transaction("2024-01-10", "20", "Expense", "Food", "")
        .unwrap();
    ledger
        .add_transaction("2024-01-11", "80", "Expense", "Transport", "")
        .unwrap();

    let usages = ledger.budget_usage(month("2024-01")).unwrap();
    assert_eq!(usages[0].category, "Transport");
    assert_eq!(usages[1].category, "Food");
}

#[test]
fn test_budget_usage_empty_budgets_is_empty_result() {
    let (_dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-15", "100", "Expense", "Food", "")
        .unwrap();
    assert!(ledger.budget_usage(month("2024-01")).unwrap().is_empty());
}

#[test]
fn test_budget_usage_idempotent() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Food", "80").unwrap();
    ledger
        .add_transaction("2024-01-15", "100", "Expense", "Food", "")
        .unwrap();

    let first = ledger.budget_usage(month("2024-01")).unwrap();
    let second = ledger.budget_usage(month("2024-01")).unwrap();
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.category, b.category);
        assert_eq!(a.limit, b.limit);
        assert_eq!(a.spent, b.spent);
    }
}

#[test]
fn test_budget_usage_blank_category_expenses_hit_sentinel_budget() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Uncategorized", "50").unwrap();
    ledger
        .add_transaction("2024-01-15", "20", "Expense", "", "")
        .unwrap();

    let usages = ledger.budget_usage(month("2024-01")).unwrap();
    assert_eq!(usages[0].spent, dec!(20));
}

// ── export_range ──────────────────────────────────────────────

#[test]
fn test_export_range_matches_query() {
    let (dir, ledger) = temp_ledger();
    ledger
        .add_transaction("2024-01-10", "50", "Income", "Salary", "pay")
        .unwrap();
    ledger
        .add_transaction("2024-01-05", "100", "Expense", "Food", "groceries")
        .unwrap();
    ledger
        .add_transaction("2024-03-01", "10", "Expense", "Food", "outside range")
        .unwrap();

    let dest = dir.path().join("report.csv");
    let count = ledger
        .export_range("2024-01-01", "2024-01-31", &dest)
        .unwrap();
    assert_eq!(count, 2);

    // Re-reading the export yields the same record set as the query.
    let mut reader = csv::Reader::from_path(&dest).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "2024-01-05");
    assert_eq!(&rows[0][4], "groceries");
    assert_eq!(&rows[1][0], "2024-01-10");
}

#[test]
fn test_export_range_empty_match_is_success() {
    let (dir, ledger) = temp_ledger();
    let dest = dir.path().join("report.csv");
    let count = ledger
        .export_range("2024-01-01", "2024-01-31", &dest)
        .unwrap();
    assert_eq!(count, 0);
    assert!(dest.exists());
}

#[test]
fn test_export_range_rejects_reversed_bounds() {
    let (dir, ledger) = temp_ledger();
    let dest = dir.path().join("report.csv");
    assert!(ledger
        .export_range("2024-02-01", "2024-01-01", &dest)
        .is_err());
    assert!(!dest.exists());
}

// ── budgets ───────────────────────────────────────────────────

#[test]
fn test_upsert_budget_validation() {
    let (_dir, ledger) = temp_ledger();
    assert!(matches!(
        ledger.upsert_budget("   ", "100"),
        Err(LedgerError::BlankCategory)
    ));
    assert!(matches!(
        ledger.upsert_budget("Food", "0"),
        Err(LedgerError::NonPositiveAmount)
    ));
    assert!(matches!(
        ledger.upsert_budget("Food", "-10"),
        Err(LedgerError::NonPositiveAmount)
    ));
    assert!(matches!(
        ledger.upsert_budget("Food", "plenty"),
        Err(LedgerError::InvalidAmount(_))
    ));
}

#[test]
fn test_upsert_budget_last_write_wins() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Food", "100").unwrap();
    ledger.upsert_budget("Food", "250").unwrap();

    let budgets = ledger.list_budgets().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].limit, dec!(250));
}

#[test]
fn test_upsert_budget_is_case_sensitive() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Food", "100").unwrap();
    ledger.upsert_budget("food", "50").unwrap();

    let budgets = ledger.list_budgets().unwrap();
    assert_eq!(budgets.len(), 2);
}

#[test]
fn test_list_budgets_sorted_by_category() {
    let (_dir, ledger) = temp_ledger();
    ledger.upsert_budget("Transport", "100").unwrap();
    ledger.upsert_budget("Food", "200").unwrap();

    let budgets = ledger.list_budgets().unwrap();
    let names: Vec<&str> = budgets.iter().map(|b| b.category.as_str()).collect();
    assert_eq!(names, vec!["Food", "Transport"]);
}

#[test]
fn test_list_budgets_empty() {
    let (_dir, ledger) = temp_ledger();
    assert!(ledger.list_budgets().unwrap().is_empty());
}
