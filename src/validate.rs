use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};
use crate::models::{Kind, Month, Transaction};

#[allow(clippy::expect_used)]
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern"));

#[allow(clippy::expect_used)]
static MONTH_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("month pattern"));

/// Parse an exact `YYYY-MM-DD` date. Zero-padding is required, so
/// `2024-1-5` is rejected even though chrono would accept it; calendar
/// validity (month lengths, leap days) is enforced by chrono.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    if !DATE_SHAPE.is_match(s) {
        return Err(LedgerError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| LedgerError::InvalidDate(s.to_string()))
}

/// Parse an exact `YYYY-MM` month, month 01-12.
pub(crate) fn parse_month(s: &str) -> Result<Month> {
    if !MONTH_SHAPE.is_match(s) {
        return Err(LedgerError::InvalidMonth(s.to_string()));
    }
    let (year, month) = s.split_at(4);
    let year = year
        .parse()
        .map_err(|_| LedgerError::InvalidMonth(s.to_string()))?;
    let month = month[1..]
        .parse()
        .map_err(|_| LedgerError::InvalidMonth(s.to_string()))?;
    Ok(Month { year, month })
}

/// Parse a decimal amount. Sign and magnitude are not checked here;
/// callers that require a positive amount enforce that themselves.
pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    Decimal::from_str(s.trim()).map_err(|_| LedgerError::InvalidAmount(s.to_string()))
}

/// Parse a transaction kind. Exactly the two canonical labels are
/// accepted, case-sensitive.
pub(crate) fn parse_kind(s: &str) -> Result<Kind> {
    match s {
        "Income" => Ok(Kind::Income),
        "Expense" => Ok(Kind::Expense),
        other => Err(LedgerError::InvalidKind(other.to_string())),
    }
}

/// Parse one raw transaction row (`date, amount, type, category,
/// description`) into a typed record. Bulk loads skip rows this rejects.
pub(crate) fn parse_transaction_row(record: &csv::StringRecord) -> Result<Transaction> {
    let date = parse_date(record.get(0).unwrap_or(""))?;
    let amount = parse_amount(record.get(1).unwrap_or(""))?;
    let kind = parse_kind(record.get(2).unwrap_or(""))?;
    let category = record.get(3).unwrap_or("").to_string();
    let description = record.get(4).unwrap_or("").to_string();
    Ok(Transaction {
        date,
        amount,
        kind,
        category,
        description,
    })
}

/// Parse one raw budget row (`category, budget`).
pub(crate) fn parse_budget_row(record: &csv::StringRecord) -> Result<(String, Decimal)> {
    let category = record.get(0).unwrap_or("").to_string();
    let limit = parse_amount(record.get(1).unwrap_or(""))?;
    Ok((category, limit))
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
