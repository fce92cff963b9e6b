use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Failure modes of the ledger core.
///
/// Each public operation either succeeds or returns one of these.
/// Malformed rows encountered mid-scan are not represented here: they are
/// warned and skipped so one corrupt row never blocks reporting.
#[derive(Debug, Error)]
pub(crate) enum LedgerError {
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid month '{0}': expected YYYY-MM")]
    InvalidMonth(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    #[error("invalid transaction kind '{0}': expected 'Income' or 'Expense'")]
    InvalidKind(String),

    #[error("category must not be blank")]
    BlankCategory,

    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("transaction ledger not found at {}", .0.display())]
    StorageUnavailable(PathBuf),

    #[error("failed to read {}", .path.display())]
    StorageRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write {}", .path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;
