use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{LedgerError, Result};
use crate::models::Transaction;
use crate::validate;

pub(crate) const TRANSACTIONS_FILE: &str = "transactions.csv";
pub(crate) const BUDGETS_FILE: &str = "budgets.csv";

const TRANSACTION_HEADER: [&str; 5] = ["date", "amount", "type", "category", "description"];
const BUDGET_HEADER: [&str; 2] = ["category", "budget"];

/// Flat-file record store: one CSV per collection, header row mandatory.
///
/// Writes go straight to disk with no buffering beyond the operation. A
/// failure mid-write can leave the file truncated; there is no recovery
/// beyond re-running the operation.
pub(crate) struct Store {
    transactions_path: PathBuf,
    budgets_path: PathBuf,
}

impl Store {
    pub(crate) fn new(data_dir: &Path) -> Self {
        Self {
            transactions_path: data_dir.join(TRANSACTIONS_FILE),
            budgets_path: data_dir.join(BUDGETS_FILE),
        }
    }

    /// Create any missing record file with its header row.
    pub(crate) fn init(&self) -> Result<()> {
        if !self.transactions_path.exists() {
            write_header(&self.transactions_path, &TRANSACTION_HEADER)?;
        }
        if !self.budgets_path.exists() {
            write_header(&self.budgets_path, &BUDGET_HEADER)?;
        }
        Ok(())
    }

    // ── Transactions ──────────────────────────────────────────

    /// All parseable transactions, in file order.
    ///
    /// Malformed rows are warned and skipped so one corrupt row never
    /// blocks reporting. A missing file is an error: queries need the
    /// collection to exist.
    pub(crate) fn load_transactions(&self) -> Result<Vec<Transaction>> {
        if !self.transactions_path.exists() {
            return Err(LedgerError::StorageUnavailable(
                self.transactions_path.clone(),
            ));
        }
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.transactions_path)
            .map_err(|source| read_err(&self.transactions_path, source))?;

        let mut transactions = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let line = idx + 2; // header is line 1
            match result {
                Ok(record) => match validate::parse_transaction_row(&record) {
                    Ok(txn) => transactions.push(txn),
                    Err(err) => warn!(line, %err, "skipping malformed transaction row"),
                },
                Err(err) => warn!(line, %err, "skipping unreadable transaction row"),
            }
        }
        Ok(transactions)
    }

    /// Append one transaction, creating the file (with header) if absent.
    pub(crate) fn append_transaction(&self, txn: &Transaction) -> Result<()> {
        let new_file = !self.transactions_path.exists();
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.transactions_path)
            .map_err(|source| write_err(&self.transactions_path, source.into()))?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if new_file {
            writer
                .write_record(TRANSACTION_HEADER)
                .map_err(|source| write_err(&self.transactions_path, source))?;
        }
        writer
            .write_record(transaction_record(txn))
            .map_err(|source| write_err(&self.transactions_path, source))?;
        writer
            .flush()
            .map_err(|source| write_err(&self.transactions_path, source.into()))?;
        Ok(())
    }

    /// Write a transaction subset as a transactions-shaped CSV report.
    pub(crate) fn write_report(&self, path: &Path, transactions: &[Transaction]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path).map_err(|source| write_err(path, source))?;
        writer
            .write_record(TRANSACTION_HEADER)
            .map_err(|source| write_err(path, source))?;
        for txn in transactions {
            writer
                .write_record(transaction_record(txn))
                .map_err(|source| write_err(path, source))?;
        }
        writer
            .flush()
            .map_err(|source| write_err(path, source.into()))?;
        Ok(())
    }

    // ── Budgets ───────────────────────────────────────────────

    /// Category → monthly limit. A missing budgets file is an empty
    /// collection, not an error; malformed rows are warned and skipped.
    pub(crate) fn load_budgets(&self) -> Result<BTreeMap<String, Decimal>> {
        let mut budgets = BTreeMap::new();
        if !self.budgets_path.exists() {
            return Ok(budgets);
        }
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.budgets_path)
            .map_err(|source| read_err(&self.budgets_path, source))?;

        for (idx, result) in reader.records().enumerate() {
            let line = idx + 2;
            match result {
                Ok(record) => match validate::parse_budget_row(&record) {
                    Ok((category, limit)) => {
                        budgets.insert(category, limit);
                    }
                    Err(err) => warn!(line, %err, "skipping malformed budget row"),
                },
                Err(err) => warn!(line, %err, "skipping unreadable budget row"),
            }
        }
        Ok(budgets)
    }

    /// Overwrite the whole budgets file: header plus one row per entry,
    /// sorted by category.
    pub(crate) fn rewrite_budgets(&self, budgets: &BTreeMap<String, Decimal>) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.budgets_path)
            .map_err(|source| write_err(&self.budgets_path, source))?;
        writer
            .write_record(BUDGET_HEADER)
            .map_err(|source| write_err(&self.budgets_path, source))?;
        for (category, limit) in budgets {
            let amount = limit.to_string();
            writer
                .write_record([category.as_str(), amount.as_str()])
                .map_err(|source| write_err(&self.budgets_path, source))?;
        }
        writer
            .flush()
            .map_err(|source| write_err(&self.budgets_path, source.into()))?;
        Ok(())
    }
}

fn transaction_record(txn: &Transaction) -> [String; 5] {
    [
        txn.date.format("%Y-%m-%d").to_string(),
        txn.amount.to_string(),
        txn.kind.as_str().to_string(),
        txn.category.clone(),
        txn.description.clone(),
    ]
}

fn write_header(path: &Path, header: &[&str]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| write_err(path, source))?;
    writer
        .write_record(header)
        .map_err(|source| write_err(path, source))?;
    writer
        .flush()
        .map_err(|source| write_err(path, source.into()))?;
    Ok(())
}

fn read_err(path: &Path, source: csv::Error) -> LedgerError {
    LedgerError::StorageRead {
        path: path.to_path_buf(),
        source,
    }
}

fn write_err(path: &Path, source: csv::Error) -> LedgerError {
    LedgerError::StorageWrite {
        path: path.to_path_buf(),
        source,
    }
}
