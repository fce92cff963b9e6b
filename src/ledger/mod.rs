use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};
use crate::models::{Budget, Kind, Month, Transaction};
use crate::store::Store;
use crate::validate;

const NEAR_LIMIT_PERCENT: Decimal = Decimal::from_parts(90, 0, 0, false, 0);

/// Date-range query result: the matching rows plus their totals.
#[derive(Debug, Clone)]
pub(crate) struct RangeReport {
    pub(crate) start: NaiveDate,
    pub(crate) end: NaiveDate,
    /// Sorted ascending by date; file order breaks ties.
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) total_income: Decimal,
    pub(crate) total_expense: Decimal,
}

impl RangeReport {
    pub(crate) fn net_balance(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

/// One category's share of total expenses.
#[derive(Debug, Clone)]
pub(crate) struct CategorySummary {
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    /// Share of all expenses, 0-100. Zero when there are no expenses.
    pub(crate) percentage: Decimal,
}

/// Spent-vs-limit for one budget entry in a target month.
#[derive(Debug, Clone)]
pub(crate) struct BudgetUsage {
    pub(crate) category: String,
    pub(crate) limit: Decimal,
    pub(crate) spent: Decimal,
}

impl BudgetUsage {
    pub(crate) fn remaining(&self) -> Decimal {
        self.limit - self.spent
    }

    pub(crate) fn percentage_used(&self) -> Decimal {
        if self.limit.is_zero() {
            Decimal::ZERO
        } else {
            self.spent / self.limit * Decimal::ONE_HUNDRED
        }
    }

    /// Spending has reached 90% of the limit.
    pub(crate) fn is_near_limit(&self) -> bool {
        self.percentage_used() >= NEAR_LIMIT_PERCENT
    }

    /// Spending exceeds the limit.
    pub(crate) fn is_over_budget(&self) -> bool {
        self.percentage_used() > Decimal::ONE_HUNDRED
    }
}

/// The query and aggregation engine behind every CLI and TUI operation.
///
/// Each method is a blocking read-then-compute(-then-write) sequence
/// returning a typed result. Nothing here reads the process clock; the
/// caller supplies "today" where a default month or range is wanted.
pub(crate) struct Ledger {
    store: Store,
}

impl Ledger {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Open the ledger rooted at `data_dir`, creating missing record
    /// files with their headers.
    pub(crate) fn open(data_dir: &Path) -> Result<Self> {
        let store = Store::new(data_dir);
        store.init()?;
        Ok(Self::new(store))
    }

    /// Validate and append one transaction. The category may be blank;
    /// it is stored verbatim and only summaries substitute the sentinel.
    pub(crate) fn add_transaction(
        &self,
        date: &str,
        amount: &str,
        kind: &str,
        category: &str,
        description: &str,
    ) -> Result<Transaction> {
        let date = validate::parse_date(date)?;
        let amount = validate::parse_amount(amount)?;
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        let kind = validate::parse_kind(kind)?;
        let txn = Transaction {
            date,
            amount,
            kind,
            category: category.to_string(),
            description: description.to_string(),
        };
        self.store.append_transaction(&txn)?;
        Ok(txn)
    }

    /// Transactions within `[start, end]` inclusive, with totals.
    pub(crate) fn query_range(&self, start: &str, end: &str) -> Result<RangeReport> {
        let start = validate::parse_date(start)?;
        let end = validate::parse_date(end)?;
        self.query_range_dates(start, end)
    }

    /// [`Self::query_range`] with already-validated bounds.
    pub(crate) fn query_range_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RangeReport> {
        if start > end {
            return Err(LedgerError::InvalidRange { start, end });
        }

        let mut transactions: Vec<Transaction> = self
            .store
            .load_transactions()?
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect();

        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        for txn in &transactions {
            match txn.kind {
                Kind::Income => total_income += txn.amount,
                Kind::Expense => total_expense += txn.amount,
            }
        }
        // Stable sort: same-day rows keep file order.
        transactions.sort_by_key(|t| t.date);

        Ok(RangeReport {
            start,
            end,
            transactions,
            total_income,
            total_expense,
        })
    }

    /// Every parseable transaction, in file order.
    pub(crate) fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.store.load_transactions()
    }

    /// Expense totals per category with each category's share of all
    /// expenses, largest first. Blank categories fold into the sentinel
    /// label; ties keep first-seen order.
    pub(crate) fn category_summary(&self) -> Result<Vec<CategorySummary>> {
        let transactions = self.store.load_transactions()?;

        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut totals: Vec<(String, Decimal)> = Vec::new();
        let mut grand_total = Decimal::ZERO;

        for txn in transactions.iter().filter(|t| t.is_expense()) {
            let label = txn.category_label();
            let idx = match seen.get(label) {
                Some(&idx) => idx,
                None => {
                    totals.push((label.to_string(), Decimal::ZERO));
                    seen.insert(label.to_string(), totals.len() - 1);
                    totals.len() - 1
                }
            };
            totals[idx].1 += txn.amount;
            grand_total += txn.amount;
        }

        let mut summaries: Vec<CategorySummary> = totals
            .into_iter()
            .map(|(category, amount)| {
                let percentage = if grand_total.is_zero() {
                    Decimal::ZERO
                } else {
                    amount / grand_total * Decimal::ONE_HUNDRED
                };
                CategorySummary {
                    category,
                    amount,
                    percentage,
                }
            })
            .collect();
        summaries.sort_by(|a, b| b.amount.cmp(&a.amount));
        Ok(summaries)
    }

    /// Spent-vs-limit for every budget entry in `month`, highest
    /// utilization first. Budgeted categories with no spending still
    /// appear, at zero.
    pub(crate) fn budget_usage(&self, month: Month) -> Result<Vec<BudgetUsage>> {
        let budgets = self.store.load_budgets()?;
        let transactions = self.store.load_transactions()?;

        let mut spent_by_category: HashMap<String, Decimal> = HashMap::new();
        for txn in transactions
            .iter()
            .filter(|t| t.is_expense() && month.contains(t.date))
        {
            *spent_by_category
                .entry(txn.category_label().to_string())
                .or_insert(Decimal::ZERO) += txn.amount;
        }

        let mut usages: Vec<BudgetUsage> = budgets
            .into_iter()
            .map(|(category, limit)| {
                let spent = spent_by_category
                    .get(&category)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                BudgetUsage {
                    category,
                    limit,
                    spent,
                }
            })
            .collect();
        usages.sort_by(|a, b| b.percentage_used().cmp(&a.percentage_used()));
        Ok(usages)
    }

    /// Run the range query and write the matching rows to `destination`
    /// in the transactions file shape. Returns the number of rows
    /// written; zero matches still writes a header-only report and
    /// succeeds.
    pub(crate) fn export_range(&self, start: &str, end: &str, destination: &Path) -> Result<usize> {
        let report = self.query_range(start, end)?;
        self.store.write_report(destination, &report.transactions)?;
        Ok(report.transactions.len())
    }

    /// Set or replace one category's monthly limit: load every entry,
    /// replace the one key, rewrite the whole file sorted by category.
    pub(crate) fn upsert_budget(&self, category: &str, limit: &str) -> Result<Budget> {
        if category.trim().is_empty() {
            return Err(LedgerError::BlankCategory);
        }
        let limit = validate::parse_amount(limit)?;
        if limit <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount);
        }
        let mut budgets = self.store.load_budgets()?;
        budgets.insert(category.to_string(), limit);
        self.store.rewrite_budgets(&budgets)?;
        Ok(Budget {
            category: category.to_string(),
            limit,
        })
    }

    /// All budget entries, sorted by category. No budgets file at all is
    /// simply an empty list.
    pub(crate) fn list_budgets(&self) -> Result<Vec<Budget>> {
        Ok(self
            .store
            .load_budgets()?
            .into_iter()
            .map(|(category, limit)| Budget { category, limit })
            .collect())
    }
}

#[cfg(test)]
mod tests;
