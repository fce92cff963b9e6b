use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Fallback label substituted for blank categories in summaries.
pub(crate) const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ledger entry. Immutable once appended to the store.
#[derive(Debug, Clone)]
pub(crate) struct Transaction {
    pub(crate) date: NaiveDate,
    pub(crate) amount: Decimal,
    pub(crate) kind: Kind,
    /// Stored verbatim; may be blank.
    pub(crate) category: String,
    pub(crate) description: String,
}

impl Transaction {
    pub(crate) fn is_income(&self) -> bool {
        self.kind == Kind::Income
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.kind == Kind::Expense
    }

    /// Category as shown in summaries: a blank value collapses to
    /// [`UNCATEGORIZED`]. The stored value is never rewritten.
    pub(crate) fn category_label(&self) -> &str {
        if self.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            &self.category
        }
    }
}
