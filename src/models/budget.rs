use rust_decimal::Decimal;

/// A monthly spending limit for one category.
///
/// The category is the unique key, matched exactly (case-sensitive);
/// upserts replace the whole entry, last write wins.
#[derive(Debug, Clone)]
pub(crate) struct Budget {
    pub(crate) category: String,
    pub(crate) limit: Decimal,
}
