mod budget;
mod month;
mod transaction;

pub(crate) use budget::Budget;
pub(crate) use month::Month;
pub(crate) use transaction::{Kind, Transaction, UNCATEGORIZED};

#[cfg(test)]
mod tests;
