use anyhow::Result;
use chrono::{Days, NaiveDate};

use crate::ledger::{BudgetUsage, CategorySummary, Ledger, RangeReport};
use crate::models::Month;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Overview,
    Transactions,
    Categories,
    Budgets,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Overview,
            Self::Transactions,
            Self::Categories,
            Self::Budgets,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "Overview"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Categories => write!(f, "Categories"),
            Self::Budgets => write!(f, "Budgets"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    /// Month shown on Overview and Budgets.
    pub(crate) month: Month,
    /// Range shown on Transactions.
    pub(crate) range_start: NaiveDate,
    pub(crate) range_end: NaiveDate,

    pub(crate) month_report: Option<RangeReport>,
    pub(crate) range_report: Option<RangeReport>,
    pub(crate) summaries: Vec<CategorySummary>,
    pub(crate) usages: Vec<BudgetUsage>,

    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,
    pub(crate) budget_index: usize,
    pub(crate) budget_scroll: usize,

    // Updated each render frame from the terminal height.
    pub(crate) visible_rows: usize,
}

impl App {
    /// `today` seeds the default month and the default 30-day range; the
    /// caller reads the clock once so everything after stays data-driven.
    pub(crate) fn new(today: NaiveDate) -> Self {
        Self {
            running: true,
            screen: Screen::Overview,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            month: Month::from_date(today),
            range_start: today.checked_sub_days(Days::new(30)).unwrap_or(today),
            range_end: today,

            month_report: None,
            range_report: None,
            summaries: Vec::new(),
            usages: Vec::new(),

            transaction_index: 0,
            transaction_scroll: 0,
            category_index: 0,
            category_scroll: 0,
            budget_index: 0,
            budget_scroll: 0,

            visible_rows: 1,
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn refresh_all(&mut self, ledger: &Ledger) -> Result<()> {
        self.refresh_overview(ledger)?;
        self.refresh_transactions(ledger)?;
        self.refresh_categories(ledger)?;
        self.refresh_budgets(ledger)?;
        Ok(())
    }

    pub(crate) fn refresh_overview(&mut self, ledger: &Ledger) -> Result<()> {
        self.month_report =
            Some(ledger.query_range_dates(self.month.first_day(), self.month.last_day())?);
        Ok(())
    }

    pub(crate) fn refresh_transactions(&mut self, ledger: &Ledger) -> Result<()> {
        let report = ledger.query_range_dates(self.range_start, self.range_end)?;
        if self.transaction_index >= report.transactions.len() {
            self.transaction_index = report.transactions.len().saturating_sub(1);
            self.transaction_scroll = self.transaction_scroll.min(self.transaction_index);
        }
        self.range_report = Some(report);
        Ok(())
    }

    pub(crate) fn refresh_categories(&mut self, ledger: &Ledger) -> Result<()> {
        self.summaries = ledger.category_summary()?;
        if self.category_index >= self.summaries.len() {
            self.category_index = self.summaries.len().saturating_sub(1);
            self.category_scroll = self.category_scroll.min(self.category_index);
        }
        Ok(())
    }

    pub(crate) fn refresh_budgets(&mut self, ledger: &Ledger) -> Result<()> {
        self.usages = ledger.budget_usage(self.month)?;
        if self.budget_index >= self.usages.len() {
            self.budget_index = self.usages.len().saturating_sub(1);
            self.budget_scroll = self.budget_scroll.min(self.budget_index);
        }
        Ok(())
    }

    /// Switch the tracked month and reload everything month-scoped.
    pub(crate) fn set_month(&mut self, month: Month, ledger: &Ledger) -> Result<()> {
        self.month = month;
        self.refresh_overview(ledger)?;
        self.refresh_budgets(ledger)?;
        self.set_status(format!("Month: {month}"));
        Ok(())
    }

    /// Switch the transaction range and reload the listing.
    pub(crate) fn set_range(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        ledger: &Ledger,
    ) -> Result<()> {
        self.range_start = start;
        self.range_end = end;
        self.transaction_index = 0;
        self.transaction_scroll = 0;
        self.refresh_transactions(ledger)?;
        self.set_status(format!("Range: {start} to {end}"));
        Ok(())
    }
}
