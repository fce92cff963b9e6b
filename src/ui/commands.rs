use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::run::cli::shellexpand;
use crate::validate;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &Ledger) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit TallyBook", cmd_quit, r);
    register_command!("quit", "Quit TallyBook", cmd_quit, r);
    register_command!("o", "Go to Overview", cmd_overview, r);
    register_command!("overview", "Go to Overview", cmd_overview, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("c", "Go to Categories", cmd_categories, r);
    register_command!("categories", "Go to Categories", cmd_categories, r);
    register_command!("b", "Go to Budgets", cmd_budgets, r);
    register_command!("budgets", "Go to Budgets", cmd_budgets, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Record a transaction (e.g. :add 2024-01-15 42.50 Expense Food lunch)",
        cmd_add,
        r
    );
    register_command!(
        "budget",
        "Set a monthly budget (e.g. :budget Food 500)",
        cmd_budget,
        r
    );
    register_command!(
        "month",
        "Set tracked month (e.g. :month 2024-01)",
        cmd_month,
        r
    );
    register_command!("m", "Set tracked month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "range",
        "Set transaction range (e.g. :range 2024-01-01 2024-01-31)",
        cmd_range,
        r
    );
    register_command!(
        "export",
        "Export a range to CSV (e.g. :export 2024-01-01 2024-01-31 ~/jan.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, ledger)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _ledger: &Ledger) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_overview(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Overview;
    app.refresh_overview(ledger)?;
    app.refresh_budgets(ledger)?;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh_transactions(ledger)?;
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Categories;
    app.refresh_categories(ledger)?;
    Ok(())
}

fn cmd_budgets(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.screen = Screen::Budgets;
    app.refresh_budgets(ledger)?;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _ledger: &Ledger) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    let fields: Vec<&str> = args.splitn(5, ' ').collect();
    if fields.len() < 4 {
        app.set_status("Usage: :add <date> <amount> <Income|Expense> <category> [description]");
        return Ok(());
    }
    let description = fields.get(4).copied().unwrap_or("");

    match ledger.add_transaction(fields[0], fields[1], fields[2], fields[3], description) {
        Ok(txn) => {
            app.set_status(format!(
                "Recorded {} of {} in {}",
                txn.kind,
                super::util::format_amount(txn.amount),
                txn.category_label()
            ));
            app.refresh_all(ledger)?;
        }
        Err(err) => app.set_status(format!("Error: {err}")),
    }
    Ok(())
}

fn cmd_budget(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    // Last token is the amount so category names may contain spaces.
    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :budget <category> <amount>");
        return Ok(());
    }
    let (amount, category) = (parts[0], parts[1]);

    match ledger.upsert_budget(category, amount) {
        Ok(budget) => {
            app.set_status(format!(
                "Budget for {} set to {}",
                budget.category,
                super::util::format_amount(budget.limit)
            ));
            app.refresh_budgets(ledger)?;
        }
        Err(err) => app.set_status(format!("Error: {err}")),
    }
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    match validate::parse_month(args) {
        Ok(month) => app.set_month(month, ledger)?,
        Err(LedgerError::InvalidMonth(_)) => {
            app.set_status("Invalid month format. Use YYYY-MM (e.g. 2024-01)");
        }
        Err(err) => app.set_status(format!("Error: {err}")),
    }
    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.set_month(app.month.next(), ledger)
}

fn cmd_prev_month(_args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    app.set_month(app.month.prev(), ledger)
}

fn cmd_range(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 2 {
        app.set_status("Usage: :range <start> <end> (YYYY-MM-DD)");
        return Ok(());
    }
    let bounds = validate::parse_date(parts[0]).and_then(|s| {
        let e = validate::parse_date(parts[1])?;
        Ok((s, e))
    });
    match bounds {
        Ok((start, end)) if start <= end => {
            app.screen = Screen::Transactions;
            app.set_range(start, end, ledger)?;
        }
        Ok((start, end)) => {
            app.set_status(format!("Start {start} is after end {end}"));
        }
        Err(err) => app.set_status(format!("Error: {err}")),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, ledger: &Ledger) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() < 2 {
        app.set_status("Usage: :export <start> <end> [path]");
        return Ok(());
    }
    let destination = parts
        .get(2)
        .map(|p| shellexpand(p))
        .unwrap_or_else(|| format!("report_{}_to_{}.csv", parts[0], parts[1]));

    match ledger.export_range(parts[0], parts[1], Path::new(&destination)) {
        Ok(0) => app.set_status(format!("Nothing to export; wrote empty report to {destination}")),
        Ok(count) => app.set_status(format!("Exported {count} transactions to {destination}")),
        Err(err) => app.set_status(format!("Error: {err}")),
    }
    Ok(())
}
