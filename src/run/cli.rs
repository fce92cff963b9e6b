use std::path::Path;

use anyhow::Result;
use chrono::Local;

use crate::ledger::Ledger;
use crate::models::Month;
use crate::ui::util::format_amount;
use crate::validate;

pub(crate) fn as_cli(args: &[String], ledger: &Ledger) -> Result<()> {
    match args[1].as_str() {
        "add" => cli_add(&args[2..], ledger),
        "query" | "q" => cli_query(&args[2..], ledger),
        "list" => cli_list(ledger),
        "categories" | "cat" => cli_categories(ledger),
        "budget" => cli_budget(&args[2..], ledger),
        "budgets" => cli_budgets(ledger),
        "usage" | "u" => cli_usage(&args[2..], ledger),
        "export" => cli_export(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("tallybook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("TallyBook — flat-file income/expense ledger and budget tracker");
    println!();
    println!("Usage: tallybook [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                     Launch interactive TUI");
    println!("  add <date> <amount> <kind> <category> [description]");
    println!("                                             Record a transaction");
    println!("                                             (kind: Income | Expense)");
    println!("  query <start> <end>                        List transactions in a date range");
    println!("  list                                       List every transaction in file order");
    println!("  categories                                 Expense breakdown by category");
    println!("  budget <category> <amount>                 Set a monthly budget");
    println!("  budgets                                    List budgets");
    println!("  usage [YYYY-MM]                            Budget usage (default: current month)");
    println!("  export <start> <end> [path]                Export a date range to CSV");
    println!("  --help, -h                                 Show this help");
    println!("  --version, -V                              Show version");
    println!();
    println!("Dates are YYYY-MM-DD.");
}

fn cli_add(args: &[String], ledger: &Ledger) -> Result<()> {
    if args.len() < 4 {
        anyhow::bail!("Usage: tallybook add <date> <amount> <Income|Expense> <category> [description]");
    }
    let description = args.get(4).map(String::as_str).unwrap_or("");
    let txn = ledger.add_transaction(&args[0], &args[1], &args[2], &args[3], description)?;
    println!(
        "Recorded {} of {} in {} on {}",
        txn.kind,
        format_amount(txn.amount),
        txn.category_label(),
        txn.date
    );
    Ok(())
}

fn cli_query(args: &[String], ledger: &Ledger) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: tallybook query <start> <end>");
    }
    let report = ledger.query_range(&args[0], &args[1])?;

    println!("Transactions {} to {}", report.start, report.end);
    println!("{}", "─".repeat(72));
    if report.transactions.is_empty() {
        println!("  (no transactions in range)");
    }
    for txn in &report.transactions {
        println!(
            "  {} | {:<7} | {:>12} | {:<18} | {}",
            txn.date,
            txn.kind,
            format_amount(txn.amount),
            txn.category_label(),
            txn.description
        );
    }
    println!("{}", "─".repeat(72));
    println!("  Income:   {:>12}", format_amount(report.total_income));
    println!("  Expenses: {:>12}", format_amount(report.total_expense));
    println!("  Net:      {:>12}", format_amount(report.net_balance()));
    Ok(())
}

fn cli_list(ledger: &Ledger) -> Result<()> {
    let transactions = ledger.list_transactions()?;
    if transactions.is_empty() {
        println!("No transactions recorded");
        return Ok(());
    }
    for txn in &transactions {
        println!(
            "  {} | {:<7} | {:>12} | {:<18} | {}",
            txn.date,
            txn.kind,
            format_amount(txn.amount),
            txn.category_label(),
            txn.description
        );
    }
    println!("{}", "─".repeat(72));
    println!("  {} transactions", transactions.len());
    Ok(())
}

fn cli_categories(ledger: &Ledger) -> Result<()> {
    let summaries = ledger.category_summary()?;
    if summaries.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }

    let total: rust_decimal::Decimal = summaries.iter().map(|s| s.amount).sum();
    println!("Spending by category (total {})", format_amount(total));
    println!("{}", "─".repeat(52));
    for summary in &summaries {
        println!(
            "  {:<24} {:>12} ({:>5.1}%)",
            summary.category,
            format_amount(summary.amount),
            summary.percentage
        );
    }
    Ok(())
}

fn cli_budget(args: &[String], ledger: &Ledger) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: tallybook budget <category> <amount>");
    }
    let budget = ledger.upsert_budget(&args[0], &args[1])?;
    println!(
        "Budget for {} set to {}",
        budget.category,
        format_amount(budget.limit)
    );
    Ok(())
}

fn cli_budgets(ledger: &Ledger) -> Result<()> {
    let budgets = ledger.list_budgets()?;
    if budgets.is_empty() {
        println!("No budgets set");
        return Ok(());
    }

    println!("{:<24} Monthly limit", "Category");
    println!("{}", "─".repeat(40));
    for budget in &budgets {
        println!(
            "{:<24} {:>12}",
            budget.category,
            format_amount(budget.limit)
        );
    }
    Ok(())
}

fn cli_usage(args: &[String], ledger: &Ledger) -> Result<()> {
    let month = match args.first().filter(|a| !a.starts_with('-')) {
        Some(raw) => validate::parse_month(raw)?,
        None => Month::from_date(Local::now().date_naive()),
    };

    let usages = ledger.budget_usage(month)?;
    if usages.is_empty() {
        println!("No budgets set");
        return Ok(());
    }

    println!("Budget usage for {month}");
    println!("{}", "─".repeat(72));
    for usage in &usages {
        println!(
            "  {:<20} limit {:>10}  spent {:>10}  left {:>10}  {:>5.1}%",
            usage.category,
            format_amount(usage.limit),
            format_amount(usage.spent),
            format_amount(usage.remaining()),
            usage.percentage_used()
        );
        if usage.is_over_budget() {
            println!("  {:<20} ALERT: over budget", "");
        } else if usage.is_near_limit() {
            println!("  {:<20} Warning: 90% of budget used", "");
        }
    }
    Ok(())
}

fn cli_export(args: &[String], ledger: &Ledger) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: tallybook export <start> <end> [path]");
    }
    let start = &args[0];
    let end = &args[1];
    let destination = args
        .get(2)
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| format!("report_{start}_to_{end}.csv"));

    let count = ledger.export_range(start, end, Path::new(&destination))?;
    if count == 0 {
        println!("No transactions between {start} and {end}; wrote empty report to {destination}");
    } else {
        println!("Exported {count} transactions to {destination}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
