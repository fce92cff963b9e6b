use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, meter, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    render_month_summary(f, chunks[0], app);
    render_budget_brief(f, chunks[1], app);
}

fn render_month_summary(f: &mut Frame, area: Rect, app: &App) {
    let lines = match &app.month_report {
        Some(report) => {
            let net = report.net_balance();
            let net_style = if net < rust_decimal::Decimal::ZERO {
                theme::expense_style()
            } else {
                theme::income_style()
            };
            vec![
                Line::from(""),
                Line::from(vec![
                    Span::styled("  Income    ", theme::muted_style()),
                    Span::styled(format_amount(report.total_income), theme::income_style()),
                ]),
                Line::from(vec![
                    Span::styled("  Expenses  ", theme::muted_style()),
                    Span::styled(format_amount(report.total_expense), theme::expense_style()),
                ]),
                Line::from(vec![
                    Span::styled("  Net       ", theme::muted_style()),
                    Span::styled(format_amount(net), net_style.add_modifier(Modifier::BOLD)),
                ]),
                Line::from(vec![
                    Span::styled("  Entries   ", theme::muted_style()),
                    Span::styled(
                        format!("{}", report.transactions.len()),
                        theme::normal_style(),
                    ),
                ]),
            ]
        }
        None => vec![Line::from(""), Line::from("  (no data loaded)")],
    };

    let summary = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .title(Span::styled(
                format!(" {} ", app.month),
                theme::title_style(),
            )),
    );
    f.render_widget(summary, area);
}

fn render_budget_brief(f: &mut Frame, area: Rect, app: &App) {
    if app.usages.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No budgets set", theme::muted_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Use :budget <category> <amount> to set a monthly limit",
                theme::muted_style(),
            )),
        ])
        .centered()
        .block(budget_block());
        f.render_widget(msg, area);
        return;
    }

    let rows = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .usages
        .iter()
        .take(rows)
        .map(|usage| {
            let ratio = ratio_of(usage);
            let color = usage_color(usage);
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<18}", truncate(&usage.category, 17)),
                    theme::normal_style(),
                ),
                Span::styled(meter(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>5.1}%  ", usage.percentage_used()),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(
                        "{} of {}",
                        format_amount(usage.spent),
                        format_amount(usage.limit)
                    ),
                    theme::muted_style(),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(budget_block()), area);
}

fn budget_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(" Budgets ", theme::title_style()))
}

pub(super) fn ratio_of(usage: &crate::ledger::BudgetUsage) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    if usage.limit.is_zero() {
        0.0
    } else {
        (usage.spent / usage.limit).to_f64().unwrap_or(0.0)
    }
}

pub(super) fn usage_color(usage: &crate::ledger::BudgetUsage) -> ratatui::style::Color {
    if usage.is_over_budget() {
        theme::RED
    } else if usage.is_near_limit() {
        theme::YELLOW
    } else {
        theme::GREEN
    }
}
