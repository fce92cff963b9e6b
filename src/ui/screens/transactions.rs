use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(report) = &app.range_report else {
        f.render_widget(Paragraph::new("(no data loaded)").block(block(app)), area);
        return;
    };

    if report.transactions.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions in this range",
                theme::muted_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Use :range <start> <end> to look elsewhere, :add to record one",
                theme::muted_style(),
            )),
        ])
        .centered()
        .block(block(app));
        f.render_widget(msg, area);
        return;
    }

    let page = area.height.saturating_sub(2) as usize;
    let desc_width = (area.width as usize).saturating_sub(58).max(8);

    let items: Vec<ListItem> = report
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(page)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let row_style = if i == app.transaction_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", txn.date), row_style),
                Span::styled(format!("{:<8}", txn.kind), theme::muted_style()),
                Span::styled(format!("{:>12} ", format_amount(txn.amount)), amount_style),
                Span::styled(
                    format!("{:<18}", truncate(txn.category_label(), 17)),
                    row_style,
                ),
                Span::styled(truncate(&txn.description, desc_width), theme::muted_style()),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block(app)), area);
}

fn block(app: &App) -> Block<'_> {
    let (count, income, expense) = match &app.range_report {
        Some(r) => (
            r.transactions.len(),
            format_amount(r.total_income),
            format_amount(r.total_expense),
        ),
        None => (0, String::new(), String::new()),
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(
            format!(
                " {} to {} — {count} rows, in {income} / out {expense} ",
                app.range_start, app.range_end
            ),
            theme::title_style(),
        ))
}
