use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, meter, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.summaries.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded", theme::muted_style())),
        ])
        .centered()
        .block(block(app));
        f.render_widget(msg, area);
        return;
    }

    let page = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .summaries
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(page)
        .map(|(i, summary)| {
            let ratio = (summary.percentage / rust_decimal::Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0);
            let row_style = if i == app.category_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<20}", truncate(&summary.category, 19)),
                    row_style,
                ),
                Span::styled(
                    format!("{:>12} ", format_amount(summary.amount)),
                    theme::expense_style(),
                ),
                Span::styled(meter(ratio, 24), Style::default().fg(theme::ACCENT)),
                Span::styled(
                    format!(" {:>5.1}%", summary.percentage),
                    theme::muted_style(),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block(app)), area);
}

fn block(app: &App) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(
            format!(" Expenses by category ({}) ", app.summaries.len()),
            theme::title_style(),
        ))
}
