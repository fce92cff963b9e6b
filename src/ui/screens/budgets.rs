use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::overview::{ratio_of, usage_color};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, meter, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.usages.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No budgets set for this month",
                theme::muted_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Use :budget <category> <amount> to set a monthly limit",
                theme::muted_style(),
            )),
        ])
        .centered()
        .block(block(app));
        f.render_widget(msg, area);
        return;
    }

    let page = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .usages
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(page)
        .map(|(i, usage)| {
            let color = usage_color(usage);
            let row_style = if i == app.budget_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };

            let flag = if usage.is_over_budget() {
                " OVER"
            } else if usage.is_near_limit() {
                " 90%+"
            } else {
                ""
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<18}", truncate(&usage.category, 17)), row_style),
                Span::styled(
                    format!(
                        "{:>10} / {:>10}  left {:>10} ",
                        format_amount(usage.spent),
                        format_amount(usage.limit),
                        format_amount(usage.remaining()),
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(meter(ratio_of(usage), 16), Style::default().fg(color)),
                Span::styled(
                    format!(" {:>5.1}%", usage.percentage_used()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    flag,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
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
            format!(" Budgets for {} ", app.month),
            theme::title_style(),
        ))
}
