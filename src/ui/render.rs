use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), theme::muted_style()),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(format!("{num}:{s}"), theme::muted_style()))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::BORDER)))
        .style(Style::default().bg(theme::BAR_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Overview => super::screens::overview::render(f, area, app),
        Screen::Transactions => super::screens::transactions::render(f, area, app),
        Screen::Categories => super::screens::categories::render(f, area, app),
        Screen::Budgets => super::screens::budgets::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::BAR_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Command => Style::default()
            .fg(theme::BAR_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
    };

    let info = format!(" {} | {} ", app.screen, app.month);

    let right = match app.screen {
        Screen::Overview => " H/L month | :add | ? help ",
        Screen::Transactions => " j/k scroll | :range | :export | ? help ",
        Screen::Categories => " j/k scroll | ? help ",
        Screen::Budgets => " H/L month | :budget | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => Line::from(vec![
            Span::styled(":", Style::default().fg(theme::ACCENT)),
            Span::styled(&app.command_input, theme::command_bar_style()),
            Span::styled("█", Style::default().fg(theme::MUTED)),
        ]),
        InputMode::Normal => Line::from(Span::styled(
            app.status_message.as_str(),
            theme::muted_style(),
        )),
    };
    f.render_widget(
        Paragraph::new(content).style(theme::command_bar_style()),
        area,
    );
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let width = area.width.min(64);
    let height = area.height.min((commands::COMMANDS.len() as u16 / 2) + 10);
    let popup = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Keys",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from("  1-4 / Tab   switch screen"),
        Line::from("  j/k         move selection"),
        Line::from("  H/L         previous / next month"),
        Line::from("  :           command mode"),
        Line::from("  Ctrl-q      quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Commands",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    let mut names: Vec<&&str> = commands::COMMANDS.keys().filter(|k| k.len() > 1).collect();
    names.sort();
    for name in names {
        if let Some(cmd) = commands::COMMANDS.get(*name) {
            lines.push(Line::from(format!("  :{name:<12} {}", cmd.description)));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        theme::muted_style(),
    )));

    f.render_widget(Clear, popup);
    let help = Paragraph::new(lines).style(theme::normal_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .title(Span::styled(" Help ", theme::title_style())),
    );
    f.render_widget(help, popup);
}
