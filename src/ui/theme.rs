use ratatui::style::{Color, Modifier, Style};

pub(crate) const BAR_BG: Color = Color::Rgb(40, 40, 40);
pub(crate) const PANEL: Color = Color::Rgb(60, 56, 54);
pub(crate) const BORDER: Color = Color::Rgb(102, 92, 84);
pub(crate) const TEXT: Color = Color::Rgb(235, 219, 178);
pub(crate) const MUTED: Color = Color::Rgb(146, 131, 116);
pub(crate) const ACCENT: Color = Color::Rgb(131, 165, 152);
pub(crate) const GREEN: Color = Color::Rgb(184, 187, 38);
pub(crate) const RED: Color = Color::Rgb(251, 73, 52);
pub(crate) const YELLOW: Color = Color::Rgb(250, 189, 47);

pub(crate) fn title_style() -> Style {
    Style::default().fg(MUTED).add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(BAR_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub(crate) fn income_style() -> Style {
    Style::default().fg(GREEN)
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(MUTED).bg(PANEL)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(BAR_BG)
}
