use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::ledger::Ledger;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_up};

pub(crate) fn as_tui(ledger: &Ledger) -> Result<()> {
    let mut app = App::new(chrono::Local::now().date_naive());
    app.refresh_all(ledger)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &Ledger,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Tab, status and command bars plus the content borders.
            let content_height = f.area().height.saturating_sub(5) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Command => handle_command_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, ledger, Screen::Overview)?,
        KeyCode::Char('2') => switch_screen(app, ledger, Screen::Transactions)?,
        KeyCode::Char('3') => switch_screen(app, ledger, Screen::Categories)?,
        KeyCode::Char('4') => switch_screen(app, ledger, Screen::Budgets)?,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, ledger, screens[next])?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, ledger, screens[prev])?;
        }
        KeyCode::Char('H') => {
            commands::handle_command("prev-month", app, ledger)?;
        }
        KeyCode::Char('L') => {
            commands::handle_command("next-month", app, ledger)?;
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, ledger: &Ledger) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, ledger)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, ledger: &Ledger, screen: Screen) -> Result<()> {
    app.screen = screen;
    match screen {
        Screen::Overview => {
            app.refresh_overview(ledger)?;
            app.refresh_budgets(ledger)?;
        }
        Screen::Transactions => app.refresh_transactions(ledger)?,
        Screen::Categories => app.refresh_categories(ledger)?,
        Screen::Budgets => app.refresh_budgets(ledger)?,
    }
    Ok(())
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Transactions => {
            let len = app
                .range_report
                .as_ref()
                .map_or(0, |r| r.transactions.len());
            scroll_down(
                &mut app.transaction_index,
                &mut app.transaction_scroll,
                len,
                page,
            );
        }
        Screen::Categories => {
            scroll_down(
                &mut app.category_index,
                &mut app.category_scroll,
                app.summaries.len(),
                page,
            );
        }
        Screen::Budgets => {
            scroll_down(
                &mut app.budget_index,
                &mut app.budget_scroll,
                app.usages.len(),
                page,
            );
        }
        Screen::Overview => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        Screen::Categories => scroll_up(&mut app.category_index, &mut app.category_scroll),
        Screen::Budgets => scroll_up(&mut app.budget_index, &mut app.budget_scroll),
        Screen::Overview => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            app.transaction_index = 0;
            app.transaction_scroll = 0;
        }
        Screen::Categories => {
            app.category_index = 0;
            app.category_scroll = 0;
        }
        Screen::Budgets => {
            app.budget_index = 0;
            app.budget_scroll = 0;
        }
        Screen::Overview => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Transactions => {
            let len = app
                .range_report
                .as_ref()
                .map_or(0, |r| r.transactions.len());
            if len > 0 {
                app.transaction_index = len - 1;
                app.transaction_scroll = app.transaction_index.saturating_sub(page - 1);
            }
        }
        Screen::Categories => {
            if !app.summaries.is_empty() {
                app.category_index = app.summaries.len() - 1;
                app.category_scroll = app.category_index.saturating_sub(page - 1);
            }
        }
        Screen::Budgets => {
            if !app.usages.is_empty() {
                app.budget_index = app.usages.len() - 1;
                app.budget_scroll = app.budget_index.saturating_sub(page - 1);
            }
        }
        Screen::Overview => {}
    }
}
