use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::entry::EntryState;

use super::app::{App, FormField};
use super::{dashboard, entry_view};

pub(super) fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.pump_net_events();

        terminal.draw(|frame| {
            let authenticated = app
                .session
                .as_ref()
                .is_some_and(|s| s.is_authenticated() && app.entry.is_none());
            if authenticated {
                dashboard::draw(frame, app);
            } else {
                entry_view::draw(frame, app);
            }
        })?;

        if app.quit {
            return Ok(());
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key);
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // The assertion prompt is modal over the selection screen.
    if app.assertion_input.is_some() {
        handle_assertion_key(app, key);
        return;
    }

    let entry_state = app.entry.as_ref().map(|f| f.state());
    match entry_state {
        Some(EntryState::SelectingMode) => handle_selection_key(app, key),
        Some(EntryState::CredentialEntry(_)) => handle_form_key(app, key),
        Some(EntryState::ExchangePending) => {
            if key.code == KeyCode::Char('q') {
                app.quit = true;
            }
        }
        Some(EntryState::Authenticated) | None => handle_dashboard_key(app, key),
    }
}

fn handle_selection_key(app: &mut App, key: KeyEvent) {
    let Some(flow) = app.entry.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Left => flow.cycle_account_type(false),
        KeyCode::Right => flow.cycle_account_type(true),
        KeyCode::Char('l') | KeyCode::Enter => flow.choose_login(),
        KeyCode::Char('r') => flow.choose_register(),
        KeyCode::Char('g') => app.assertion_input = Some(super::input::Input::default()),
        KeyCode::Char('q') => app.quit = true,
        _ => {}
    }
}

fn handle_assertion_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.assertion_input = None,
        KeyCode::Enter => app.submit_assertion(),
        KeyCode::Backspace => {
            if let Some(input) = app.assertion_input.as_mut() {
                input.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(input) = app.assertion_input.as_mut() {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = app.assertion_input.as_mut() {
                input.move_right();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.assertion_input.as_mut() {
                input.insert_char(c);
            }
        }
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    // Ctrl+R flips login/register; the email survives, the password does
    // not.
    if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
        if let Some(flow) = app.entry.as_mut() {
            flow.toggle_mode();
        }
        app.password_input.clear();
        return;
    }

    match key.code {
        KeyCode::Esc => {
            if let Some(flow) = app.entry.as_mut() {
                flow.back();
                if flow.state() == EntryState::SelectingMode {
                    app.email_input.clear();
                    app.password_input.clear();
                    app.focus = FormField::Email;
                }
            }
        }
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                FormField::Email => FormField::Password,
                FormField::Password => FormField::Email,
            };
        }
        KeyCode::Enter => app.submit_entry_form(),
        KeyCode::Backspace => active_input(app).backspace(),
        KeyCode::Left => active_input(app).move_left(),
        KeyCode::Right => active_input(app).move_right(),
        KeyCode::Char(c) => active_input(app).insert_char(c),
        _ => {}
    }
}

fn active_input(app: &mut App) -> &mut super::input::Input {
    match app.focus {
        FormField::Email => &mut app.email_input,
        FormField::Password => &mut app.password_input,
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Char('x') => app.logout(),
        KeyCode::Char('r') => app.kick_resolution(),
        _ => {}
    }
}
