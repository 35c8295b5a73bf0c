//! Event handling for TUI
//!
//! Keys are routed by screen first, then by the focused area on the main
//! screen.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::interfaces::tui::app::{App, CurrentScreen, Focus};

/// Handle keyboard input; returns `true` when the app should exit
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> std::io::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.current_screen {
        CurrentScreen::Main => handle_main_screen(app, key.code),
        CurrentScreen::DeleteConfirm => handle_delete_confirm_screen(app, key.code),
        CurrentScreen::Help => handle_help_screen(app, key.code),
        CurrentScreen::Exiting => handle_exiting_screen(app, key.code),
    }
}

fn handle_main_screen(app: &mut App, key_code: KeyCode) -> std::io::Result<bool> {
    match key_code {
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return Ok(false);
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return Ok(false);
        }
        _ => {}
    }

    match app.focus {
        Focus::Url => handle_url_input(app, key_code),
        Focus::Expiration => handle_expiration_selector(app, key_code),
        Focus::List => handle_link_list(app, key_code),
    }
    Ok(false)
}

fn handle_url_input(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc => app.focus = Focus::List,
        KeyCode::Backspace => app.form.pop_char(),
        KeyCode::Char(c) => app.form.push_char(c),
        _ => {}
    }
}

fn handle_expiration_selector(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Enter => app.submit_form(),
        KeyCode::Esc => app.focus = Focus::List,
        KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') | KeyCode::Char('l') => {
            app.form.cycle_expiration(true)
        }
        KeyCode::Left | KeyCode::Up | KeyCode::Char('h') => app.form.cycle_expiration(false),
        _ => {}
    }
}

fn handle_link_list(app: &mut App, key_code: KeyCode) {
    match key_code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => app.move_selection_down(),
        KeyCode::Home | KeyCode::Char('g') => app.jump_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.jump_to_bottom(),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('i') => {
            app.focus = Focus::Url;
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.begin_delete(),
        // Copy to clipboard
        KeyCode::Char('y') | KeyCode::Char('c') => app.copy_selected_link(),
        KeyCode::Char('?') => app.current_screen = CurrentScreen::Help,
        KeyCode::Esc => app.clear_messages(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.current_screen = CurrentScreen::Exiting,
        _ => {}
    }
}

fn handle_delete_confirm_screen(app: &mut App, key_code: KeyCode) -> std::io::Result<bool> {
    match key_code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
        _ => {}
    }
    Ok(false)
}

fn handle_help_screen(app: &mut App, key_code: KeyCode) -> std::io::Result<bool> {
    if matches!(
        key_code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')
    ) {
        app.current_screen = CurrentScreen::Main;
    }
    Ok(false)
}

fn handle_exiting_screen(app: &mut App, key_code: KeyCode) -> std::io::Result<bool> {
    match key_code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') => Ok(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.current_screen = CurrentScreen::Main;
            Ok(false)
        }
        _ => Ok(false),
    }
}
