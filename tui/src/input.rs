//! Keyboard input handling.
//!
//! Drains the crossterm event queue without blocking and translates key
//! presses into engine calls. Returns whether the app should quit.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use parley_engine::{App, Route};

/// Drain pending input events. Non-blocking: returns immediately when the
/// queue is empty so the frame loop keeps its cadence.
pub fn handle_events(app: &mut App) -> Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()?
            && key.kind != KeyEventKind::Release
        {
            handle_key(app, key);
        }
    }
    Ok(app.should_quit())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl+C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.request_quit();
        return;
    }

    match app.route() {
        Route::SignIn => handle_sign_in_key(app, key),
        Route::Register => handle_register_key(app, key),
        Route::Chat => handle_chat_key(app, key),
    }
}

fn handle_sign_in_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('r') {
            app.show_register();
        }
        return;
    }
    match key.code {
        KeyCode::Tab | KeyCode::Down => app.sign_in_form_mut().focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.sign_in_form_mut().focus_prev(),
        KeyCode::Enter => app.submit_sign_in(),
        KeyCode::Backspace => app.sign_in_form_mut().focused_input().backspace(),
        KeyCode::Char(c) => app.sign_in_form_mut().focused_input().push(c),
        _ => {}
    }
}

fn handle_register_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return;
    }
    match key.code {
        KeyCode::Esc => app.show_sign_in(),
        KeyCode::Tab | KeyCode::Down => app.register_form_mut().focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.register_form_mut().focus_prev(),
        KeyCode::Enter => app.submit_register(),
        KeyCode::Backspace => app.register_form_mut().focused_input().backspace(),
        KeyCode::Char(c) => app.register_form_mut().focused_input().push(c),
        _ => {}
    }
}

fn handle_chat_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('n') => app.new_chat(),
            KeyCode::Char('o') => app.sign_out(),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Up => app.sidebar_prev(),
        KeyCode::Down => app.sidebar_next(),
        KeyCode::Tab => app.activate_selected(),
        KeyCode::Enter => app.send_message(),
        // The compose input is disabled while a send is in flight.
        KeyCode::Backspace if !app.is_sending() => app.compose_mut().backspace(),
        KeyCode::Char(c) if !app.is_sending() => app.compose_mut().push(c),
        _ => {}
    }
}
