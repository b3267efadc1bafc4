mod edit;
mod menu;
mod navigate;
mod text;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

/// Handle a key event in the current mode, then re-run the focus policy
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }
    app.status_message = None;

    match app.mode {
        Mode::SignIn => text::handle_sign_in(app, key),
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Edit => edit::handle_edit(app, key),
        Mode::Rename => text::handle_rename(app, key),
        Mode::Menu => menu::handle_menu(app, key),
        Mode::Prompt(kind) => text::handle_prompt(app, kind, key),
    }

    app.sync_focus();
}
