use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::ItemPatch;
use crate::ops::keys;
use crate::tui::app::{App, Mode};

use super::edit::outline_key;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return;
    }

    if let Some(okey) = outline_key(key.code)
        && key.code != KeyCode::Enter
    {
        if let Some(id) = app.cursor_item_id() {
            app.apply(|o| keys::apply_key(o, &id, okey));
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Movement
        KeyCode::Char('j') | KeyCode::Down => {
            app.cursor += 1;
            app.clamp_cursor();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.items().len().saturating_sub(1);
        }

        // Editing
        KeyCode::Enter | KeyCode::Char('i') => {
            if app.items().is_empty() {
                append_item(app);
            } else {
                app.begin_edit();
            }
        }
        KeyCode::Char('a') => append_item(app),
        KeyCode::Char('o') => match app.cursor_item_id() {
            Some(id) => {
                app.apply(|o| keys::apply_key(o, &id, keys::OutlineKey::Enter));
            }
            None => append_item(app),
        },
        KeyCode::Char(' ') | KeyCode::Char('x') => toggle_completed(app),
        KeyCode::Char('D') => duplicate_cursor_item(app),
        KeyCode::Char('d') => delete_cursor_item(app),
        KeyCode::Char('m') => {
            if let Some(id) = app.cursor_item_id() {
                app.edit_target = Some(id);
                app.menu_cursor = 0;
                app.mode = Mode::Menu;
            }
        }

        // Lists
        KeyCode::Char('n') => {
            app.apply(|o| o.create_list());
            app.cursor = 0;
            app.scroll_offset = 0;
        }
        KeyCode::Char('r') => match app.active_list().map(|l| l.name.clone()) {
            Some(name) => app.start_input(Mode::Rename, &name),
            None => app.status_message = Some("no list selected".into()),
        },
        KeyCode::Char('[') => app.select_relative_list(-1),
        KeyCode::Char(']') => app.select_relative_list(1),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_list_at(index);
        }

        // Chrome
        KeyCode::Char('b') => app.toggle_sidebar(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('L') => match app.session.sign_out() {
            Ok(()) => app.enter_sign_in(),
            Err(e) => app.status_message = Some(format!("error: {}", e)),
        },
        _ => {}
    }
}

/// Append a level-0 item to the end of the active list. On an empty list this
/// creates the first item.
pub(super) fn append_item(app: &mut App) {
    if app.active_list().is_none() {
        app.status_message = Some("no list selected (press n to create one)".into());
        return;
    }
    app.apply(|o| o.insert_item_after(None, 0));
}

fn toggle_completed(app: &mut App) {
    let Some((id, completed)) = app.cursor_item().map(|i| (i.id.clone(), i.completed)) else {
        return;
    };
    app.apply(|o| o.update_item(&id, ItemPatch::completed(!completed)));
}

pub(super) fn duplicate_cursor_item(app: &mut App) {
    let Some(id) = app.cursor_item_id() else {
        return;
    };
    if let Some(Some(copy)) = app.apply(|o| o.duplicate_item(&id)) {
        app.move_cursor_to(&copy);
    }
}

pub(super) fn delete_cursor_item(app: &mut App) {
    let Some(id) = app.cursor_item_id() else {
        return;
    };
    app.apply(|o| o.delete_item(&id));
    app.clamp_cursor();
}
