use crossterm::event::{KeyCode, KeyEvent};

use crate::model::ItemPatch;
use crate::ops::keys::{self, KeyOutcome, OutlineKey};
use crate::tui::app::App;

use super::text::apply_text_key;

/// Map a key to its outline meaning inside a title input, if it has one.
pub(super) fn outline_key(code: KeyCode) -> Option<OutlineKey> {
    match code {
        KeyCode::Enter => Some(OutlineKey::Enter),
        KeyCode::Tab => Some(OutlineKey::Tab),
        KeyCode::BackTab => Some(OutlineKey::BackTab),
        _ => None,
    }
}

/// Title editing. Every text change is written through as an `update_item`;
/// Enter, Tab and Shift+Tab follow the outline policy and never reach the text.
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let Some(id) = app.edit_target.clone() else {
        app.end_edit();
        return;
    };

    if key.code == KeyCode::Esc {
        app.end_edit();
        return;
    }

    if let Some(okey) = outline_key(key.code) {
        // An inserted sibling is picked up by the focus policy after this key.
        if let Some(KeyOutcome::Missed) = app.apply(|o| keys::apply_key(o, &id, okey)) {
            app.end_edit();
        }
        return;
    }

    match key.code {
        KeyCode::Up | KeyCode::Down => {
            app.end_edit();
            if key.code == KeyCode::Up {
                app.cursor = app.cursor.saturating_sub(1);
            } else {
                app.cursor += 1;
                app.clamp_cursor();
            }
        }
        _ => {
            if apply_text_key(app, key) {
                let title = app.edit_buffer.clone();
                app.apply(|o| o.update_item(&id, ItemPatch::title(title)));
            }
        }
    }
}
