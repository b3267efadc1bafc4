use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::ItemPatch;
use crate::ops::schedule;
use crate::tui::app::{App, Mode, PromptKind};
use crate::util::unicode;

/// Apply a line-editing key to `edit_buffer`. Returns true when the text changed.
pub(super) fn apply_text_key(app: &mut App, key: KeyEvent) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        // Ctrl+U: delete to start of line
        KeyCode::Char('u') if ctrl => {
            if app.edit_cursor == 0 {
                return false;
            }
            app.edit_buffer.drain(..app.edit_cursor);
            app.edit_cursor = 0;
            true
        }
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            app.edit_buffer.insert(app.edit_cursor, c);
            app.edit_cursor += c.len_utf8();
            true
        }
        KeyCode::Backspace => {
            match unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                Some(prev) => {
                    app.edit_buffer.replace_range(prev..app.edit_cursor, "");
                    app.edit_cursor = prev;
                    true
                }
                None => false,
            }
        }
        KeyCode::Delete => match unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
            Some(next) => {
                app.edit_buffer.replace_range(app.edit_cursor..next, "");
                true
            }
            None => false,
        },
        KeyCode::Left => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = prev;
            }
            false
        }
        KeyCode::Right => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = next;
            }
            false
        }
        KeyCode::Home => {
            app.edit_cursor = 0;
            false
        }
        KeyCode::End => {
            app.edit_cursor = app.edit_buffer.len();
            false
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Sign-in
// ---------------------------------------------------------------------------

pub(super) fn handle_sign_in(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => {
            let name = app.edit_buffer.clone();
            match app.session.sign_in(&name) {
                Ok(user) => {
                    app.end_edit();
                    app.cursor = 0;
                    app.scroll_offset = 0;
                    app.status_message = Some(format!("signed in as {}", user.name));
                }
                Err(e) => app.status_message = Some(e.to_string()),
            }
        }
        _ => {
            apply_text_key(app, key);
        }
    }
}

// ---------------------------------------------------------------------------
// Rename list
// ---------------------------------------------------------------------------

pub(super) fn handle_rename(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.end_edit(),
        KeyCode::Enter => {
            let name = app.edit_buffer.trim().to_string();
            if name.is_empty() {
                app.status_message = Some("list name cannot be empty".into());
                return;
            }
            app.end_edit();
            app.apply(|o| o.rename_active_list(&name));
        }
        _ => {
            apply_text_key(app, key);
        }
    }
}

// ---------------------------------------------------------------------------
// Schedule prompts
// ---------------------------------------------------------------------------

pub(super) fn handle_prompt(app: &mut App, kind: PromptKind, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.end_edit(),
        KeyCode::Enter => {
            let Some(id) = app.edit_target.clone() else {
                app.end_edit();
                return;
            };
            let Some(patch) = prompt_patch(kind, &app.edit_buffer, app.today) else {
                app.status_message = Some(format!(
                    "invalid {}: {}",
                    kind.label().to_lowercase(),
                    kind.hint()
                ));
                return;
            };
            app.end_edit();
            app.apply(|o| o.update_item(&id, patch));
        }
        _ => {
            apply_text_key(app, key);
        }
    }
}

/// Turn prompt text into a patch. Empty input clears the field.
fn prompt_patch(kind: PromptKind, input: &str, today: NaiveDate) -> Option<ItemPatch> {
    let input = input.trim();
    match kind {
        PromptKind::DueDate if input.is_empty() => Some(ItemPatch::due_date(None)),
        PromptKind::DueDate => {
            schedule::parse_due_date(input, today).map(|d| ItemPatch::due_date(Some(d)))
        }
        PromptKind::DueTime if input.is_empty() => Some(ItemPatch::due_time(None)),
        PromptKind::DueTime => {
            schedule::parse_due_time(input).map(|t| ItemPatch::due_time(Some(t)))
        }
    }
}

/// Open the prompt for `kind`, seeded with the target item's current value.
pub(super) fn open_prompt(app: &mut App, kind: PromptKind) {
    let current = app
        .edit_target
        .as_deref()
        .and_then(|id| app.item(id))
        .and_then(|item| match kind {
            PromptKind::DueDate => item.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            PromptKind::DueTime => item.due_time.clone(),
        })
        .unwrap_or_default();
    app.start_input(Mode::Prompt(kind), &current);
}
