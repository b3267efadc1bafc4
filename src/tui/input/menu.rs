use crossterm::event::{KeyCode, KeyEvent};

use crate::model::ItemPatch;
use crate::tui::app::{App, MenuAction, PromptKind};

use super::text::open_prompt;

pub(super) fn handle_menu(app: &mut App, key: KeyEvent) {
    let Some(id) = app.edit_target.clone() else {
        app.end_edit();
        return;
    };
    let last = MenuAction::ALL.len() - 1;

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('m') => app.end_edit(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.menu_cursor = (app.menu_cursor + 1).min(last);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.menu_cursor = app.menu_cursor.saturating_sub(1);
        }
        KeyCode::Enter => {
            let action = MenuAction::ALL[app.menu_cursor.min(last)];
            run_action(app, &id, action);
        }
        _ => {}
    }
}

fn run_action(app: &mut App, id: &str, action: MenuAction) {
    match action {
        MenuAction::DueDate => open_prompt(app, PromptKind::DueDate),
        MenuAction::DueTime => open_prompt(app, PromptKind::DueTime),
        MenuAction::Priority(priority) => {
            app.end_edit();
            app.apply(|o| o.update_item(id, ItemPatch::priority(priority)));
        }
        MenuAction::ClearSchedule => {
            app.end_edit();
            app.apply(|o| o.update_item(id, ItemPatch::clear_schedule()));
        }
        MenuAction::Duplicate => {
            app.end_edit();
            if let Some(Some(copy)) = app.apply(|o| o.duplicate_item(id)) {
                app.move_cursor_to(&copy);
            }
        }
        MenuAction::Delete => {
            app.end_edit();
            app.apply(|o| o.delete_item(id));
            app.clamp_cursor();
        }
    }
}
