use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use serde_json::{Value, json};

use crate::io::identity::StaticIdentity;
use crate::io::state::{ACTIVE_LIST_KEY, LISTS_KEY, Session};
use crate::io::store::MemoryStore;
use crate::model::AppConfig;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Fixed "today" so overdue styling and relative dates are stable.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

/// Build an App over an in-memory store.
pub fn app_from_store(store: MemoryStore, identity: StaticIdentity) -> App {
    let config = AppConfig::default();
    let session = Session::open(Box::new(store), Box::new(identity), &config).unwrap();
    let mut app = App::new(session, config);
    app.today = today();
    app
}

/// A signed-in App whose store holds `lists` with `active` selected.
pub fn app_with_lists(lists: Value, active: Option<&str>) -> App {
    let store = MemoryStore::new()
        .with(LISTS_KEY, lists)
        .with(ACTIVE_LIST_KEY, json!(active));
    app_from_store(store, StaticIdentity::signed_in("ada"))
}

/// A signed-in App with no lists at all.
pub fn fresh_app() -> App {
    app_from_store(MemoryStore::new(), StaticIdentity::signed_in("ada"))
}

/// A signed-out App.
pub fn signed_out_app() -> App {
    app_from_store(MemoryStore::new(), StaticIdentity::signed_out())
}

/// One active empty list named "Inbox".
pub fn empty_list_app() -> App {
    app_with_lists(json!([{"id": "L1", "name": "Inbox", "todos": []}]), Some("L1"))
}

/// "Groceries" (active) with a small outline, plus a second list "Work".
pub fn groceries_app() -> App {
    app_with_lists(
        json!([
            {
                "id": "L1",
                "name": "Groceries",
                "todos": [
                    {"id": "i1", "title": "Dairy", "completed": false, "level": 0},
                    {"id": "i2", "title": "Milk", "completed": false, "level": 1,
                     "dueDate": "2025-01-14", "priority": "high"},
                    {"id": "i3", "title": "Bread", "completed": true, "level": 0,
                     "dueDate": "2025-01-20", "dueTime": "09:30"}
                ]
            },
            {"id": "L2", "name": "Work", "todos": []}
        ]),
        Some("L1"),
    )
}
