pub mod header;
pub mod list_view;
pub mod popup;
pub mod sidebar;
pub mod sign_in;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function: header, body, status row, then overlays
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (1 row) | body | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);

    let body = chunks[1];
    if app.mode == Mode::SignIn {
        sign_in::render_sign_in(frame, app, body);
    } else if app.session.prefs().sidebar_open {
        let sidebar_w = app.config.ui.sidebar_width.min(body.width / 2);
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_w), Constraint::Min(1)])
            .split(body);
        sidebar::render_sidebar(frame, app, cols[0]);
        list_view::render_list_view(frame, app, cols[1]);
    } else {
        list_view::render_list_view(frame, app, body);
    }

    if app.mode == Mode::Menu {
        popup::render_menu(frame, app, body);
    }

    status_row::render_status_row(frame, app, chunks[2]);
}
