use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

/// Render the list picker: one row per list, the active one highlighted.
/// The first nine lists carry the digit that selects them.
pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.sidebar_bg;
    let bg_style = Style::default().bg(bg);
    let width = area.width as usize;
    let active = app.outline().active_list_id();

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        unicode::pad_to_width(" Lists", width),
        Style::default()
            .fg(app.theme.dim)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ))];

    let lists = app.outline().lists();
    if lists.is_empty() {
        lines.push(Line::from(Span::styled(
            unicode::pad_to_width(" (none)", width),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    for (i, list) in lists.iter().enumerate() {
        let is_active = active == Some(list.id.as_str());
        let key = if i < 9 {
            format!("{}", i + 1)
        } else {
            " ".to_string()
        };
        let row_bg = if is_active { app.theme.selection_bg } else { bg };
        let name_style = if is_active {
            Style::default()
                .fg(app.theme.highlight)
                .bg(row_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text).bg(row_bg)
        };
        let prefix = format!(" {} ", key);
        let name_w = width.saturating_sub(unicode::display_width(&prefix));
        lines.push(Line::from(vec![
            Span::styled(prefix, Style::default().fg(app.theme.dim).bg(row_bg)),
            Span::styled(unicode::pad_to_width(&list.name, name_w), name_style),
        ]));
    }

    let paragraph = Paragraph::new(lines).style(bg_style);
    frame.render_widget(paragraph, area);
}
