use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the header row: app name and active list on the left, user and
/// theme indicator on the right.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let width = area.width as usize;

    let mut left: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "tack",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if app.mode != Mode::SignIn {
        left.push(Span::styled(
            " \u{2502} ",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        match app.active_list() {
            Some(list) => {
                left.push(Span::styled(
                    list.name.clone(),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ));
                left.push(Span::styled(
                    format!("  {}/{}", list.completed_count(), list.items.len()),
                    Style::default().fg(app.theme.dim).bg(bg),
                ));
            }
            None => left.push(Span::styled(
                "no list",
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        }
    }

    let user = app
        .session
        .user()
        .map_or_else(|| "signed out".to_string(), |u| u.name.clone());
    let theme_icon = if app.theme.dark { "\u{263E}" } else { "\u{2600}" };
    let right = format!("{}  {} ", user, theme_icon);

    let left_width: usize = left.iter().map(|s| unicode::display_width(&s.content)).sum();
    let right_width = unicode::display_width(&right);
    if left_width + right_width < width {
        left.push(Span::styled(
            " ".repeat(width - left_width - right_width),
            bg_style,
        ));
        left.push(Span::styled(right, Style::default().fg(app.theme.text).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(left)).style(bg_style);
    frame.render_widget(paragraph, area);
}
