use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;

use super::popup::centered_rect;

/// Render the sign-in surface shown in place of the lists while signed out
pub fn render_sign_in(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg = theme.background;
    let bg_style = Style::default().bg(bg);

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            " Sign in to see your lists",
            Style::default()
                .fg(theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(" Name: ", Style::default().fg(theme.dim).bg(bg)),
            Span::styled(app.edit_buffer.clone(), Style::default().fg(theme.text).bg(bg)),
            Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            " Lists are kept on this machine.",
            Style::default().fg(theme.dim).bg(bg),
        )),
    ];

    let popup = centered_rect(40, lines.len() as u16 + 2, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(bg_style);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
