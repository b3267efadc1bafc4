use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

const NAVIGATE_HINTS: &str =
    "a add  o below  \u{21B5} edit  \u{21E5} indent  x done  m menu  n new list  r rename  q quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    let hint = match app.mode {
        Mode::Navigate => NAVIGATE_HINTS,
        Mode::Edit => "\u{21B5} new item  \u{21E5}/\u{21E4} indent/outdent  Esc done",
        Mode::Menu => "j/k move  \u{21B5} choose  Esc close",
        Mode::SignIn => "\u{21B5} sign in  Esc quit",
        Mode::Rename | Mode::Prompt(_) => "\u{21B5} save  Esc cancel",
    };

    // Text-entry modes show their input on the left
    let input_label = match app.mode {
        Mode::Rename => Some("List name".to_string()),
        Mode::Prompt(kind) => Some(format!("{} ({})", kind.label(), kind.hint())),
        _ => None,
    };
    if let Some(label) = input_label {
        spans.push(Span::styled(
            format!(" {}: ", label),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        spans.push(Span::styled(
            app.edit_buffer.clone(),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        )); // ▌ cursor
    }

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    // Right-aligned key hints when there is room
    if app.config.ui.show_key_hints {
        let content_width: usize = spans
            .iter()
            .map(|s| unicode::display_width(&s.content))
            .sum();
        let hint_width = unicode::display_width(hint) + 1;
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(
                format!("{} ", hint),
                Style::default().fg(app.theme.dim).bg(bg),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
