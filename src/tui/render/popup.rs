use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, MenuAction};
use crate::util::unicode;

const MENU_INNER_W: u16 = 22;

/// Center a `w` x `h` box inside `area`, shrinking it to fit.
pub fn centered_rect(w: u16, h: u16, area: Rect) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

/// Render the item action menu over the body
pub fn render_menu(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let bg_style = Style::default().bg(theme.background);
    let inner_w = MENU_INNER_W as usize;

    let title = app
        .edit_target
        .as_deref()
        .and_then(|id| app.item(id))
        .map(|item| {
            if item.title.is_empty() {
                "(empty)".to_string()
            } else {
                item.title.clone()
            }
        })
        .unwrap_or_default();

    let lines: Vec<Line> = MenuAction::ALL
        .iter()
        .enumerate()
        .map(|(i, action)| {
            let selected = i == app.menu_cursor;
            let style = if selected {
                Style::default()
                    .fg(theme.text_bright)
                    .bg(theme.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text).bg(theme.background)
            };
            Line::from(Span::styled(
                unicode::pad_to_width(&format!(" {}", action.label()), inner_w),
                style,
            ))
        })
        .collect();

    let popup = centered_rect(MENU_INNER_W + 2, lines.len() as u16 + 2, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight).bg(theme.background))
        .title(Span::styled(
            format!(" {} ", unicode::truncate_to_width(&title, inner_w.saturating_sub(2))),
            Style::default().fg(theme.text_bright).bg(theme.background),
        ))
        .style(bg_style);

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Mode;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn centered_rect_fits_area() {
        let r = centered_rect(10, 4, Rect::new(0, 0, 30, 10));
        assert_eq!(r, Rect::new(10, 3, 10, 4));
        let r = centered_rect(50, 50, Rect::new(0, 0, 30, 10));
        assert_eq!(r, Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn menu_lists_actions_with_item_title() {
        let mut app = groceries_app();
        app.edit_target = Some("i2".into());
        app.mode = Mode::Menu;
        app.menu_cursor = 2;
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_menu(frame, &app, area);
        });
        assert!(output.contains(" Milk "));
        for action in MenuAction::ALL {
            assert!(output.contains(action.label()), "missing {}", action.label());
        }
    }
}
