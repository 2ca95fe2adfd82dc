//! Help overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::theme::Theme;

const HELP_ENTRIES: &[(&str, &str)] = &[
    ("j / \u{2193}", "next event"),
    ("k / \u{2191}", "previous event"),
    ("PgUp / PgDn", "page"),
    ("g / G", "first / last event"),
    ("Enter / Space", "expand or collapse"),
    ("y", "copy event content"),
    ("f", "toggle follow mode"),
    ("t", "absolute timestamps"),
    ("?", "this help"),
    ("q / Esc", "quit"),
];

/// Render the help overlay centered in `area`.
pub fn render_help_overlay(area: Rect, buf: &mut Buffer, theme: &Theme) {
    let width = 44.min(area.width);
    #[allow(clippy::cast_possible_truncation)]
    let height = (HELP_ENTRIES.len() as u16 + 2).min(area.height);
    if width < 10 || height < 4 {
        return;
    }

    let overlay = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    Clear.render(overlay, buf);

    let block = Block::default()
        .title(" Keys ")
        .title_style(Style::default().fg(theme.text))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(overlay);
    block.render(overlay, buf);

    let lines: Vec<Line<'_>> = HELP_ENTRIES
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {key:<14}"), Style::default().fg(theme.primary)),
                Span::styled(*action, Style::default().fg(theme.text)),
            ])
        })
        .collect();

    Paragraph::new(lines).render(inner, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_text;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_help_overlay_lists_keys() {
        let theme = Theme::default();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                render_help_overlay(frame.area(), frame.buffer_mut(), &theme);
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Keys"));
        assert!(text.contains("copy event content"));
        assert!(text.contains("absolute timestamps"));
    }

    #[test]
    fn test_help_overlay_tiny_area_is_a_noop() {
        let theme = Theme::default();
        let backend = TestBackend::new(8, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                render_help_overlay(frame.area(), frame.buffer_mut(), &theme);
            })
            .unwrap();
    }
}
