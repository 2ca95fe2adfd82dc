//! Footer status bar widget.
//!
//! Format: `3/13 │ follow            copied │ [y] copy │ [?] help`
//!
//! Left side: position in the transcript plus mode indicators. Right side:
//! a transient notice (copy feedback) and key hints. Hints are dropped
//! first when the terminal is too narrow; the notice survives longer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// A single keybinding hint.
#[derive(Debug, Clone)]
pub struct KeyHint {
    /// The key (e.g. "j/k", "Enter").
    pub key: String,
    /// The action description (e.g. "move", "expand").
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint.
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }

    /// Default hints for the viewer. Kept short enough for an 80-column
    /// terminal; the help overlay lists the rest.
    pub fn viewer_hints() -> Vec<Self> {
        vec![
            Self::new("j/k", "move"),
            Self::new("Enter", "expand"),
            Self::new("y", "copy"),
            Self::new("?", "help"),
            Self::new("q", "quit"),
        ]
    }
}

/// Footer status bar widget.
pub struct StatusBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
    /// (selected + 1, total) position indicator.
    position: Option<(usize, usize)>,
    following: bool,
    /// Transient notice shown before the hints.
    notice: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self {
            hints,
            theme,
            position: None,
            following: false,
            notice: None,
        }
    }

    /// Set the position indicator.
    #[must_use]
    pub fn position(mut self, selected: Option<usize>, total: usize) -> Self {
        self.position = selected.map(|s| (s + 1, total));
        self
    }

    /// Set the follow mode indicator.
    #[must_use]
    pub fn following(mut self, following: bool) -> Self {
        self.following = following;
        self
    }

    /// Set a transient notice.
    #[must_use]
    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    fn divider(&self) -> Span<'static> {
        Span::styled(" \u{2502} ".to_string(), Style::default().fg(self.theme.border))
    }

    fn left_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();

        if let Some((at, total)) = self.position {
            spans.push(Span::styled(
                format!("{at}/{total}"),
                Style::default().fg(self.theme.subtext),
            ));
        }

        if self.following {
            if !spans.is_empty() {
                spans.push(self.divider());
            }
            spans.push(Span::styled(
                "follow".to_string(),
                Style::default().fg(self.theme.success),
            ));
        }

        spans
    }

    fn notice_spans(&self) -> Vec<Span<'static>> {
        self.notice
            .map(|notice| {
                vec![Span::styled(
                    notice.to_string(),
                    Style::default().fg(self.theme.warning),
                )]
            })
            .unwrap_or_default()
    }

    fn hint_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(self.divider());
            }
            spans.push(Span::styled(
                format!("[{}] ", hint.key),
                Style::default().fg(self.theme.primary),
            ));
            spans.push(Span::styled(
                hint.action.clone(),
                Style::default().fg(self.theme.muted),
            ));
        }
        spans
    }
}

/// Display width of a span list.
fn spans_width(spans: &[Span<'_>]) -> usize {
    spans.iter().map(|s| s.content.width()).sum()
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let left = self.left_spans();
        let notice = self.notice_spans();
        let hints = self.hint_spans();
        let total = area.width as usize;
        let left_width = spans_width(&left);

        // Prefer notice + hints; fall back to notice alone, then nothing.
        let mut right = Vec::new();
        if !notice.is_empty() && !hints.is_empty() {
            right.extend(notice.clone());
            right.push(self.divider());
        }
        right.extend(hints);
        if left_width + spans_width(&right) >= total {
            right = notice;
        }
        if left_width + spans_width(&right) >= total {
            right = Vec::new();
        }

        // Pad the gap so the right side sits flush with the edge
        let mut spans = left;
        let right_width = spans_width(&right);
        if !right.is_empty() {
            spans.push(Span::raw(" ".repeat(total - left_width - right_width)));
            spans.extend(right);
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_text;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_bar(bar: StatusBar<'_>, width: u16) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| frame.render_widget(bar, frame.area()))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_status_bar_shows_position_and_hints() {
        let hints = KeyHint::viewer_hints();
        let theme = Theme::default();
        let bar = StatusBar::new(&hints, &theme)
            .position(Some(2), 13)
            .following(true);

        let text = render_bar(bar, 100);
        assert!(text.contains("3/13"));
        assert!(text.contains("follow"));
        assert!(text.contains("[y] copy"));
        assert!(text.contains("[q] quit"));
    }

    #[test]
    fn test_status_bar_notice_precedes_hints() {
        let hints = KeyHint::viewer_hints();
        let theme = Theme::default();
        let bar = StatusBar::new(&hints, &theme)
            .position(Some(0), 5)
            .notice(Some("copied"));

        let text = render_bar(bar, 100);
        assert!(text.contains("copied"));
        assert!(text.contains("[q] quit"));
    }

    #[test]
    fn test_status_bar_notice_survives_narrow_terminal() {
        let hints = KeyHint::viewer_hints();
        let theme = Theme::default();
        let bar = StatusBar::new(&hints, &theme)
            .position(Some(0), 5)
            .notice(Some("copied"));

        let text = render_bar(bar, 30);
        assert!(text.contains("copied"));
        assert!(!text.contains("help"));
    }

    #[test]
    fn test_status_bar_narrow_terminal_drops_hints() {
        let hints = KeyHint::viewer_hints();
        let theme = Theme::default();
        let bar = StatusBar::new(&hints, &theme).position(Some(0), 5);

        let text = render_bar(bar, 10);
        assert!(text.contains("1/5"));
        assert!(!text.contains("help"));
    }
}
