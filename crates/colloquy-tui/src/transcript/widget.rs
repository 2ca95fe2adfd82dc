//! Transcript widget for rendering conversation events.

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use colloquy_core::{
    absolute_label, relative_label, response_duration, ChatEvent, EventKind, Outcome, Source,
};

use super::state::TranscriptState;
use super::MAX_EXPANDED_LINES;
use crate::text::{render_markdown, wrap_text};
use crate::theme::Theme;

/// Transcript pane widget.
///
/// Relative timestamp labels are computed against the `now` instant passed
/// in by the app, which refreshes it on timer ticks. The widget itself
/// never consults the clock.
pub struct TranscriptWidget<'a> {
    state: &'a TranscriptState,
    theme: &'a Theme,
    now: DateTime<Utc>,
    focused: bool,
    /// Show absolute date-time labels instead of relative ones.
    show_absolute: bool,
    /// Whether to render with a border (default: true).
    with_border: bool,
}

impl<'a> TranscriptWidget<'a> {
    /// Create a new transcript widget.
    pub fn new(state: &'a TranscriptState, theme: &'a Theme, now: DateTime<Utc>) -> Self {
        Self {
            state,
            theme,
            now,
            focused: false,
            show_absolute: false,
            with_border: true,
        }
    }

    /// Set whether the pane is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set whether to show absolute timestamps.
    #[must_use]
    pub fn show_absolute(mut self, show_absolute: bool) -> Self {
        self.show_absolute = show_absolute;
        self
    }

    /// Set whether to render with a border.
    #[must_use]
    pub fn with_border(mut self, border: bool) -> Self {
        self.with_border = border;
        self
    }

    /// Attribution color for an event's source.
    fn source_color(&self, source: Source) -> Color {
        match source {
            Source::User => self.theme.user,
            Source::Agent => self.theme.agent,
            Source::Environment => self.theme.environment,
        }
    }

    /// Color for the collapsed summary line.
    fn summary_color(&self, event: &ChatEvent) -> Color {
        match &event.kind {
            EventKind::Observation(e) => match e.outcome {
                Outcome::Success => self.theme.success,
                Outcome::Failure => self.theme.error,
                Outcome::Unknown => self.theme.text,
            },
            EventKind::Error(_) => self.theme.error,
            EventKind::Message(_) | EventKind::Action(_) => self.theme.text,
        }
    }

    /// Timestamp label for the header line.
    fn time_label(&self, event: &ChatEvent) -> String {
        if self.show_absolute {
            absolute_label(event.timestamp)
        } else {
            relative_label(event.timestamp, self.now)
        }
    }

    /// Render the header line: selection marker, speaker, attribution,
    /// timestamp, and response-time annotation for agent events.
    fn render_header(&self, event: &ChatEvent, selected: bool, area: Rect, buf: &mut Buffer) {
        let marker = if selected { "\u{25b8} " } else { "  " };
        let color = self.source_color(event.source);

        let mut spans = vec![
            Span::styled(
                marker,
                Style::default().fg(if selected {
                    self.theme.primary
                } else {
                    self.theme.base
                }),
            ),
            Span::styled(event.speaker_symbol(), Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(event.attribution(), Style::default().fg(color)),
            Span::raw("  "),
            Span::styled(self.time_label(event), Style::default().fg(self.theme.muted)),
        ];

        if let Some(elapsed) = response_duration(event, self.state.events()) {
            spans.push(Span::styled(
                format!("  \u{b7} responded in {elapsed}"),
                Style::default().fg(self.theme.subtext),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    /// Render a single event. Returns the number of lines used.
    fn render_event(
        &self,
        event: &ChatEvent,
        selected: bool,
        area: Rect,
        buf: &mut Buffer,
    ) -> u16 {
        let mut y = area.y;
        let width = area.width as usize;

        self.render_header(event, selected, Rect::new(area.x, y, area.width, 1), buf);
        y += 1;

        if y >= area.y + area.height {
            return y - area.y;
        }

        let collapse_indicator = if event.is_collapsible() {
            if event.collapsed {
                "\u{25b8} " // ▸
            } else {
                "\u{25be} " // ▾
            }
        } else {
            "  "
        };

        let body_width = width.saturating_sub(6);

        if event.collapsed || !event.is_collapsible() {
            let display = truncate_str(&event.summary(), body_width);
            let line = Line::from(vec![
                Span::raw("    "),
                Span::styled(collapse_indicator, Style::default().fg(self.theme.muted)),
                Span::styled(display, Style::default().fg(self.summary_color(event))),
            ]);
            Paragraph::new(line).render(Rect::new(area.x, y, area.width, 1), buf);
            y += 1;
        } else {
            let body_lines = self.expanded_body(event, body_width);
            let total = body_lines.len();
            let shown = total.min(MAX_EXPANDED_LINES);
            let has_more = total > MAX_EXPANDED_LINES;

            for (i, body_line) in body_lines.into_iter().take(shown).enumerate() {
                if y >= area.y + area.height {
                    break;
                }

                let prefix = if i == 0 { collapse_indicator } else { "  " };
                let mut spans = vec![
                    Span::raw("    "),
                    Span::styled(prefix, Style::default().fg(self.theme.muted)),
                ];
                spans.extend(body_line.spans);

                Paragraph::new(Line::from(spans)).render(Rect::new(area.x, y, area.width, 1), buf);
                y += 1;
            }

            if has_more && y < area.y + area.height {
                let more = total - MAX_EXPANDED_LINES;
                let line = Line::from(vec![
                    Span::raw("      "),
                    Span::styled(
                        format!("[+{more} more]"),
                        Style::default().fg(self.theme.muted),
                    ),
                ]);
                Paragraph::new(line).render(Rect::new(area.x, y, area.width, 1), buf);
                y += 1;
            }
        }

        y - area.y
    }

    /// Styled body lines for an expanded event. Messages render as
    /// markdown; everything else is plain wrapped text.
    fn expanded_body(&self, event: &ChatEvent, width: usize) -> Vec<Line<'static>> {
        match &event.kind {
            EventKind::Message(e) => render_markdown(&e.content, width, self.theme),
            _ => {
                let color = self.summary_color(event);
                event
                    .body_lines()
                    .iter()
                    .flat_map(|l| wrap_text(l, width.max(1)))
                    .map(|l| Line::from(Span::styled(l, Style::default().fg(color))))
                    .collect()
            }
        }
    }
}

impl Widget for TranscriptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if self.with_border {
            let border_style = if self.focused {
                Style::default().fg(self.theme.border_focused)
            } else {
                Style::default().fg(self.theme.border)
            };

            let block = Block::default()
                .title(format!(" {} ", self.state.title()))
                .title_style(Style::default().fg(self.theme.text))
                .borders(Borders::ALL)
                .border_style(border_style)
                .style(Style::default().bg(self.theme.base));

            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.height == 0 {
            return;
        }

        if self.state.is_empty() {
            let empty = Line::from(Span::styled(
                "No events",
                Style::default().fg(self.theme.muted),
            ));
            Paragraph::new(empty).render(
                Rect::new(
                    inner.x + 2,
                    inner.y + inner.height / 2,
                    inner.width.saturating_sub(4),
                    1,
                ),
                buf,
            );
            return;
        }

        let visible_count = self.state.events_per_page(inner.height as usize);
        let visible = self.state.visible_events(visible_count);

        let mut y = inner.y;
        for (idx, event) in visible {
            if y >= inner.y + inner.height {
                break;
            }

            let is_selected = self.state.selected() == Some(idx);
            let remaining = (inner.y + inner.height).saturating_sub(y);
            let event_area = Rect::new(inner.x, y, inner.width, remaining);

            y += self.render_event(event, is_selected, event_area, buf);

            // Blank line between events if space remains
            if y < inner.y + inner.height {
                y += 1;
            }
        }
    }
}

/// Truncate a string to `max_len` characters, adding an ellipsis.
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
